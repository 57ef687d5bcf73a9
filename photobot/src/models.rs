pub mod album;
pub mod err_response;
pub mod mention;
pub mod photo;
pub mod user;

pub use album::AlbumInfo;
pub use err_response::ErrResponse;
pub use mention::Mention;
pub use photo::{Photo, PhotoPage, SIZE_PREFERENCE};
pub use user::UserInfo;
