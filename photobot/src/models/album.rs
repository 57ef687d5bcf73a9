use serde::{Deserialize, Serialize};

/// Flickr photoset (album) summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlbumInfo {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub photo_count: u64,
}
