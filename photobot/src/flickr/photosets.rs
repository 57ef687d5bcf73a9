#![allow(async_fn_in_trait)]
use log::info;

use super::internal::{PhotosetInfoResponse, PhotosetPhotosResponse};
use super::{FlickrClient, PHOTO_EXTRAS};
use crate::error::Result;
use crate::models::{AlbumInfo, PhotoPage};

pub trait PhotosetsApi {
    async fn get_album_info(&self, user_id: &str, album_id: &str) -> Result<AlbumInfo>;
    /// One page (1-based) of an album. Photo owners are taken from the album.
    async fn get_album_photos(&self, user_id: &str, album_id: &str, page: u32)
    -> Result<PhotoPage>;
}

impl PhotosetsApi for FlickrClient {
    async fn get_album_info(&self, user_id: &str, album_id: &str) -> Result<AlbumInfo> {
        info!("getting info of album {album_id} of {user_id}");
        let response: PhotosetInfoResponse = self
            .call(
                "flickr.photosets.getInfo",
                &[
                    ("user_id", user_id.to_string()),
                    ("photoset_id", album_id.to_string()),
                ],
            )
            .await?;
        Ok(response.into())
    }

    async fn get_album_photos(
        &self,
        user_id: &str,
        album_id: &str,
        page: u32,
    ) -> Result<PhotoPage> {
        info!("getting photos of album {album_id} of {user_id}, page: {page}");
        let response: PhotosetPhotosResponse = self
            .call(
                "flickr.photosets.getPhotos",
                &[
                    ("user_id", user_id.to_string()),
                    ("photoset_id", album_id.to_string()),
                    ("extras", PHOTO_EXTRAS.to_string()),
                    ("per_page", self.page_size.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(response.into())
    }
}
