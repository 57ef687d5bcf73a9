#![allow(async_fn_in_trait)]
use log::{debug, info};

use super::internal::{ContextsResponse, PhotosResponse};
use super::{FlickrClient, PHOTO_EXTRAS};
use crate::error::{Error, Result};
use crate::models::PhotoPage;

pub trait PhotosApi {
    /// Full-text search over the user's public photos. `per_page` lets the
    /// caller ask for a single result when only the total is needed.
    async fn search_user_photos(
        &self,
        user_id: &str,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage>;

    /// Whether the photo belongs to any of the given albums.
    async fn photo_is_in_albums(&self, photo_id: &str, album_ids: &[String]) -> Result<bool>;
}

impl PhotosApi for FlickrClient {
    async fn search_user_photos(
        &self,
        user_id: &str,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage> {
        if text.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "zero-length search term".to_string(),
            ));
        }
        info!("searching photos of {user_id} for {text:?}, page: {page}");
        let response: PhotosResponse = self
            .call(
                "flickr.photos.search",
                &[
                    ("user_id", user_id.to_string()),
                    ("text", text.to_string()),
                    ("privacy_filter", "1".to_string()),
                    ("extras", PHOTO_EXTRAS.to_string()),
                    ("per_page", per_page.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(response.into())
    }

    async fn photo_is_in_albums(&self, photo_id: &str, album_ids: &[String]) -> Result<bool> {
        let contexts: ContextsResponse = self
            .call(
                "flickr.photos.getAllContexts",
                &[("photo_id", photo_id.to_string())],
            )
            .await?;
        let found = contexts.set.iter().any(|set| album_ids.contains(&set.id));
        debug!("photo {photo_id} in configured albums: {found}");
        Ok(found)
    }
}
