#![allow(async_fn_in_trait)]
use log::{debug, info};

use super::internal::{PersonResponse, PhotosResponse};
use super::{FlickrClient, PHOTO_EXTRAS};
use crate::error::Result;
use crate::models::{PhotoPage, UserInfo};

pub trait PeopleApi {
    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo>;
    /// One page (1-based) of the user's public photostream.
    async fn get_photostream(&self, user_id: &str, page: u32) -> Result<PhotoPage>;
}

impl PeopleApi for FlickrClient {
    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo> {
        info!("getting user info of {user_id}");
        let response: PersonResponse = self
            .call("flickr.people.getInfo", &[("user_id", user_id.to_string())])
            .await?;
        let info: UserInfo = response.into();
        debug!("user {user_id} has {} photos", info.photo_count);
        Ok(info)
    }

    async fn get_photostream(&self, user_id: &str, page: u32) -> Result<PhotoPage> {
        info!("getting photostream of {user_id}, page: {page}");
        let response: PhotosResponse = self
            .call(
                "flickr.people.getPublicPhotos",
                &[
                    ("user_id", user_id.to_string()),
                    ("extras", PHOTO_EXTRAS.to_string()),
                    ("per_page", self.page_size.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(response.into())
    }
}
