pub mod echo;
pub(crate) mod internal;
pub mod people;
pub mod photos;
pub mod photosets;

use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::config::FlickrConfig;
use crate::error::{Error, Result};
use crate::models::{ErrResponse, Photo};
use crate::utils;

pub use echo::EchoApi;
pub use people::PeopleApi;
pub use photos::PhotosApi;
pub use photosets::PhotosetsApi;

/// Extras requested with every photo listing; the `url_*` ones become
/// [`Photo::urls`].
pub(crate) const PHOTO_EXTRAS: &str = "url_sq,url_t,url_s,url_q,url_m,url_n,url_z,url_c,url_l,url_o,description,tags,owner_name,license";

/// Everything the bot needs from the photo host.
pub trait PhotoProvider: PeopleApi + PhotosetsApi + PhotosApi + EchoApi + Send + Sync {
    fn make_shortened_link(&self, photo: &Photo) -> String {
        utils::make_shortened_link(photo)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "stat")]
enum FlickrResponse<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "fail")]
    Fail(ErrResponse),
}

impl<T> FlickrResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        match self {
            FlickrResponse::Ok(payload) => Ok(payload),
            FlickrResponse::Fail(err) => {
                error!("{method} failed: {err:?}");
                Err(err.into())
            }
        }
    }
}

/// Thin client over the Flickr REST JSON API. No retries: a failed call is
/// reported to the caller as is.
#[derive(Debug, Clone)]
pub struct FlickrClient {
    http: Client,
    api_key: String,
    base_url: Url,
    page_size: u32,
}

impl FlickrClient {
    pub fn new(http: Client, config: &FlickrConfig) -> Result<Self> {
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: Url::parse(&config.base_url)?,
            page_size: config.page_size,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T> {
        let mut query = vec![
            ("method", method.to_string()),
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.clone())));
        debug!("calling {method} with {params:?}");

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            error!("{method} returned HTTP {status}");
            return Err(Error::provider(
                status.as_u16() as i64,
                format!("{method} returned HTTP {status}"),
            ));
        }
        response
            .json::<FlickrResponse<T>>()
            .await?
            .into_result(method)
    }
}

impl PhotoProvider for FlickrClient {}
