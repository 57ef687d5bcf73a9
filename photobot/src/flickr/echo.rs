#![allow(async_fn_in_trait)]
use log::{info, warn};

use super::FlickrClient;
use super::internal::EchoResponse;
use crate::error::Result;

pub trait EchoApi {
    /// Whether the API key is still accepted.
    async fn verify_credentials(&self) -> Result<bool>;
}

impl EchoApi for FlickrClient {
    async fn verify_credentials(&self) -> Result<bool> {
        info!("verifying flickr api key");
        match self.call::<EchoResponse>("flickr.test.echo", &[]).await {
            Ok(_) => Ok(true),
            Err(crate::error::Error::Provider { code, message }) => {
                warn!("flickr api key rejected ({code}): {message}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
