#![allow(async_fn_in_trait)]
use std::path::Path;

use bytes::Bytes;
use log::{debug, error, info};
use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};

pub trait MediaDownloader: Send + Sync {
    /// Fetches the image at `url` and stores it at `path`, replacing any
    /// previous file.
    async fn download(&self, url: &Url, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl MediaDownloader for HttpDownloader {
    async fn download(&self, url: &Url, path: &Path) -> Result<()> {
        download_photo(&self.client, url, path).await
    }
}

pub async fn download_photo(client: &Client, url: &Url, path: &Path) -> Result<()> {
    info!("fetching {url} to {}", path.display());
    let response = client.get(url.to_owned()).send().await.map_err(|e| {
        error!("Failed to send request when download image from {url}: {e}");
        e
    })?;
    let status = response.status();
    if !status.is_success() {
        error!("image download from {url} returned HTTP {status}");
        return Err(Error::provider(
            status.as_u16() as i64,
            format!("error fetching image, status code: {status}"),
        ));
    }
    let body = response.bytes().await.map_err(|e| {
        error!("Failed to read bytes from response for {url}: {e}");
        e
    })?;
    validate_image(&body)?;
    tokio::fs::write(path, &body).await?;
    debug!("stored {} bytes at {}", body.len(), path.display());
    Ok(())
}

fn validate_image(data: &Bytes) -> Result<()> {
    let format = image::guess_format(data)
        .map_err(|e| Error::Format(format!("unrecognised image data: {e}")))?;
    image::load_from_memory_with_format(data, format)
        .map_err(|e| Error::Format(format!("Failed to decode image: {e}")))?;
    Ok(())
}
