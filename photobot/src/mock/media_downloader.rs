//! Test mock for media_downloader
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use url::Url;

use crate::{
    error::{Error, Result},
    media_downloader::MediaDownloader,
};

#[derive(Debug, Clone, Default)]
pub struct MockDownloader {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    downloads: Vec<(Url, PathBuf)>,
    failing: HashSet<String>,
}

impl MockDownloader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes every download of `url` fail with an HTTP 404.
    pub fn fail_on(&self, url: &str) {
        self.inner.lock().unwrap().failing.insert(url.to_string());
    }

    pub fn downloads(&self) -> Vec<(Url, PathBuf)> {
        self.inner.lock().unwrap().downloads.clone()
    }
}

impl MediaDownloader for MockDownloader {
    async fn download(&self, url: &Url, path: &Path) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing.contains(url.as_str()) {
            return Err(Error::provider(404, "error fetching image, status code: 404"));
        }
        inner.downloads.push((url.clone(), path.to_path_buf()));
        Ok(())
    }
}
