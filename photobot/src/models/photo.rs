use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Flickr size suffixes, largest first.
pub const SIZE_PREFERENCE: [&str; 10] = ["o", "l", "c", "z", "n", "m", "q", "s", "t", "sq"];

/// A candidate image. Never persisted: it lives from selection until the
/// post that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Photo {
    pub id: String,
    pub owner: Option<String>,
    pub title: String,
    /// Keyed by size suffix (`l` for `url_l` etc.).
    pub urls: BTreeMap<String, Url>,
}

impl Photo {
    pub fn url(&self, size: &str) -> Option<&Url> {
        self.urls.get(size.trim_start_matches("url_"))
    }

    /// The requested size if the provider listed it, otherwise the largest
    /// one available.
    pub fn best_url(&self, preferred: &str) -> Option<&Url> {
        self.url(preferred).or_else(|| {
            SIZE_PREFERENCE
                .iter()
                .find_map(|size| self.urls.get(*size))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PhotoPage {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u64,
    pub photos: Vec<Photo>,
}

impl PhotoPage {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_with(sizes: &[&str]) -> Photo {
        let urls = sizes
            .iter()
            .map(|s| {
                (
                    s.to_string(),
                    Url::parse(&format!("https://live.staticflickr.com/1/1_{s}.jpg")).unwrap(),
                )
            })
            .collect();
        Photo {
            id: "1".into(),
            owner: Some("53460575@N03".into()),
            title: "Jupiter".into(),
            urls,
        }
    }

    #[test]
    fn test_best_url_prefers_configured_size() {
        let photo = photo_with(&["o", "l", "m"]);
        assert!(photo.best_url("url_m").unwrap().as_str().ends_with("_m.jpg"));
        assert!(photo.best_url("m").unwrap().as_str().ends_with("_m.jpg"));
    }

    #[test]
    fn test_best_url_falls_back_to_largest() {
        let photo = photo_with(&["q", "c"]);
        assert!(photo.best_url("url_l").unwrap().as_str().ends_with("_c.jpg"));
        assert!(photo_with(&[]).best_url("url_l").is_none());
    }
}
