use std::path::PathBuf;

use log::info;

use super::selector::Selection;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::media_downloader::MediaDownloader;
use crate::models::Mention;
use crate::social::SocialProvider;

/// Settings shared by every post of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSettings {
    pub image_path: PathBuf,
    pub image_url_attribute: String,
    pub retry_limit: usize,
}

impl From<&Config> for PostSettings {
    fn from(config: &Config) -> Self {
        Self {
            image_path: config.bot.image_path.clone(),
            image_url_attribute: config.flickr.image_url_attribute.clone(),
            retry_limit: config.bot.retry_limit,
        }
    }
}

/// Downloads a selected photo and posts it, optionally as a reply.
pub struct Publisher<'a, S, D> {
    social: &'a S,
    downloader: &'a D,
    settings: &'a PostSettings,
}

impl<'a, S: SocialProvider, D: MediaDownloader> Publisher<'a, S, D> {
    pub fn new(social: &'a S, downloader: &'a D, settings: &'a PostSettings) -> Self {
        Self {
            social,
            downloader,
            settings,
        }
    }

    pub fn social(&self) -> &'a S {
        self.social
    }

    pub fn settings(&self) -> &'a PostSettings {
        self.settings
    }

    pub async fn publish(
        &self,
        selection: &Selection,
        link: &str,
        reply_to: Option<&Mention>,
    ) -> Result<()> {
        let photo = &selection.photo;
        let url = photo
            .best_url(&self.settings.image_url_attribute)
            .ok_or_else(|| {
                Error::NoPhotosFound(format!("photo {} has no downloadable size", photo.id))
            })?;
        info!("selected image '{}' at {url}", photo.title);
        self.downloader
            .download(url, &self.settings.image_path)
            .await?;
        self.social
            .post_image(
                &photo.title,
                &selection.source,
                link,
                &self.settings.image_path,
                reply_to.map(|m| m.user.as_str()),
                reply_to.map(|m| m.status_id),
            )
            .await
    }

    pub async fn reply_text(&self, text: &str, mention: &Mention) -> Result<()> {
        self.social
            .post_text(text, Some(&mention.user), Some(mention.status_id))
            .await
    }
}

#[cfg(test)]
mod local_tests {
    use super::*;
    use crate::mock::{MockDownloader, MockSocial, Posted, photo, source};

    fn settings() -> PostSettings {
        PostSettings {
            image_path: PathBuf::from("/tmp/photobot-test.jpg"),
            image_url_attribute: "url_l".into(),
            retry_limit: 15,
        }
    }

    #[tokio::test]
    async fn test_publish_downloads_then_posts() {
        let social = MockSocial::new();
        let downloader = MockDownloader::new();
        let settings = settings();
        let publisher = Publisher::new(&social, &downloader, &settings);
        let selection = Selection {
            source: source("1@N01", &[]),
            photo: photo("1234567", "1@N01", "Jupiter"),
        };

        publisher
            .publish(&selection, "https://flic.kr/p/7jZD", None)
            .await
            .unwrap();

        let downloads = downloader.downloads();
        assert_eq!(downloads.len(), 1);
        assert_eq!(
            downloads[0].0.as_str(),
            "https://live.staticflickr.com/65535/1234567_b.jpg"
        );
        assert_eq!(
            social.posted(),
            [Posted::Image {
                title: "Jupiter".into(),
                flickr_id: "1@N01".into(),
                link: "https://flic.kr/p/7jZD".into(),
                image_path: settings.image_path.clone(),
                reply_to_user: None,
                reply_to_id: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_download_posts_nothing() {
        let social = MockSocial::new();
        let downloader = MockDownloader::new();
        downloader.fail_on("https://live.staticflickr.com/65535/1_b.jpg");
        let settings = settings();
        let publisher = Publisher::new(&social, &downloader, &settings);
        let selection = Selection {
            source: source("1@N01", &[]),
            photo: photo("1", "1@N01", "Io"),
        };

        let err = publisher.publish(&selection, "link", None).await.unwrap_err();
        assert!(matches!(err, Error::Provider { code: 404, .. }));
        assert!(social.posted().is_empty());
    }

    #[tokio::test]
    async fn test_photo_without_sizes() {
        let social = MockSocial::new();
        let downloader = MockDownloader::new();
        let settings = settings();
        let publisher = Publisher::new(&social, &downloader, &settings);
        let mut bare = photo("1", "1@N01", "Io");
        bare.urls.clear();
        let selection = Selection {
            source: source("1@N01", &[]),
            photo: bare,
        };

        let err = publisher.publish(&selection, "link", None).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(downloader.downloads().is_empty());
    }
}
