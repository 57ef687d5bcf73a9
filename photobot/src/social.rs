#![allow(async_fn_in_trait)]
pub mod mastodon;
pub mod twitter;

use std::path::Path;

use reqwest::Client;

use crate::catalog::Source;
use crate::config::{Config, SocialKind};
use crate::error::Result;
use crate::models::Mention;

pub use mastodon::MastodonClient;
pub use twitter::TwitterClient;

/// The network the bot posts to and reads mentions from.
pub trait SocialProvider: Send + Sync {
    fn kind(&self) -> SocialKind;

    async fn verify_credentials(&self) -> Result<bool>;

    /// Mentions newer than `since_id`, as the network orders them.
    async fn get_mentions(&self, since_id: Option<u64>, count: u32) -> Result<Vec<Mention>>;

    async fn post_text(
        &self,
        text: &str,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()>;

    async fn post_image(
        &self,
        title: &str,
        source: &Source,
        link: &str,
        image_path: &Path,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()>;
}

/// Prefixes `text` with a greeting to `user` when replying.
pub fn compose_reply(text: &str, reply_to_user: Option<&str>) -> String {
    match reply_to_user {
        Some(user) => format!("Hi, @{}\n\n{text}", user.trim_start_matches('@')),
        None => text.to_string(),
    }
}

/// Status text for a posted photo, e.g.
/// `Jupiter - From Kevin M. Gill (@kevinmgill) - https://flic.kr/p/7jZD`.
pub fn compose_image_text(title: &str, source: &Source, kind: SocialKind, link: &str) -> String {
    let name = source.display_name();
    match source.social_handle(kind) {
        Some(handle) => format!("{title} - From {name} ({handle}) - {link}"),
        None => format!("{title} - From {name} - {link}"),
    }
}

/// Configured network client, picked by `bot.provider`.
#[derive(Debug, Clone)]
pub enum SocialClient {
    Twitter(TwitterClient),
    Mastodon(MastodonClient),
}

impl SocialClient {
    pub fn from_config(http: Client, config: &Config) -> Result<Self> {
        Ok(match config.bot.provider {
            SocialKind::Twitter => Self::Twitter(TwitterClient::new(http, &config.twitter)?),
            SocialKind::Mastodon => Self::Mastodon(MastodonClient::new(http, &config.mastodon)?),
        })
    }
}

impl SocialProvider for SocialClient {
    fn kind(&self) -> SocialKind {
        match self {
            Self::Twitter(c) => c.kind(),
            Self::Mastodon(c) => c.kind(),
        }
    }

    async fn verify_credentials(&self) -> Result<bool> {
        match self {
            Self::Twitter(c) => c.verify_credentials().await,
            Self::Mastodon(c) => c.verify_credentials().await,
        }
    }

    async fn get_mentions(&self, since_id: Option<u64>, count: u32) -> Result<Vec<Mention>> {
        match self {
            Self::Twitter(c) => c.get_mentions(since_id, count).await,
            Self::Mastodon(c) => c.get_mentions(since_id, count).await,
        }
    }

    async fn post_text(
        &self,
        text: &str,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()> {
        match self {
            Self::Twitter(c) => c.post_text(text, reply_to_user, reply_to_id).await,
            Self::Mastodon(c) => c.post_text(text, reply_to_user, reply_to_id).await,
        }
    }

    async fn post_image(
        &self,
        title: &str,
        source: &Source,
        link: &str,
        image_path: &Path,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()> {
        match self {
            Self::Twitter(c) => {
                c.post_image(title, source, link, image_path, reply_to_user, reply_to_id)
                    .await
            }
            Self::Mastodon(c) => {
                c.post_image(title, source, link, image_path, reply_to_user, reply_to_id)
                    .await
            }
        }
    }
}
