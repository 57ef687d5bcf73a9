use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Context, Error, Result};

pub const DEFAULT_FLICKR_URL: &str = "https://www.flickr.com/services/rest/";
pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com/1.1/";
pub const DEFAULT_TWITTER_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/";
const CONFIG_FILE_NAME: &str = "photobot.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub flickr: FlickrConfig,
    pub twitter: TwitterConfig,
    pub mastodon: MastodonConfig,
    pub bot: BotConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickrConfig {
    pub api_key: String,
    pub page_size: u32,
    /// Size extra used for the posted image, e.g. `url_l`.
    pub image_url_attribute: String,
    pub base_url: String,
}

impl Default for FlickrConfig {
    fn default() -> Self {
        Self {
            api_key: Default::default(),
            page_size: 100,
            image_url_attribute: "url_l".into(),
            base_url: DEFAULT_FLICKR_URL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
    pub api_url: String,
    pub upload_url: String,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            consumer_key: Default::default(),
            consumer_secret: Default::default(),
            access_token: Default::default(),
            access_secret: Default::default(),
            api_url: DEFAULT_TWITTER_API_URL.into(),
            upload_url: DEFAULT_TWITTER_UPLOAD_URL.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MastodonConfig {
    pub access_token: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    #[default]
    Twitter,
    Mastodon,
}

impl std::fmt::Display for SocialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocialKind::Twitter => write!(f, "Twitter"),
            SocialKind::Mastodon => write!(f, "Mastodon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub provider: SocialKind,
    pub sources_path: PathBuf,
    pub translations_path: PathBuf,
    /// Where the selected photo is downloaded before upload.
    pub image_path: PathBuf,
    pub retry_limit: usize,
    pub mention_count: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            provider: Default::default(),
            sources_path: "sources.yaml".into(),
            translations_path: "translations.yaml".into(),
            image_path: "image.jpg".into(),
            retry_limit: 15,
            mention_count: 100,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, or the first config file found in the usual places when
    /// no path is given. Relative data paths resolve against the config
    /// file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => find_config_file()?.ok_or_else(|| {
                Error::Config(format!("no {CONFIG_FILE_NAME} found in default locations"))
            })?,
        };
        info!("load config from: {}", path.display());
        let content = fs::read_to_string(&path).context("reading config file")?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.bot.resolve_relative_to(dir);
        }
        debug!("config loaded, provider: {}", config.bot.provider);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.flickr.api_key.is_empty() {
            return Err(Error::Config("flickr.api_key must be set".into()));
        }
        if self.flickr.page_size == 0 {
            return Err(Error::Config("flickr.page_size must be positive".into()));
        }
        if self.bot.retry_limit == 0 {
            return Err(Error::Config("bot.retry_limit must be positive".into()));
        }
        match self.bot.provider {
            SocialKind::Twitter => {
                let t = &self.twitter;
                if [
                    &t.consumer_key,
                    &t.consumer_secret,
                    &t.access_token,
                    &t.access_secret,
                ]
                .iter()
                .any(|v| v.is_empty())
                {
                    return Err(Error::Config("twitter credentials are incomplete".into()));
                }
            }
            SocialKind::Mastodon => {
                if self.mastodon.access_token.is_empty() || self.mastodon.base_url.is_empty() {
                    return Err(Error::Config(
                        "mastodon.access_token and mastodon.base_url must be set".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl BotConfig {
    fn resolve_relative_to(&mut self, dir: &Path) {
        for path in [&mut self.sources_path, &mut self.translations_path] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

fn find_config_file() -> Result<Option<PathBuf>> {
    let paths = [
        std::env::current_dir()?.join(CONFIG_FILE_NAME),
        dirs::config_local_dir()
            .unwrap_or_default()
            .join("photobot/config.toml"),
        dirs::config_dir()
            .unwrap_or_default()
            .join("photobot/config.toml"),
    ];
    Ok(paths.into_iter().find(|p| p.is_file()))
}
