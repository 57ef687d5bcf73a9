use std::fmt;
use std::fs;
use std::path::Path;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SocialKind;
use crate::error::{Context, Error, Result};
use crate::flickr::PeopleApi;
use crate::models::UserInfo;
use crate::random::RandomSource;
use crate::utils;

/// Album ids are large integers and usually written unquoted in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AlbumId {
    Number(u64),
    Text(String),
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlbumId::Number(n) => write!(f, "{n}"),
            AlbumId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One entry of the sources file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub flickr_id: String,
    #[serde(default)]
    pub albums: Vec<AlbumId>,
    #[serde(default)]
    pub twitter_id: Option<String>,
    #[serde(default)]
    pub mastodon_id: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

pub fn parse_source_configs(content: &str) -> Result<Vec<SourceConfig>> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn load_source_configs(path: &Path) -> Result<Vec<SourceConfig>> {
    info!("loading photo sources from {}", path.display());
    let content = fs::read_to_string(path).context("reading sources file")?;
    parse_source_configs(&content)
}

/// A configured Flickr account together with its account details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub config: SourceConfig,
    pub user_info: UserInfo,
}

impl Source {
    pub fn new(config: SourceConfig, user_info: UserInfo) -> Self {
        Self { config, user_info }
    }

    pub fn flickr_id(&self) -> &str {
        &self.config.flickr_id
    }

    /// Real name when the account has one, else the username, in ASCII.
    pub fn display_name(&self) -> String {
        let name = self
            .user_info
            .realname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.user_info.username);
        utils::to_ascii(name)
    }

    pub fn has_albums(&self) -> bool {
        !self.config.albums.is_empty()
    }

    pub fn album_ids(&self) -> Vec<String> {
        self.config.albums.iter().map(ToString::to_string).collect()
    }

    pub fn social_handle(&self, kind: SocialKind) -> Option<&str> {
        let handle = match kind {
            SocialKind::Twitter => self.config.twitter_id.as_deref(),
            SocialKind::Mastodon => self.config.mastodon_id.as_deref(),
        };
        handle.filter(|h| !h.is_empty())
    }
}

/// The set of sources a run selects from. Fixed once loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sources: Vec<Source>,
    skipped: Vec<String>,
}

impl Catalog {
    /// Fetches account details for every enabled source. A source Flickr
    /// refuses is skipped; the catalog fails only when nothing is left.
    pub async fn load<P: PeopleApi>(provider: &P, configs: Vec<SourceConfig>) -> Result<Self> {
        let mut sources = Vec::new();
        let mut skipped = Vec::new();
        for config in configs {
            if config.disabled {
                info!("source {} is disabled", config.flickr_id);
                continue;
            }
            match provider.get_user_info(&config.flickr_id).await {
                Ok(user_info) => sources.push(Source::new(config, user_info)),
                Err(err @ Error::Provider { .. }) => {
                    warn!("skipping source {}: {err}", config.flickr_id);
                    skipped.push(config.flickr_id);
                }
                Err(err) => {
                    error!("failed to load source {}: {err}", config.flickr_id);
                    return Err(err);
                }
            }
        }
        if sources.is_empty() {
            return Err(Error::Config("no photo source could be loaded".into()));
        }
        info!(
            "catalog loaded with {} sources, {} skipped",
            sources.len(),
            skipped.len()
        );
        Ok(Self { sources, skipped })
    }

    pub fn from_sources(sources: Vec<Source>) -> Self {
        Self {
            sources,
            skipped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Flickr ids of enabled sources that failed to load.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn pick(&self, random: &dyn RandomSource) -> Result<&Source> {
        if self.sources.is_empty() {
            return Err(Error::Config("catalog is empty".into()));
        }
        let index = random.uniform(0, self.sources.len() - 1);
        self.sources
            .get(index)
            .ok_or_else(|| Error::InvalidArgument(format!("source index {index} out of range")))
    }
}
