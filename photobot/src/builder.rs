use std::path::PathBuf;

use log::{error, info};
use reqwest::Client;

use crate::catalog::{Catalog, load_source_configs};
use crate::config::Config;
use crate::core::{Bot, DefaultBot};
use crate::error::{Error, Result};
use crate::flickr::{EchoApi, FlickrClient};
use crate::media_downloader::HttpDownloader;
use crate::random::{RandomSource, ThreadRandom};
use crate::social::{SocialClient, SocialProvider};
use crate::translations::TranslationTable;

const USER_AGENT: &str = concat!("photobot/", env!("CARGO_PKG_VERSION"));

/// Assembles a [`DefaultBot`] from configuration. Credentials are checked
/// before anything else is loaded unless the check is turned off.
pub struct BotBuilder {
    config_path: Option<PathBuf>,
    config: Option<Config>,
    random: Option<Box<dyn RandomSource>>,
    check_credentials: bool,
}

impl BotBuilder {
    pub fn new() -> Self {
        Self {
            config_path: None,
            config: None,
            random: None,
            check_credentials: true,
        }
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Uses an already loaded config instead of reading one.
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    /// The health check reports bad credentials instead of failing on them.
    pub fn check_credentials(mut self, check: bool) -> Self {
        self.check_credentials = check;
        self
    }

    pub async fn build(self) -> Result<DefaultBot> {
        info!("BotBuilder: Building bot...");
        let config = match self.config {
            Some(config) => config,
            None => Config::load(self.config_path.as_deref())?,
        };

        let http = Client::builder().user_agent(USER_AGENT).build()?;
        info!("HTTP client created");

        let provider = FlickrClient::new(http.clone(), &config.flickr)?;
        let social = SocialClient::from_config(http.clone(), &config)?;
        info!("clients for Flickr and {} created", config.bot.provider);

        if self.check_credentials {
            if !provider.verify_credentials().await? {
                error!("Flickr rejected the api key");
                return Err(Error::Config("flickr credentials were rejected".into()));
            }
            if !social.verify_credentials().await? {
                error!("{} rejected the credentials", config.bot.provider);
                return Err(Error::Config(format!(
                    "{} credentials were rejected",
                    config.bot.provider
                )));
            }
            info!("credentials verified");
        }

        let translations = TranslationTable::load(&config.bot.translations_path)?;
        let sources = load_source_configs(&config.bot.sources_path)?;
        let catalog = Catalog::load(&provider, sources).await?;
        info!("Catalog initialized");

        let random = self.random.unwrap_or_else(|| Box::new(ThreadRandom));
        let bot = Bot::new(
            config,
            provider,
            social,
            HttpDownloader::new(http),
            catalog,
            translations,
            random,
        );
        info!("Bot built successfully.");
        Ok(bot)
    }
}

impl Default for BotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
