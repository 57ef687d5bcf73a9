pub mod health;
pub mod mention_processor;
pub mod publisher;
pub mod selector;

use log::{info, warn};

use crate::catalog::Catalog;
use crate::checkpoint::CheckpointStore;
use crate::config::Config;
use crate::error::Result;
use crate::flickr::{FlickrClient, PhotoProvider};
use crate::media_downloader::{HttpDownloader, MediaDownloader};
use crate::random::RandomSource;
use crate::social::{SocialClient, SocialProvider};
use crate::translations::TranslationTable;
pub use health::HealthReport;
pub use mention_processor::{BatchReport, MentionAction, MentionProcessor};
pub use publisher::{PostSettings, Publisher};
pub use selector::{ImageSelector, Selection};

pub type DefaultBot = Bot<FlickrClient, SocialClient, HttpDownloader>;

/// One configured bot. Every public method is a single batch run.
pub struct Bot<P, S, D> {
    config: Config,
    provider: P,
    social: S,
    downloader: D,
    catalog: Catalog,
    translations: TranslationTable,
    random: Box<dyn RandomSource>,
    settings: PostSettings,
}

impl<P, S, D> Bot<P, S, D>
where
    P: PhotoProvider,
    S: SocialProvider,
    D: MediaDownloader,
{
    pub fn new(
        config: Config,
        provider: P,
        social: S,
        downloader: D,
        catalog: Catalog,
        translations: TranslationTable,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let settings = PostSettings::from(&config);
        Self {
            config,
            provider,
            social,
            downloader,
            catalog,
            translations,
            random,
            settings,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn selector(&self) -> ImageSelector<'_, P> {
        ImageSelector::new(
            &self.provider,
            &self.catalog,
            self.random.as_ref(),
            self.config.flickr.page_size,
        )
    }

    fn publisher(&self) -> Publisher<'_, S, D> {
        Publisher::new(&self.social, &self.downloader, &self.settings)
    }

    /// Posts one random photo. Any failure aborts the run.
    pub async fn broadcast(&self) -> Result<Selection> {
        info!("broadcasting a random photo to {}", self.social.kind());
        let selection = self.selector().select_random().await?;
        let link = self.provider.make_shortened_link(&selection.photo);
        self.publisher().publish(&selection, &link, None).await?;
        info!("broadcast of photo {} done", selection.photo.id);
        Ok(selection)
    }

    /// Answers the mentions newer than the checkpoint. `since_id` overrides
    /// the stored value. The store is written once, after the whole batch.
    pub async fn reply_to_mentions(
        &self,
        store: Option<&CheckpointStore>,
        since_id: Option<u64>,
    ) -> Result<BatchReport> {
        let checkpoint = match (since_id, store) {
            (Some(id), _) => id,
            (None, Some(store)) => store.read()?.unwrap_or_default(),
            (None, None) => 0,
        };
        info!("replying to mentions since {checkpoint}");
        let mentions = self
            .social
            .get_mentions(
                (checkpoint > 0).then_some(checkpoint),
                self.config.bot.mention_count,
            )
            .await?;

        let processor =
            MentionProcessor::new(self.selector(), self.publisher(), &self.translations);
        let report = processor.process(&mentions, checkpoint).await?;

        if !report.failures.is_empty() {
            warn!("{} mentions could not be answered", report.failures.len());
        }
        if let Some(store) = store
            && report.checkpoint > 0
        {
            store.write(report.checkpoint)?;
        }
        Ok(report)
    }

    pub async fn health_check(&self) -> HealthReport {
        health::check(&self.provider, &self.social, &self.catalog).await
    }
}
