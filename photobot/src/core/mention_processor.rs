use log::{debug, error, info};

use super::health;
use super::publisher::Publisher;
use super::selector::ImageSelector;
use crate::error::{Error, Result};
use crate::flickr::PhotoProvider;
use crate::media_downloader::MediaDownloader;
use crate::models::Mention;
use crate::search_term;
use crate::social::SocialProvider;
use crate::translations::TranslationTable;

pub const STATUS_CHECK: &str = "status check";
pub const THANKS: &str = "fantastic, thank you";
pub const NOT_FOUND_TEXT: &str =
    "Sorry, I couldn't find an image for that. Maybe try asking for something else?";
pub const THANKS_TEXT: &str = "You're welcome! Glad you enjoyed it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionAction {
    ImageReply,
    NotFoundReply,
    StatusReply,
    ThanksReply,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub notification_id: u64,
    pub action: MentionAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub notification_id: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Highest notification id seen, never below the previous checkpoint.
    pub checkpoint: u64,
    pub dispatched: Vec<Dispatch>,
    pub failures: Vec<Failure>,
}

/// Answers one batch of mentions.
pub struct MentionProcessor<'a, P, S, D> {
    selector: ImageSelector<'a, P>,
    publisher: Publisher<'a, S, D>,
    translations: &'a TranslationTable,
}

impl<'a, P, S, D> MentionProcessor<'a, P, S, D>
where
    P: PhotoProvider,
    S: SocialProvider,
    D: MediaDownloader,
{
    pub fn new(
        selector: ImageSelector<'a, P>,
        publisher: Publisher<'a, S, D>,
        translations: &'a TranslationTable,
    ) -> Self {
        Self {
            selector,
            publisher,
            translations,
        }
    }

    /// Handles mentions in feed order. Mentions at or below `checkpoint`
    /// are skipped. A failing action is recorded and the batch goes on;
    /// only a missing translation aborts it.
    pub async fn process(&self, mentions: &[Mention], checkpoint: u64) -> Result<BatchReport> {
        let mut report = BatchReport {
            checkpoint,
            ..Default::default()
        };
        for mention in mentions {
            report.checkpoint = report.checkpoint.max(mention.notification_id);
            if mention.notification_id <= checkpoint {
                debug!("mention {} already handled", mention.notification_id);
                continue;
            }
            self.handle(mention, &mut report).await?;
        }
        info!(
            "{} actions dispatched, {} failed, checkpoint now {}",
            report.dispatched.len(),
            report.failures.len(),
            report.checkpoint
        );
        Ok(report)
    }

    /// Runs every rule the mention matches. Each action succeeds or fails on
    /// its own; only a missing translation is returned as an error.
    async fn handle(&self, mention: &Mention, report: &mut BatchReport) -> Result<()> {
        let normalized = search_term::normalize(&mention.text);
        let mut matched = false;

        if search_term::is_request(self.translations, &mention.text)? {
            matched = true;
            let result = self.answer_request(mention).await;
            record(report, mention, result)?;
        }
        if normalized.contains(&search_term::normalize(STATUS_CHECK)) {
            matched = true;
            let result = self.answer_status_check(mention).await;
            record(report, mention, result)?;
        }
        if normalized.contains(&search_term::normalize(THANKS)) {
            matched = true;
            let result = self
                .publisher
                .reply_text(THANKS_TEXT, mention)
                .await
                .map(|()| MentionAction::ThanksReply);
            record(report, mention, result)?;
        }

        if !matched {
            debug!("ignoring mention {}", mention.notification_id);
            report.dispatched.push(Dispatch {
                notification_id: mention.notification_id,
                action: MentionAction::Ignored,
            });
        }
        Ok(())
    }

    async fn answer_status_check(&self, mention: &Mention) -> Result<MentionAction> {
        let report = health::check(
            self.selector.provider(),
            self.publisher.social(),
            self.selector.catalog(),
        )
        .await;
        self.publisher
            .reply_text(&report.to_string(), mention)
            .await?;
        Ok(MentionAction::StatusReply)
    }

    async fn answer_request(&self, mention: &Mention) -> Result<MentionAction> {
        let term = search_term::extract(&mention.text, self.translations)?;
        info!(
            "image request from {} for {:?}",
            mention.user,
            term.as_deref().unwrap_or("anything")
        );
        let retry_limit = self.publisher.settings().retry_limit;
        let selected = self.selector.select(term.as_deref(), retry_limit).await;
        let result = match selected {
            Ok(selection) => {
                let link = self
                    .selector
                    .provider()
                    .make_shortened_link(&selection.photo);
                self.publisher
                    .publish(&selection, &link, Some(mention))
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Ok(MentionAction::ImageReply),
            Err(e) if e.is_not_found() => {
                info!("nothing found for mention {}: {e}", mention.notification_id);
                self.publisher.reply_text(NOT_FOUND_TEXT, mention).await?;
                Ok(MentionAction::NotFoundReply)
            }
            Err(e) => Err(e),
        }
    }
}

fn record(
    report: &mut BatchReport,
    mention: &Mention,
    result: Result<MentionAction>,
) -> Result<()> {
    match result {
        Ok(action) => report.dispatched.push(Dispatch {
            notification_id: mention.notification_id,
            action,
        }),
        Err(e @ Error::TranslationMissing(_)) => return Err(e),
        Err(e) => {
            error!("failed to answer mention {}: {e}", mention.notification_id);
            report.failures.push(Failure {
                notification_id: mention.notification_id,
                message: e.to_string(),
            });
        }
    }
    Ok(())
}
