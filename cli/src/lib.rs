use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use photobot::BotBuilder;
use photobot::checkpoint::CheckpointStore;

#[derive(Parser, Debug)]
#[command(name = "photobot")]
#[command(version, about = "Posts Flickr photos to Twitter or Mastodon")]
pub struct Cli {
    /// Config file; the usual locations are searched when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Post one random photo
    Broadcast,

    /// Answer new mentions
    Reply {
        /// File holding the id of the newest mention already answered
        #[arg(long)]
        since_id_file: Option<PathBuf>,

        /// Start after this mention id instead of the stored one
        #[arg(long)]
        since_id: Option<u64>,
    },

    /// Check credentials and the loaded sources
    Health,
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let builder = match &cli.config {
        Some(path) => BotBuilder::new().config_path(path),
        None => BotBuilder::new(),
    };

    match cli.command {
        Command::Broadcast => {
            let bot = builder.build().await.context("failed to set up the bot")?;
            let selection = bot.broadcast().await.context("broadcast failed")?;
            info!(
                "posted photo {} from {}",
                selection.photo.id,
                selection.source.display_name()
            );
        }
        Command::Reply {
            since_id_file,
            since_id,
        } => {
            let bot = builder.build().await.context("failed to set up the bot")?;
            let store = since_id_file.map(CheckpointStore::new);
            let report = bot
                .reply_to_mentions(store.as_ref(), since_id)
                .await
                .context("reply run failed")?;
            for failure in &report.failures {
                warn!(
                    "mention {} failed: {}",
                    failure.notification_id, failure.message
                );
            }
            info!(
                "{} actions dispatched, checkpoint is now {}",
                report.dispatched.len(),
                report.checkpoint
            );
        }
        Command::Health => {
            let bot = builder
                .check_credentials(false)
                .build()
                .await
                .context("failed to set up the bot")?;
            let report = bot.health_check().await;
            println!("{report}");
            if !report.is_healthy() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
