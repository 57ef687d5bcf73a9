pub mod builder;
pub mod catalog;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod flickr;
pub mod media_downloader;
pub mod models;
pub mod random;
pub mod search_term;
pub mod social;
pub mod translations;
pub mod utils;

#[cfg(test)]
pub mod mock;

pub use builder::BotBuilder;
pub use core::{Bot, DefaultBot};
pub use error::{Error, Result};
