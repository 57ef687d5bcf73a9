use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Context, Error, Result};

/// Politeness marker; its presence makes a mention a photo request.
pub const PLEASE: &str = "please";
/// Marker that precedes the search phrase ("an image *of* saturn").
pub const OF: &str = "of";

const REQUIRED_CONCEPTS: [&str; 2] = [PLEASE, OF];

/// Base concept to its surface forms across languages, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    concepts: HashMap<String, Vec<String>>,
}

impl TranslationTable {
    pub fn new(concepts: HashMap<String, Vec<String>>) -> Result<Self> {
        let table = Self { concepts };
        for concept in REQUIRED_CONCEPTS {
            table.forms(concept)?;
        }
        Ok(table)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let concepts: HashMap<String, Vec<String>> = serde_yaml::from_str(content)?;
        debug!("parsed {} translation concepts", concepts.len());
        Self::new(concepts)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("loading translations from {}", path.display());
        let content = fs::read_to_string(path).context("reading translations file")?;
        Self::from_yaml_str(&content)
    }

    pub fn forms(&self, concept: &str) -> Result<&[String]> {
        self.concepts
            .get(concept)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::TranslationMissing(concept.to_string()))
    }
}
