//! Pulls a photo search phrase out of a free-text mention.
//!
//! The phrase is whatever run of word characters and spaces follows the
//! first matching translation of "of", minus a leading English article and
//! a trailing politeness word.

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::translations::{OF, PLEASE, TranslationTable};

/// Letters whose emphatic repetition ("pleeease") is collapsed.
const COLLAPSED_LETTERS: [char; 5] = ['p', 'l', 'e', 'a', 's'];
const ARTICLES: [&str; 3] = ["an ", "a ", "the "];

/// Lower-cases and collapses runs of each of p, l, e, a, s to one letter.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.to_lowercase().chars() {
        if COLLAPSED_LETTERS.contains(&c) && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Whether the normalized text contains the normalized phrase.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    normalize(text).contains(&normalize(phrase))
}

/// Whether any surface form of `concept` occurs anywhere in the text.
pub fn matches_concept(table: &TranslationTable, text: &str, concept: &str) -> Result<bool> {
    let text = normalize(text);
    Ok(table
        .forms(concept)?
        .iter()
        .any(|form| text.contains(&normalize(form))))
}

/// A mention is a photo request when it says "please" in any known language.
pub fn is_request(table: &TranslationTable, text: &str) -> Result<bool> {
    matches_concept(table, text, PLEASE)
}

/// Returns `None` when the text has no "of" context to search with, which
/// means the caller should pick a random photo instead.
pub fn extract(text: &str, table: &TranslationTable) -> Result<Option<String>> {
    let text = text.to_lowercase();
    let Some(captured) = capture_after_marker(&text, table.forms(OF)?)? else {
        return Ok(None);
    };

    let mut phrase = captured.trim();
    if phrase.is_empty() {
        return Ok(None);
    }
    if let Some(rest) = ARTICLES
        .iter()
        .find_map(|article| phrase.strip_prefix(*article))
    {
        phrase = rest;
    }
    for form in table.forms(PLEASE)? {
        if let Some(rest) = phrase.strip_suffix(form.as_str())
            && let Some(rest) = rest.strip_suffix(' ')
        {
            phrase = rest;
        }
    }

    let phrase = phrase.trim();
    debug!("extracted search phrase {phrase:?}");
    Ok((!phrase.is_empty()).then(|| phrase.to_string()))
}

fn capture_after_marker<'t>(text: &'t str, markers: &[String]) -> Result<Option<&'t str>> {
    for marker in markers {
        let expr = Regex::new(&format!(r" {} ([\w ]*)", regex::escape(marker)))
            .map_err(|e| Error::Config(format!("bad translation {marker:?}: {e}")))?;
        if let Some(found) = expr.captures(text).and_then(|caps| caps.get(1)) {
            return Ok(Some(found.as_str()));
        }
    }
    Ok(None)
}
