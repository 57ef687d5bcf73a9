use log::error;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Photo;

const BASE58_ALPHABET: &[u8] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

pub const PHOTO_PAGE_URL: &str = "https://www.flickr.com/photos";
pub const SHORT_URL: &str = "https://flic.kr/p";

pub static HTML_TAG_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>")
        .map_err(|e| error!("Regex init failed: {e}"))
        .unwrap()
});
pub static LINE_BREAK_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p>")
        .map_err(|e| error!("Regex init failed: {e}"))
        .unwrap()
});

/// Flickr's base58 flavour, as used by `flic.kr` short links. Zero encodes to
/// an empty string.
pub fn encode_base58(mut num: u64) -> String {
    let base = BASE58_ALPHABET.len() as u64;
    let mut encoded = Vec::new();
    while num > 0 {
        encoded.push(BASE58_ALPHABET[(num % base) as usize]);
        num /= base;
    }
    encoded.reverse();
    // alphabet is ASCII
    String::from_utf8(encoded).unwrap_or_default()
}

pub fn make_image_link(photo: &Photo) -> String {
    let owner = photo.owner.as_deref().unwrap_or_default();
    format!("{PHOTO_PAGE_URL}/{owner}/{}", photo.id)
}

/// Falls back to the full photo page link when the id is not numeric.
pub fn make_shortened_link(photo: &Photo) -> String {
    match photo.id.parse::<u64>() {
        Ok(id) => format!("{SHORT_URL}/{}", encode_base58(id)),
        Err(_) => make_image_link(photo),
    }
}

/// Reduces Mastodon status HTML to plain text.
pub fn html_to_text(html: &str) -> String {
    let text = LINE_BREAK_EXPR.replace_all(html, "\n");
    let text = HTML_TAG_EXPR.replace_all(&text, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

pub fn to_ascii(text: &str) -> String {
    deunicode::deunicode(text)
}
