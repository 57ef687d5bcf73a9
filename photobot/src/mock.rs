pub mod media_downloader;
pub mod provider;
pub mod random;
pub mod social;

use std::collections::BTreeMap;
use std::path::Path;

use url::Url;

pub use media_downloader::MockDownloader;
pub use provider::MockPhotoProvider;
pub use random::SequenceRandom;
pub use social::{MockSocial, Posted};

use crate::catalog::{AlbumId, Source, SourceConfig};
use crate::models::{Photo, UserInfo};
use crate::translations::TranslationTable;

/// The translation table shipped in `config/`.
pub fn shipped_table() -> TranslationTable {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/translations.yaml");
    TranslationTable::load(&path).unwrap()
}

pub fn user_info(id: &str, username: &str, realname: Option<&str>) -> UserInfo {
    UserInfo {
        id: id.into(),
        username: username.into(),
        realname: realname.map(str::to_string),
        photo_count: 0,
    }
}

/// A source with a twitter handle and the given albums.
pub fn source(flickr_id: &str, albums: &[&str]) -> Source {
    let config = SourceConfig {
        flickr_id: flickr_id.into(),
        albums: albums.iter().map(|a| AlbumId::Text(a.to_string())).collect(),
        twitter_id: Some(format!("@user_{}", flickr_id.replace('@', "_"))),
        mastodon_id: None,
        disabled: false,
    };
    Source::new(config, user_info(flickr_id, flickr_id, None))
}

pub fn photo(id: &str, owner: &str, title: &str) -> Photo {
    let mut urls = BTreeMap::new();
    urls.insert(
        "l".to_string(),
        Url::parse(&format!("https://live.staticflickr.com/65535/{id}_b.jpg")).unwrap(),
    );
    Photo {
        id: id.into(),
        owner: Some(owner.into()),
        title: title.into(),
        urls,
    }
}
