use serde::{Deserialize, Serialize};

/// Flickr account details, fetched once per source when the catalog loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub realname: Option<String>,
    #[serde(default)]
    pub photo_count: u64,
}
