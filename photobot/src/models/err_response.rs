use serde::Deserialize;

/// Body of a Flickr answer with `stat` set to `fail`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl From<ErrResponse> for crate::error::Error {
    fn from(value: ErrResponse) -> Self {
        crate::error::Error::provider(value.code, value.message)
    }
}
