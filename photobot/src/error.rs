use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}: {1}")]
    Context(String, Box<Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Url parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The upstream API answered, but not with success.
    #[error("Provider error ({code}): {message}")]
    Provider { code: i64, message: String },

    #[error("No photos found: {0}")]
    NoPhotosFound(String),

    #[error("No albums found: {0}")]
    NoAlbumsFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Translation concept missing: {0}")]
    TranslationMissing(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    pub fn provider(code: i64, message: impl Into<String>) -> Self {
        Error::Provider {
            code,
            message: message.into(),
        }
    }

    /// Data absence that a caller may retry with another pick.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NoPhotosFound(_) | Error::NoAlbumsFound(_) => true,
            Error::Context(_, inner) => inner.is_not_found(),
            _ => false,
        }
    }
}

pub trait Context<T, E> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e.into())))
    }
}
