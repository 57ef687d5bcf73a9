pub mod oauth;

use std::path::Path;

use log::{debug, error, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{SocialProvider, compose_image_text, compose_reply};
use crate::catalog::Source;
use crate::config::{SocialKind, TwitterConfig};
use crate::error::{Context, Error, Result};
use crate::models::Mention;

use oauth::{OAuthCredentials, generate_nonce};

#[derive(Debug, Clone, Deserialize)]
struct TweetUser {
    screen_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TweetInternal {
    id: u64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    full_text: Option<String>,
    user: TweetUser,
}

impl From<TweetInternal> for Mention {
    fn from(value: TweetInternal) -> Self {
        Mention {
            status_id: value.id,
            notification_id: value.id,
            text: value.full_text.unwrap_or(value.text),
            user: value.user.screen_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusResponse {
    id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TwitterErrors {
    #[serde(default)]
    errors: Vec<TwitterError>,
}

#[derive(Debug, Clone, Deserialize)]
struct TwitterError {
    code: i64,
    message: String,
}

/// Twitter v1.1 client with OAuth 1.0a user-context signing.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    credentials: OAuthCredentials,
    api_url: Url,
    upload_url: Url,
}

impl TwitterClient {
    pub fn new(http: Client, config: &TwitterConfig) -> Result<Self> {
        Ok(Self {
            http,
            credentials: OAuthCredentials {
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                token: config.access_token.clone(),
                token_secret: config.access_secret.clone(),
            },
            api_url: Url::parse(&config.api_url)?,
            upload_url: Url::parse(&config.upload_url)?,
        })
    }

    /// Builds a request whose `params` are both sent and signed. Multipart
    /// uploads pass no params: their body is not part of the signature.
    fn signed(
        &self,
        method: Method,
        url: Url,
        params: &[(String, String)],
    ) -> Result<RequestBuilder> {
        let header = self.credentials.authorization_header(
            method.as_str(),
            url.as_str(),
            params,
            &generate_nonce(),
            chrono::Utc::now().timestamp(),
        )?;
        let builder = self
            .http
            .request(method.clone(), url)
            .header(reqwest::header::AUTHORIZATION, header);
        Ok(if method == Method::GET {
            builder.query(params)
        } else if params.is_empty() {
            builder
        } else {
            builder.form(params)
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request.send().await?;
        let response = check_status(response, what).await?;
        Ok(response.json::<T>().await?)
    }

    async fn update_status(&self, params: Vec<(String, String)>) -> Result<()> {
        let url = self.api_url.join("statuses/update.json")?;
        let request = self.signed(Method::POST, url, &params)?;
        let status: StatusResponse = self.send(request, "statuses/update").await?;
        info!("posted tweet {}", status.id);
        Ok(())
    }

    async fn upload_media(&self, image_path: &Path) -> Result<String> {
        let data = tokio::fs::read(image_path)
            .await
            .context("reading image to upload")?;
        debug!("uploading {} bytes from {}", data.len(), image_path.display());
        let part = Part::bytes(data)
            .file_name("image.jpg")
            .mime_str("image/jpeg")?;
        let form = Form::new().part("media", part);
        let url = self.upload_url.join("media/upload.json")?;
        let request = self.signed(Method::POST, url, &[])?.multipart(form);
        let uploaded: MediaUploadResponse = self.send(request, "media/upload").await?;
        info!("uploaded media {}", uploaded.media_id_string);
        Ok(uploaded.media_id_string)
    }
}

async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!("{what} failed with HTTP {status}: {body}");
    let parsed = serde_json::from_str::<TwitterErrors>(&body).unwrap_or_default();
    Err(match parsed.errors.into_iter().next() {
        Some(e) => Error::provider(e.code, e.message),
        None => Error::provider(status.as_u16() as i64, format!("{what} failed: {body}")),
    })
}

fn reply_params(status: String, reply_to_id: Option<u64>) -> Vec<(String, String)> {
    let mut params = vec![("status".to_string(), status)];
    if let Some(id) = reply_to_id {
        params.push(("in_reply_to_status_id".to_string(), id.to_string()));
    }
    params
}

impl SocialProvider for TwitterClient {
    fn kind(&self) -> SocialKind {
        SocialKind::Twitter
    }

    async fn verify_credentials(&self) -> Result<bool> {
        let url = self.api_url.join("account/verify_credentials.json")?;
        let response = self.signed(Method::GET, url, &[])?.send().await?;
        let ok = response.status().is_success();
        if !ok {
            warn!("twitter credentials rejected: HTTP {}", response.status());
        }
        Ok(ok)
    }

    async fn get_mentions(&self, since_id: Option<u64>, count: u32) -> Result<Vec<Mention>> {
        let mut params = vec![("count".to_string(), count.to_string())];
        if let Some(id) = since_id.filter(|id| *id > 0) {
            params.push(("since_id".to_string(), id.to_string()));
        }
        info!("fetching mentions since {since_id:?}");
        let url = self.api_url.join("statuses/mentions_timeline.json")?;
        let request = self.signed(Method::GET, url, &params)?;
        let tweets: Vec<TweetInternal> = self.send(request, "statuses/mentions_timeline").await?;
        debug!("got {} mentions", tweets.len());
        Ok(tweets.into_iter().map(Mention::from).collect())
    }

    async fn post_text(
        &self,
        text: &str,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()> {
        let status = compose_reply(text, reply_to_user);
        self.update_status(reply_params(status, reply_to_id)).await
    }

    async fn post_image(
        &self,
        title: &str,
        source: &Source,
        link: &str,
        image_path: &Path,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()> {
        let text = compose_image_text(title, source, self.kind(), link);
        let status = compose_reply(&text, reply_to_user);
        let media_id = self.upload_media(image_path).await?;
        let mut params = reply_params(status, reply_to_id);
        params.push(("media_ids".to_string(), media_id));
        self.update_status(params).await
    }
}
