use std::path::Path;

use log::{debug, error, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_number_from_string;
use url::Url;

use super::{SocialProvider, compose_image_text, compose_reply};
use crate::catalog::Source;
use crate::config::{MastodonConfig, SocialKind};
use crate::error::{Context, Error, Result};
use crate::models::Mention;
use crate::utils;

#[derive(Debug, Clone, Deserialize)]
struct Account {
    acct: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusInternal {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: u64,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationInternal {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: u64,
    account: Account,
    #[serde(default)]
    status: Option<StatusInternal>,
}

impl NotificationInternal {
    fn into_mention(self) -> Option<Mention> {
        let status = self.status?;
        Some(Mention {
            status_id: status.id,
            notification_id: self.id,
            text: utils::html_to_text(&status.content),
            user: self.account.acct,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MediaAttachment {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusCreated {
    id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MastodonError {
    #[serde(default)]
    error: String,
}

#[derive(Debug, Clone, Serialize)]
struct NewStatus<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_reply_to_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media_ids: Vec<String>,
}

/// Mastodon REST client authenticated with an application access token.
#[derive(Debug, Clone)]
pub struct MastodonClient {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl MastodonClient {
    pub fn new(http: Client, config: &MastodonConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            access_token: config.access_token.clone(),
        })
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self
            .http
            .get(self.base_url.join(path)?)
            .bearer_auth(&self.access_token))
    }

    fn post(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self
            .http
            .post(self.base_url.join(path)?)
            .bearer_auth(&self.access_token))
    }

    async fn create_status(
        &self,
        text: &str,
        reply_to_id: Option<u64>,
        media_ids: Vec<String>,
    ) -> Result<()> {
        let body = NewStatus {
            status: text,
            in_reply_to_id: reply_to_id.map(|id| id.to_string()),
            media_ids,
        };
        let response = self.post("api/v1/statuses")?.json(&body).send().await?;
        let created: StatusCreated = check_status(response, "create status")
            .await?
            .json()
            .await?;
        info!("posted status {}", created.id);
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
        let form = Form::new().part("file", part);
        let response = self.post("api/v2/media")?.multipart(form).send().await?;
        // 202 means the attachment is still being processed; it can be
        // referenced right away.
        let media: MediaAttachment = check_status(response, "media upload")
            .await?
            .json()
            .await?;
        info!("uploaded media {}", media.id);
        Ok(media.id)
    }
}

async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!("{what} failed with HTTP {status}: {body}");
    let message = serde_json::from_str::<MastodonError>(&body)
        .map(|e| e.error)
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or(body);
    Err(Error::provider(status.as_u16() as i64, message))
}

impl SocialProvider for MastodonClient {
    fn kind(&self) -> SocialKind {
        SocialKind::Mastodon
    }

    async fn verify_credentials(&self) -> Result<bool> {
        let response = self
            .get("api/v1/accounts/verify_credentials")?
            .send()
            .await?;
        let ok = response.status().is_success();
        if !ok {
            warn!("mastodon token rejected: HTTP {}", response.status());
        }
        Ok(ok)
    }

    async fn get_mentions(&self, since_id: Option<u64>, count: u32) -> Result<Vec<Mention>> {
        let mut query = vec![
            ("types[]", "mention".to_string()),
            ("limit", count.to_string()),
        ];
        if let Some(id) = since_id.filter(|id| *id > 0) {
            query.push(("since_id", id.to_string()));
        }
        info!("fetching mention notifications since {since_id:?}");
        let response = self.get("api/v1/notifications")?.query(&query).send().await?;
        let notifications: Vec<NotificationInternal> = check_status(response, "notifications")
            .await?
            .json()
            .await?;
        debug!("got {} notifications", notifications.len());
        Ok(notifications
            .into_iter()
            .filter_map(NotificationInternal::into_mention)
            .collect())
    }

    async fn post_text(
        &self,
        text: &str,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()> {
        let status = compose_reply(text, reply_to_user);
        self.create_status(&status, reply_to_id, Vec::new()).await
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
        self.create_status(&status, reply_to_id, vec![media_id])
            .await
    }
}

#[cfg(test)]
mod local_tests {
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    use super::*;
    use crate::flickr::test_utils::get_test_data_path;
    use crate::mock::source;

    fn client_for(server: &ServerGuard) -> MastodonClient {
        let config = MastodonConfig {
            access_token: "token".into(),
            base_url: server.url(),
        };
        MastodonClient::new(Client::new(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_get_mentions() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/notifications")
            .match_header("authorization", "Bearer token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("types[]".into(), "mention".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
                Matcher::UrlEncoded("since_id".into(), "40".into()),
            ]))
            .with_status(200)
            .with_body_from_file(get_test_data_path("mastodon_notifications.json"))
            .create_async()
            .await;
        let client = client_for(&server);

        let mentions = client.get_mentions(Some(40), 100).await.unwrap();
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].notification_id, 45);
        assert_eq!(mentions[0].status_id, 109876543210987654);
        assert_eq!(mentions[0].user, "stargazer@astronomy.social");
        assert_eq!(
            mentions[0].text,
            "@HourlyPlanet can I have an image of Io & Europa please"
        );
        assert_eq!(mentions[1].notification_id, 41);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_text_reply() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/statuses")
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::Json(json!({
                "status": "Hi, @stargazer@astronomy.social\n\nYou're welcome!",
                "in_reply_to_id": "109876543210987654"
            })))
            .with_status(200)
            .with_body(r#"{"id": "109876543210999999"}"#)
            .create_async()
            .await;
        let client = client_for(&server);
        client
            .post_text(
                "You're welcome!",
                Some("stargazer@astronomy.social"),
                Some(109876543210987654),
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_image_with_pending_media() {
        let mut server = Server::new_async().await;
        let upload = server
            .mock("POST", "/api/v2/media")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".into()),
            )
            .with_status(202)
            .with_body(r#"{"id": "22348641", "type": "image", "url": null}"#)
            .create_async()
            .await;
        let status = server
            .mock("POST", "/api/v1/statuses")
            .match_body(Matcher::Json(json!({
                "status": "Io - From 1@N01 - https://flic.kr/p/7jZD",
                "media_ids": ["22348641"]
            })))
            .with_status(200)
            .with_body(r#"{"id": "109876543211000000"}"#)
            .create_async()
            .await;
        let client = client_for(&server);

        client
            .post_image(
                "Io",
                &source("1@N01", &[]),
                "https://flic.kr/p/7jZD",
                &get_test_data_path("pixel.png"),
                None,
                None,
            )
            .await
            .unwrap();
        upload.assert_async().await;
        status.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_body_becomes_provider_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/statuses")
            .with_status(422)
            .with_body(r#"{"error": "Validation failed: Text can't be blank"}"#)
            .create_async()
            .await;
        let client = client_for(&server);
        let err = client.post_text("", None, None).await.unwrap_err();
        assert!(
            matches!(err, Error::Provider { code: 422, ref message } if message.starts_with("Validation failed"))
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_verify_credentials_rejected() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/accounts/verify_credentials")
            .with_status(401)
            .with_body(r#"{"error": "The access token is invalid"}"#)
            .create_async()
            .await;
        let client = client_for(&server);
        assert!(!client.verify_credentials().await.unwrap());
        mock.assert_async().await;
    }
}
