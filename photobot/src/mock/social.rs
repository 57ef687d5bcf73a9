//! Test mock for the social network
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::{
    catalog::Source,
    config::SocialKind,
    error::{Error, Result},
    models::Mention,
    social::SocialProvider,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Posted {
    Text {
        text: String,
        reply_to_user: Option<String>,
        reply_to_id: Option<u64>,
    },
    Image {
        title: String,
        flickr_id: String,
        link: String,
        image_path: PathBuf,
        reply_to_user: Option<String>,
        reply_to_id: Option<u64>,
    },
}

impl Posted {
    pub fn reply_to_id(&self) -> Option<u64> {
        match self {
            Posted::Text { reply_to_id, .. } | Posted::Image { reply_to_id, .. } => *reply_to_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockSocial {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    mentions: Vec<Mention>,
    mentions_unavailable: bool,
    credentials_rejected: bool,
    failing_replies: HashSet<u64>,
    mention_requests: Vec<(Option<u64>, u32)>,
    posted: Vec<Posted>,
}

impl MockSocial {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_mentions(self, mentions: Vec<Mention>) -> Self {
        self.inner.lock().unwrap().mentions = mentions;
        self
    }

    pub fn with_mentions_unavailable(self) -> Self {
        self.inner.lock().unwrap().mentions_unavailable = true;
        self
    }

    pub fn with_rejected_credentials(self) -> Self {
        self.inner.lock().unwrap().credentials_rejected = true;
        self
    }

    /// Any post replying to `status_id` fails with a provider error.
    pub fn fail_replies_to(self, status_id: u64) -> Self {
        self.inner.lock().unwrap().failing_replies.insert(status_id);
        self
    }

    pub fn posted(&self) -> Vec<Posted> {
        self.inner.lock().unwrap().posted.clone()
    }

    pub fn mention_requests(&self) -> Vec<(Option<u64>, u32)> {
        self.inner.lock().unwrap().mention_requests.clone()
    }

    fn push(&self, posted: Posted) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(id) = posted.reply_to_id()
            && inner.failing_replies.contains(&id)
        {
            return Err(Error::provider(187, "Status is a duplicate."));
        }
        inner.posted.push(posted);
        Ok(())
    }
}

impl SocialProvider for MockSocial {
    fn kind(&self) -> SocialKind {
        SocialKind::Twitter
    }

    async fn verify_credentials(&self) -> Result<bool> {
        Ok(!self.inner.lock().unwrap().credentials_rejected)
    }

    async fn get_mentions(&self, since_id: Option<u64>, count: u32) -> Result<Vec<Mention>> {
        let mut inner = self.inner.lock().unwrap();
        inner.mention_requests.push((since_id, count));
        if inner.mentions_unavailable {
            return Err(Error::provider(503, "Over capacity"));
        }
        Ok(inner.mentions.clone())
    }

    async fn post_text(
        &self,
        text: &str,
        reply_to_user: Option<&str>,
        reply_to_id: Option<u64>,
    ) -> Result<()> {
        self.push(Posted::Text {
            text: text.into(),
            reply_to_user: reply_to_user.map(str::to_string),
            reply_to_id,
        })
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
        self.push(Posted::Image {
            title: title.into(),
            flickr_id: source.flickr_id().into(),
            link: link.into(),
            image_path: image_path.to_path_buf(),
            reply_to_user: reply_to_user.map(str::to_string),
            reply_to_id,
        })
    }
}
