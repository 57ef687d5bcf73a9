use serde::{Deserialize, Serialize};

/// A notification that references the bot account, reduced to the fields
/// both social networks can provide.
///
/// `notification_id` grows strictly along a feed and is what the checkpoint
/// tracks. `status_id` is the post a reply must be attached to; on Twitter
/// both are the tweet id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mention {
    pub status_id: u64,
    pub notification_id: u64,
    pub text: String,
    pub user: String,
}
