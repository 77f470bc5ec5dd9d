use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;

/// A collapsed-reply thread the user has interacted with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thread {
    pub id: String,
    pub reply_count: u64,
    pub last_reply_at: i64,
    pub last_viewed_at: i64,
    pub is_following: bool,
    pub unread_replies: u64,
    pub unread_mentions: u64,
    pub post: ThreadPost,
}

impl Thread {
    pub fn is_unread(&self) -> bool {
        self.unread_replies > 0 || self.unread_mentions > 0
    }
}

/// The root post a thread hangs off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadPost {
    pub channel_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadCounts {
    pub total: u64,
    pub total_unread_threads: u64,
    pub total_unread_mentions: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreadsState {
    pub threads: Arc<IdMap<Thread>>,
    /// Team id -> thread ids indexed under that team.
    pub threads_in_team: Arc<BTreeMap<String, Vec<String>>>,
    pub counts: Arc<IdMap<ThreadCounts>>,
}
