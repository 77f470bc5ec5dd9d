use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;

/// Typing indicators: `channel_id + post_id` -> user id -> last keystroke
/// timestamp (ms). Root-level typing uses an empty post id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypingState(pub Arc<BTreeMap<String, BTreeMap<String, i64>>>);

/// Key under which typing for a channel/thread is stored.
pub fn typing_key(channel_id: &str, post_id: &str) -> String {
    format!("{channel_id}{post_id}")
}

/// Reporting window for insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7_day")]
    SevenDays,
    #[serde(rename = "28_day")]
    TwentyEightDays,
}

impl TimeFrame {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "today" => Some(Self::Today),
            "7_day" => Some(Self::SevenDays),
            "28_day" => Some(Self::TwentyEightDays),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopReaction {
    pub emoji_name: String,
    pub count: u64,
}

/// Team id -> window -> emoji name -> reaction tally.
pub type ReactionsByTeam = BTreeMap<String, BTreeMap<TimeFrame, IdMap<TopReaction>>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsightsState {
    pub top_reactions: Arc<ReactionsByTeam>,
    pub my_top_reactions: Arc<ReactionsByTeam>,
}
