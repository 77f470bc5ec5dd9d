use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::groups::GroupAssociation;
use super::{IdMap, NestedIdMap, RelationOneToMany};

/// Channel visibility kind, wire-encoded as a single letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    #[default]
    #[serde(rename = "O")]
    Open,
    #[serde(rename = "P")]
    Private,
    #[serde(rename = "D")]
    Direct,
    #[serde(rename = "G")]
    Group,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    /// Empty for direct and group messages.
    pub team_id: String,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub delete_at: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub scheme_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub group_constrained: bool,
    pub total_msg_count: u64,
    pub last_post_at: i64,
}

/// Per-channel notification overrides. `default` defers to the user's
/// account settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelNotifyProps {
    pub desktop: String,
    pub push: String,
    pub mark_unread: String,
}

impl Default for ChannelNotifyProps {
    fn default() -> Self {
        Self {
            desktop: "default".into(),
            push: "default".into(),
            mark_unread: "all".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMembership {
    pub channel_id: String,
    pub user_id: String,
    pub roles: String,
    pub mention_count: u64,
    /// Messages seen by the user; unread = channel total - this.
    pub msg_count: u64,
    pub notify_props: ChannelNotifyProps,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelsState {
    pub current_channel_id: String,
    pub channels: Arc<IdMap<Channel>>,
    /// Team id -> channel ids. Direct and group channels sit under `""`.
    pub channels_in_team: Arc<RelationOneToMany>,
    /// The current user's memberships, keyed by channel id.
    pub my_members: Arc<IdMap<ChannelMembership>>,
    pub members_in_channel: Arc<NestedIdMap<ChannelMembership>>,
    pub groups_associated_to_channel: Arc<BTreeMap<String, GroupAssociation>>,
}
