use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;
use super::de::loose_bool;

/// A user profile as cached by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    /// Space separated system role names.
    pub roles: String,
    pub locale: String,
    pub timezone: UserTimezone,
    pub notify_props: UserNotifyProps,
    pub delete_at: i64,
    pub is_bot: bool,
}

/// Timezone settings. Older servers send `useAutomaticTimezone` as the
/// string `"true"`, newer ones as a boolean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserTimezone {
    #[serde(deserialize_with = "loose_bool")]
    pub use_automatic_timezone: bool,
    pub automatic_timezone: String,
    pub manual_timezone: String,
}

/// Account-level notification levels (`all`, `mention`, `none`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserNotifyProps {
    pub desktop: String,
    pub push: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsersState {
    pub current_user_id: String,
    pub profiles: Arc<IdMap<User>>,
}
