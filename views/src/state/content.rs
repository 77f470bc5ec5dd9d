use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bot {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub owner_id: String,
    pub delete_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotsState {
    /// Keyed by the bot's user id.
    pub accounts: Arc<IdMap<Bot>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub id: String,
    pub post_id: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub create_at: i64,
    pub delete_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilesState {
    pub files: Arc<IdMap<FileInfo>>,
    pub file_ids_by_post_id: Arc<BTreeMap<String, Vec<String>>>,
    /// Last public link fetched for a file, if any.
    pub file_public_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomEmoji {
    pub id: String,
    pub name: String,
    pub creator_id: String,
    pub create_at: i64,
    pub delete_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmojisState {
    pub custom_emoji: Arc<IdMap<CustomEmoji>>,
    /// Names the server confirmed do not exist.
    pub non_existent_emoji: Arc<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub status: String,
    pub create_at: i64,
    pub progress: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsState {
    pub jobs: Arc<IdMap<Job>>,
}
