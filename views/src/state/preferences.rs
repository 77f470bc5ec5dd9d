use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;
use super::de::skip_null_entries;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preference {
    pub user_id: String,
    pub category: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferencesState {
    /// Keyed by [`preference_key`].
    #[serde(deserialize_with = "skip_null_entries")]
    pub my_preferences: Arc<IdMap<Preference>>,
}

/// Storage key for a preference: `category--name`.
pub fn preference_key(category: &str, name: &str) -> String {
    format!("{category}--{name}")
}
