use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;

/// A user group, synced from LDAP or created in-app (`custom`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub allow_reference: bool,
    pub delete_at: i64,
    pub source: String,
    pub member_count: u64,
}

impl Group {
    /// Mentionable: referencing allowed and not soft-deleted.
    pub fn is_referenceable(&self) -> bool {
        self.allow_reference && self.delete_at == 0
    }
}

/// Ordered group ids associated with a team or channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupAssociation {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupsState {
    pub groups: Arc<IdMap<Group>>,
    /// Ids of the groups the current user belongs to.
    pub my_groups: Arc<Vec<String>>,
}
