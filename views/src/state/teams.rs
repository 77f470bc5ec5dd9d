use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::groups::GroupAssociation;
use super::{IdMap, NestedIdMap};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub delete_at: i64,
    pub allow_open_invite: bool,
    /// Role scheme override; empty when the team uses the system scheme.
    #[serde(deserialize_with = "null_as_default")]
    pub scheme_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub group_constrained: bool,
}

/// Links a user to a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMembership {
    pub team_id: String,
    pub user_id: String,
    pub roles: String,
    pub mention_count: u64,
    pub msg_count: u64,
    pub delete_at: i64,
    pub scheme_admin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamsState {
    #[serde(deserialize_with = "null_as_default")]
    pub current_team_id: String,
    pub teams: Arc<IdMap<Team>>,
    /// The current user's memberships, keyed by team id.
    pub my_members: Arc<IdMap<TeamMembership>>,
    /// Other users' memberships: team id -> user id -> membership.
    pub members_in_team: Arc<NestedIdMap<TeamMembership>>,
    pub groups_associated_to_team: Arc<BTreeMap<String, GroupAssociation>>,
}
