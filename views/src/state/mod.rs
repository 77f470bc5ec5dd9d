//! The read-only state tree every view reads from.
//!
//! Each entity kind lives behind its own `Arc`, and the collections inside a
//! kind are `Arc`s too. Replacing one slice of a snapshot leaves every other
//! slice pointer-equal, which is what the memo layer keys on.

pub mod activity;
pub mod channels;
pub mod client_config;
pub mod content;
pub mod de;
pub mod general;
pub mod groups;
pub mod preferences;
pub mod roles;
pub mod teams;
pub mod threads;
pub mod users;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use activity::{InsightsState, TimeFrame, TopReaction, TypingState};
pub use channels::{Channel, ChannelMembership, ChannelNotifyProps, ChannelType, ChannelsState};
pub use client_config::{ClientConfig, Flag, License};
pub use content::{Bot, BotsState, CustomEmoji, EmojisState, FileInfo, FilesState, Job, JobsState};
pub use general::{Credentials, GeneralState};
pub use groups::{Group, GroupsState};
pub use preferences::{Preference, PreferencesState};
pub use roles::{Role, RolesState, Scheme, SchemeScope, SchemesState};
pub use teams::{Team, TeamMembership, TeamsState};
pub use threads::{Thread, ThreadCounts, ThreadPost, ThreadsState};
pub use users::{User, UserNotifyProps, UserTimezone, UsersState};

/// Records keyed by their id. Iteration follows id order.
pub type IdMap<T> = BTreeMap<String, T>;

/// One id to many ids (e.g. team id -> channel ids).
pub type RelationOneToMany = BTreeMap<String, BTreeSet<String>>;

/// Id to record maps nested one level (e.g. team id -> user id -> membership).
pub type NestedIdMap<T> = BTreeMap<String, IdMap<T>>;

/// Root of a state snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalState {
    pub entities: Entities,
}

/// All entity slices. Cloning is cheap: every field is an `Arc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entities {
    pub general: Arc<GeneralState>,
    pub users: Arc<UsersState>,
    pub teams: Arc<TeamsState>,
    pub channels: Arc<ChannelsState>,
    pub roles: Arc<RolesState>,
    pub schemes: Arc<SchemesState>,
    pub groups: Arc<GroupsState>,
    pub threads: Arc<ThreadsState>,
    pub preferences: Arc<PreferencesState>,
    pub bots: Arc<BotsState>,
    pub files: Arc<FilesState>,
    pub emojis: Arc<EmojisState>,
    pub jobs: Arc<JobsState>,
    pub typing: Arc<TypingState>,
    pub insights: Arc<InsightsState>,
}

/// Soft-delete marker shared by teams, channels and groups.
pub fn is_deleted(delete_at: i64) -> bool {
    delete_at != 0
}

/// Split a space separated roles string, dropping empty entries.
pub fn split_roles(roles: &str) -> BTreeSet<String> {
    roles
        .split(' ')
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_roles_drops_empty_entries() {
        let roles = split_roles("system_user  system_admin ");
        assert_eq!(roles.len(), 2);
        assert!(roles.contains("system_user"));
        assert!(roles.contains("system_admin"));
        assert!(split_roles("").is_empty());
    }

    #[test]
    fn test_empty_snapshot_deserializes() {
        let state: GlobalState = serde_json::from_str("{}").unwrap();
        assert!(state.entities.teams.teams.is_empty());
        assert!(state.entities.users.current_user_id.is_empty());

        let state: GlobalState = serde_json::from_str(r#"{"entities": {"teams": {}}}"#).unwrap();
        assert!(state.entities.teams.my_members.is_empty());
    }

    #[test]
    fn test_clone_shares_slices() {
        let state = GlobalState::default();
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.entities.teams, &copy.entities.teams));
    }
}
