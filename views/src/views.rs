use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::memo::{KeyedMemo, Memo};
use crate::selectors::channels::ChannelsInTeamKey;
use crate::selectors::roles::{PermissionSet, RolesByScope};
use crate::selectors::teams::ReachableKey;
use crate::selectors::threads::OrderKey;
use crate::state::{
    Bot, Channel, ChannelMembership, ClientConfig, CustomEmoji, FileInfo, Group, IdMap, Job,
    Preference, Role, Team, TeamMembership, Thread, User,
};
use crate::theme::Theme;

type ScopedPermissionsKey = (Arc<RolesByScope>, Arc<IdMap<Role>>, Arc<PermissionSet>);

/// Owner of every memoized view.
///
/// One `Views` lives as long as the snapshots it is queried with. Memoized
/// methods take the current [`GlobalState`](crate::state::GlobalState) and
/// return an `Arc`; calling one again with a snapshot whose relevant slices
/// were not replaced returns the same `Arc`.
///
/// `Views` is `Sync`: every slot is guarded, so one instance can serve
/// readers on several threads.
pub struct Views {
    // general
    pub(crate) autolinked_url_schemes: Memo<Arc<ClientConfig>, Vec<String>>,

    // users
    pub(crate) users_by_username: Memo<Arc<IdMap<User>>, BTreeMap<String, User>>,

    // roles
    pub(crate) my_system_roles: Memo<(Arc<IdMap<User>>, String), BTreeSet<String>>,
    pub(crate) my_team_roles: Memo<Arc<IdMap<TeamMembership>>, RolesByScope>,
    pub(crate) my_channel_roles: Memo<Arc<IdMap<ChannelMembership>>, RolesByScope>,
    pub(crate) my_group_roles: Memo<Arc<Vec<String>>, RolesByScope>,
    pub(crate) my_system_permissions: Memo<(Arc<BTreeSet<String>>, Arc<IdMap<Role>>), PermissionSet>,
    pub(crate) my_team_permissions: KeyedMemo<String, ScopedPermissionsKey, PermissionSet>,
    pub(crate) my_channel_permissions: KeyedMemo<(String, String), ScopedPermissionsKey, PermissionSet>,
    pub(crate) my_group_permissions: KeyedMemo<String, ScopedPermissionsKey, PermissionSet>,

    // teams
    pub(crate) teams_list: Memo<Arc<IdMap<Team>>, Vec<Team>>,
    pub(crate) my_teams: Memo<(Arc<IdMap<Team>>, Arc<IdMap<TeamMembership>>), Vec<Team>>,
    pub(crate) my_sorted_team_ids: Memo<Arc<Vec<Team>>, Vec<String>>,
    pub(crate) joinable_team_ids: Memo<ReachableKey, Vec<String>>,
    pub(crate) joinable_teams: Memo<(Arc<Vec<String>>, Arc<IdMap<Team>>), Vec<Team>>,
    pub(crate) sorted_joinable_teams: Memo<Arc<Vec<Team>>, Vec<Team>>,
    pub(crate) listable_team_ids: Memo<ReachableKey, Vec<String>>,
    pub(crate) listable_teams: Memo<(Arc<Vec<String>>, Arc<IdMap<Team>>), Vec<Team>>,
    pub(crate) sorted_listable_teams: Memo<Arc<Vec<Team>>, Vec<Team>>,

    // channels
    pub(crate) my_channels_in_team: KeyedMemo<String, ChannelsInTeamKey, Vec<Channel>>,

    // groups
    pub(crate) all_groups_for_reference: Memo<Arc<IdMap<Group>>, Vec<Group>>,

    // threads
    pub(crate) thread_order_in_team: KeyedMemo<String, OrderKey, Vec<String>>,
    pub(crate) unread_thread_order_in_team: KeyedMemo<String, OrderKey, Vec<String>>,
    pub(crate) threads_in_channel: KeyedMemo<String, Arc<IdMap<Thread>>, Vec<String>>,

    // preferences
    pub(crate) preferences_in_category: KeyedMemo<String, Arc<IdMap<Preference>>, Vec<Preference>>,
    pub(crate) theme: Memo<(Option<String>, String), Theme>,

    // content
    pub(crate) external_bot_accounts: Memo<Arc<IdMap<Bot>>, IdMap<Bot>>,
    pub(crate) files_for_post: KeyedMemo<
        String,
        (Arc<IdMap<FileInfo>>, Arc<BTreeMap<String, Vec<String>>>),
        Vec<FileInfo>,
    >,
    pub(crate) custom_emojis_by_name: Memo<Arc<IdMap<CustomEmoji>>, BTreeMap<String, CustomEmoji>>,
    pub(crate) custom_emoji_ids_sorted_by_name: Memo<Arc<IdMap<CustomEmoji>>, Vec<String>>,
    pub(crate) jobs_by_type: KeyedMemo<String, Arc<IdMap<Job>>, Vec<Job>>,
}

impl Views {
    pub fn new() -> Self {
        Self {
            autolinked_url_schemes: Memo::new("autolinked_url_schemes"),

            users_by_username: Memo::new("users_by_username"),

            my_system_roles: Memo::new("my_system_roles"),
            my_team_roles: Memo::new("my_team_roles"),
            my_channel_roles: Memo::new("my_channel_roles"),
            my_group_roles: Memo::new("my_group_roles"),
            my_system_permissions: Memo::new("my_system_permissions"),
            my_team_permissions: KeyedMemo::new("my_team_permissions"),
            my_channel_permissions: KeyedMemo::new("my_channel_permissions"),
            my_group_permissions: KeyedMemo::new("my_group_permissions"),

            teams_list: Memo::new("teams_list"),
            my_teams: Memo::new("my_teams"),
            my_sorted_team_ids: Memo::new("my_sorted_team_ids"),
            joinable_team_ids: Memo::new("joinable_team_ids"),
            joinable_teams: Memo::new("joinable_teams"),
            sorted_joinable_teams: Memo::new("sorted_joinable_teams"),
            listable_team_ids: Memo::new("listable_team_ids"),
            listable_teams: Memo::new("listable_teams"),
            sorted_listable_teams: Memo::new("sorted_listable_teams"),

            my_channels_in_team: KeyedMemo::new("my_channels_in_team"),

            all_groups_for_reference: Memo::new("all_groups_for_reference"),

            thread_order_in_team: KeyedMemo::new("thread_order_in_team"),
            unread_thread_order_in_team: KeyedMemo::new("unread_thread_order_in_team"),
            threads_in_channel: KeyedMemo::new("threads_in_channel"),

            preferences_in_category: KeyedMemo::new("preferences_in_category"),
            theme: Memo::new("theme"),

            external_bot_accounts: Memo::new("external_bot_accounts"),
            files_for_post: KeyedMemo::new("files_for_post"),
            custom_emojis_by_name: Memo::new("custom_emojis_by_name"),
            custom_emoji_ids_sorted_by_name: Memo::new("custom_emoji_ids_sorted_by_name"),
            jobs_by_type: KeyedMemo::new("jobs_by_type"),
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}
