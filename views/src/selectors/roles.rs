//! Effective permissions of the current user.
//!
//! Scopes are layered: a team's set contains the system set, a channel's set
//! contains its team's set, a group's set contains the system set. Each scope
//! adds the permissions of the roles the user holds at that scope. Role names
//! without a matching role record add nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::selectors::{channels, teams, users};
use crate::state::{GlobalState, IdMap, Role, is_deleted, split_roles};
use crate::views::Views;

pub type PermissionSet = BTreeSet<String>;

/// Scope id (team, channel or group) -> role names held there.
pub type RolesByScope = BTreeMap<String, BTreeSet<String>>;

pub const SYSTEM_USER_ROLE: &str = "system_user";
pub const TEAM_ADMIN_ROLE: &str = "team_admin";
pub const TEAM_USER_ROLE: &str = "team_user";
pub const CHANNEL_ADMIN_ROLE: &str = "channel_admin";
pub const CHANNEL_USER_ROLE: &str = "channel_user";

/// Held implicitly in every group the user belongs to.
pub const CUSTOM_GROUP_USER_ROLE: &str = "custom_group_user";

pub mod permissions {
    pub const JOIN_PUBLIC_TEAMS: &str = "join_public_teams";
    pub const JOIN_PRIVATE_TEAMS: &str = "join_private_teams";
    pub const LIST_PUBLIC_TEAMS: &str = "list_public_teams";
    pub const LIST_PRIVATE_TEAMS: &str = "list_private_teams";
    pub const MANAGE_SYSTEM: &str = "manage_system";
    pub const CREATE_POST: &str = "create_post";
    pub const MANAGE_PUBLIC_CHANNEL_MEMBERS: &str = "manage_public_channel_members";
    pub const MANAGE_PRIVATE_CHANNEL_MEMBERS: &str = "manage_private_channel_members";
    pub const EDIT_CUSTOM_GROUP: &str = "edit_custom_group";
}

pub fn get_roles(state: &GlobalState) -> &Arc<IdMap<Role>> {
    &state.entities.roles.roles
}

/// Roles are stored under their name, so this is the by-name index.
pub fn get_roles_by_name(state: &GlobalState) -> &Arc<IdMap<Role>> {
    get_roles(state)
}

pub fn get_role<'a>(state: &'a GlobalState, name: &str) -> Option<&'a Role> {
    get_roles_by_name(state).get(name)
}

fn add_role_permissions<'a>(
    role_names: impl IntoIterator<Item = &'a String>,
    roles: &IdMap<Role>,
    into: &mut PermissionSet,
) {
    for name in role_names {
        if let Some(role) = roles.get(name) {
            into.extend(role.permissions.iter().cloned());
        }
    }
}

/// `base` plus the permissions of the roles held at `scope_id`.
fn layer(
    base: &PermissionSet,
    roles_by_scope: &RolesByScope,
    scope_id: &str,
    roles: &IdMap<Role>,
) -> PermissionSet {
    let mut permissions = base.clone();
    if let Some(names) = roles_by_scope.get(scope_id) {
        add_role_permissions(names, roles, &mut permissions);
    }
    permissions
}

impl Views {
    /// Role names from the current user's profile.
    pub fn my_system_roles(&self, state: &GlobalState) -> Arc<BTreeSet<String>> {
        let key = (
            Arc::clone(users::get_users(state)),
            users::get_current_user_id(state).to_string(),
        );
        self.my_system_roles.get_ids(key, |(profiles, current)| {
            profiles
                .get(current)
                .map(|u| split_roles(&u.roles))
                .unwrap_or_default()
        })
    }

    pub fn my_team_roles(&self, state: &GlobalState) -> Arc<RolesByScope> {
        let key = Arc::clone(teams::get_team_memberships(state));
        self.my_team_roles.get(key, |members| {
            members
                .iter()
                .filter(|(_, m)| !m.roles.is_empty() && !is_deleted(m.delete_at))
                .map(|(team_id, m)| (team_id.clone(), split_roles(&m.roles)))
                .collect()
        })
    }

    pub fn my_channel_roles(&self, state: &GlobalState) -> Arc<RolesByScope> {
        let key = Arc::clone(channels::get_my_channel_memberships(state));
        self.my_channel_roles.get(key, |members| {
            members
                .iter()
                .filter(|(_, m)| !m.roles.is_empty())
                .map(|(channel_id, m)| (channel_id.clone(), split_roles(&m.roles)))
                .collect()
        })
    }

    /// Every group the user belongs to maps to the synthetic group role.
    pub fn my_group_roles(&self, state: &GlobalState) -> Arc<RolesByScope> {
        let key = Arc::clone(&state.entities.groups.my_groups);
        self.my_group_roles.get(key, |my_groups| {
            my_groups
                .iter()
                .map(|group_id| {
                    let roles = BTreeSet::from([CUSTOM_GROUP_USER_ROLE.to_string()]);
                    (group_id.clone(), roles)
                })
                .collect()
        })
    }

    pub fn my_system_permissions(&self, state: &GlobalState) -> Arc<PermissionSet> {
        let key = (self.my_system_roles(state), Arc::clone(get_roles(state)));
        self.my_system_permissions.get(key, |(system_roles, roles)| {
            let mut permissions = PermissionSet::new();
            add_role_permissions(system_roles.iter(), roles, &mut permissions);
            permissions
        })
    }

    pub fn my_team_permissions(&self, state: &GlobalState, team_id: &str) -> Arc<PermissionSet> {
        let key = (
            self.my_team_roles(state),
            Arc::clone(get_roles(state)),
            self.my_system_permissions(state),
        );
        self.my_team_permissions
            .get(&team_id.to_string(), key, |(team_roles, roles, system)| {
                layer(system, team_roles, team_id, roles)
            })
    }

    /// Channel permissions are cached per `(team, channel)` pair.
    pub fn my_channel_permissions(
        &self,
        state: &GlobalState,
        team_id: &str,
        channel_id: &str,
    ) -> Arc<PermissionSet> {
        let key = (
            self.my_channel_roles(state),
            Arc::clone(get_roles(state)),
            self.my_team_permissions(state, team_id),
        );
        let param = (team_id.to_string(), channel_id.to_string());
        self.my_channel_permissions
            .get(&param, key, |(channel_roles, roles, team)| {
                layer(team, channel_roles, channel_id, roles)
            })
    }

    pub fn my_group_permissions(&self, state: &GlobalState, group_id: &str) -> Arc<PermissionSet> {
        let key = (
            self.my_group_roles(state),
            Arc::clone(get_roles(state)),
            self.my_system_permissions(state),
        );
        self.my_group_permissions
            .get(&group_id.to_string(), key, |(group_roles, roles, system)| {
                layer(system, group_roles, group_id, roles)
            })
    }

    pub fn my_current_team_permissions(&self, state: &GlobalState) -> Arc<PermissionSet> {
        self.my_team_permissions(state, teams::get_current_team_id(state))
    }

    pub fn my_current_channel_permissions(&self, state: &GlobalState) -> Arc<PermissionSet> {
        self.my_channel_permissions(
            state,
            teams::get_current_team_id(state),
            channels::get_current_channel_id(state),
        )
    }

    pub fn have_i_system_permission(&self, state: &GlobalState, permission: &str) -> bool {
        self.my_system_permissions(state).contains(permission)
    }

    pub fn have_i_team_permission(&self, state: &GlobalState, team_id: &str, permission: &str) -> bool {
        self.my_team_permissions(state, team_id).contains(permission)
    }

    pub fn have_i_channel_permission(
        &self,
        state: &GlobalState,
        team_id: &str,
        channel_id: &str,
        permission: &str,
    ) -> bool {
        self.my_channel_permissions(state, team_id, channel_id)
            .contains(permission)
    }

    pub fn have_i_group_permission(&self, state: &GlobalState, group_id: &str, permission: &str) -> bool {
        self.my_group_permissions(state, group_id).contains(permission)
    }

    pub fn have_i_current_team_permission(&self, state: &GlobalState, permission: &str) -> bool {
        self.my_current_team_permissions(state).contains(permission)
    }

    pub fn have_i_current_channel_permission(&self, state: &GlobalState, permission: &str) -> bool {
        self.my_current_channel_permissions(state)
            .contains(permission)
    }
}
