//! Teams, the user's memberships, and which other teams they may see or join.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::selectors::general::{self, is_compatible_with_join_view_team_permissions};
use crate::selectors::roles::{PermissionSet, TEAM_ADMIN_ROLE, permissions};
use crate::sort::by_display_name;
use crate::state::{GlobalState, IdMap, Team, TeamMembership, is_deleted, split_roles};
use crate::views::Views;

pub fn get_current_team_id(state: &GlobalState) -> &str {
    &state.entities.teams.current_team_id
}

pub fn get_teams(state: &GlobalState) -> &Arc<IdMap<Team>> {
    &state.entities.teams.teams
}

pub fn get_team<'a>(state: &'a GlobalState, team_id: &str) -> Option<&'a Team> {
    get_teams(state).get(team_id)
}

pub fn get_team_by_name<'a>(state: &'a GlobalState, name: &str) -> Option<&'a Team> {
    get_teams(state).values().find(|t| t.name == name)
}

pub fn get_current_team(state: &GlobalState) -> Option<&Team> {
    get_team(state, get_current_team_id(state))
}

/// The current user's memberships, keyed by team id.
pub fn get_team_memberships(state: &GlobalState) -> &Arc<IdMap<TeamMembership>> {
    &state.entities.teams.my_members
}

pub fn get_my_team_member<'a>(state: &'a GlobalState, team_id: &str) -> Option<&'a TeamMembership> {
    get_team_memberships(state).get(team_id)
}

pub fn get_current_team_membership(state: &GlobalState) -> Option<&TeamMembership> {
    get_my_team_member(state, get_current_team_id(state))
}

pub fn get_members_in_current_team(state: &GlobalState) -> Option<&IdMap<TeamMembership>> {
    state
        .entities
        .teams
        .members_in_team
        .get(get_current_team_id(state))
}

pub fn get_team_member<'a>(
    state: &'a GlobalState,
    team_id: &str,
    user_id: &str,
) -> Option<&'a TeamMembership> {
    state
        .entities
        .teams
        .members_in_team
        .get(team_id)
        .and_then(|members| members.get(user_id))
}

pub fn is_current_user_current_team_admin(state: &GlobalState) -> bool {
    get_current_team_membership(state).is_some_and(|m| split_roles(&m.roles).contains(TEAM_ADMIN_ROLE))
}

/// Mentions across my teams other than the one on screen. Memberships of
/// deleted teams still count.
pub fn channel_drawer_badge_count(state: &GlobalState) -> u64 {
    let current = get_current_team_id(state);
    get_team_memberships(state)
        .values()
        .filter(|m| m.team_id != current)
        .map(|m| m.mention_count)
        .sum()
}

pub fn badge_count_for_team(state: &GlobalState, team_id: &str) -> u64 {
    get_my_team_member(state, team_id).map_or(0, |m| m.mention_count)
}

pub fn current_relative_team_url(state: &GlobalState) -> String {
    match get_current_team(state) {
        Some(team) => format!("/{}", team.name),
        None => "/".to_string(),
    }
}

pub fn current_team_url(state: &GlobalState) -> String {
    let base = general::get_current_url(state);
    match get_current_team(state) {
        Some(team) => format!("{base}/{}", team.name),
        None => base.to_string(),
    }
}

/// Which pair of permissions opens a team to a non-member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Join,
    List,
}

impl Access {
    fn permission(self, open_invite: bool) -> &'static str {
        match (self, open_invite) {
            (Access::Join, true) => permissions::JOIN_PUBLIC_TEAMS,
            (Access::Join, false) => permissions::JOIN_PRIVATE_TEAMS,
            (Access::List, true) => permissions::LIST_PUBLIC_TEAMS,
            (Access::List, false) => permissions::LIST_PRIVATE_TEAMS,
        }
    }
}

/// Live teams the user is not a member of and may reach. Older servers only
/// honour `allow_open_invite`.
fn reachable_team_ids(
    access: Access,
    teams: &IdMap<Team>,
    my_members: &IdMap<TeamMembership>,
    system_permissions: &PermissionSet,
    use_permissions: bool,
) -> Vec<String> {
    teams
        .values()
        .filter(|team| !is_deleted(team.delete_at) && !my_members.contains_key(&team.id))
        .filter(|team| {
            if use_permissions {
                system_permissions.contains(access.permission(team.allow_open_invite))
            } else {
                team.allow_open_invite
            }
        })
        .map(|team| team.id.clone())
        .collect()
}

fn resolve(ids: &[String], teams: &IdMap<Team>) -> Vec<Team> {
    ids.iter().filter_map(|id| teams.get(id)).cloned().collect()
}

fn team_order(a: &Team, b: &Team) -> Ordering {
    by_display_name(&a.display_name, &a.name, &b.display_name, &b.name)
}

fn sorted(mut teams: Vec<Team>) -> Vec<Team> {
    teams.sort_by(team_order);
    teams
}

pub(crate) type ReachableKey = (
    Arc<IdMap<Team>>,
    Arc<IdMap<TeamMembership>>,
    Arc<PermissionSet>,
    bool,
);

impl Views {
    pub fn teams_list(&self, state: &GlobalState) -> Arc<Vec<Team>> {
        self.teams_list
            .get(Arc::clone(get_teams(state)), |teams| teams.values().cloned().collect())
    }

    /// Live teams the current user has a membership in.
    pub fn my_teams(&self, state: &GlobalState) -> Arc<Vec<Team>> {
        let key = (
            Arc::clone(get_teams(state)),
            Arc::clone(get_team_memberships(state)),
        );
        self.my_teams.get(key, |(teams, members)| {
            teams
                .values()
                .filter(|t| members.contains_key(&t.id) && !is_deleted(t.delete_at))
                .cloned()
                .collect()
        })
    }

    pub fn my_teams_count(&self, state: &GlobalState) -> usize {
        self.my_teams(state).len()
    }

    /// Ids of my teams, ordered by display name. Unchanged while the
    /// ordering is unchanged.
    pub fn my_sorted_team_ids(&self, state: &GlobalState) -> Arc<Vec<String>> {
        let my_teams = self.my_teams(state);
        self.my_sorted_team_ids.get_ids(my_teams, |teams| {
            let mut refs: Vec<&Team> = teams.iter().collect();
            refs.sort_by(|a, b| team_order(a, b));
            refs.into_iter().map(|t| t.id.clone()).collect()
        })
    }

    fn reachable_key(&self, state: &GlobalState) -> ReachableKey {
        (
            Arc::clone(get_teams(state)),
            Arc::clone(get_team_memberships(state)),
            self.my_system_permissions(state),
            is_compatible_with_join_view_team_permissions(state),
        )
    }

    pub fn joinable_team_ids(&self, state: &GlobalState) -> Arc<Vec<String>> {
        let key = self.reachable_key(state);
        self.joinable_team_ids
            .get_ids(key, |(teams, members, perms, use_permissions)| {
                reachable_team_ids(Access::Join, teams, members, perms, *use_permissions)
            })
    }

    pub fn joinable_teams(&self, state: &GlobalState) -> Arc<Vec<Team>> {
        let key = (self.joinable_team_ids(state), Arc::clone(get_teams(state)));
        self.joinable_teams.get(key, |(ids, teams)| resolve(ids, teams))
    }

    pub fn sorted_joinable_teams(&self, state: &GlobalState) -> Arc<Vec<Team>> {
        let joinable = self.joinable_teams(state);
        self.sorted_joinable_teams
            .get(joinable, |teams| sorted(teams.to_vec()))
    }

    pub fn listable_team_ids(&self, state: &GlobalState) -> Arc<Vec<String>> {
        let key = self.reachable_key(state);
        self.listable_team_ids
            .get_ids(key, |(teams, members, perms, use_permissions)| {
                reachable_team_ids(Access::List, teams, members, perms, *use_permissions)
            })
    }

    pub fn listable_teams(&self, state: &GlobalState) -> Arc<Vec<Team>> {
        let key = (self.listable_team_ids(state), Arc::clone(get_teams(state)));
        self.listable_teams.get(key, |(ids, teams)| resolve(ids, teams))
    }

    pub fn sorted_listable_teams(&self, state: &GlobalState) -> Arc<Vec<Team>> {
        let listable = self.listable_teams(state);
        self.sorted_listable_teams
            .get(listable, |teams| sorted(teams.to_vec()))
    }
}
