//! User groups and their association with group-constrained teams and
//! channels.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::selectors::{channels, teams};
use crate::state::{GlobalState, Group, IdMap};
use crate::views::Views;

pub fn get_all_groups(state: &GlobalState) -> &Arc<IdMap<Group>> {
    &state.entities.groups.groups
}

pub fn get_group<'a>(state: &'a GlobalState, group_id: &str) -> Option<&'a Group> {
    get_all_groups(state).get(group_id)
}

fn team_group_ids<'a>(state: &'a GlobalState, team_id: &str) -> &'a [String] {
    state
        .entities
        .teams
        .groups_associated_to_team
        .get(team_id)
        .map(|a| a.ids.as_slice())
        .unwrap_or_default()
}

fn channel_group_ids<'a>(state: &'a GlobalState, channel_id: &str) -> &'a [String] {
    state
        .entities
        .channels
        .groups_associated_to_channel
        .get(channel_id)
        .map(|a| a.ids.as_slice())
        .unwrap_or_default()
}

fn resolve<'a>(state: &'a GlobalState, ids: &[String]) -> Vec<&'a Group> {
    let all = get_all_groups(state);
    ids.iter().filter_map(|id| all.get(id)).collect()
}

fn not_in<'a>(state: &'a GlobalState, ids: &[String]) -> Vec<&'a Group> {
    let associated: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
    get_all_groups(state)
        .values()
        .filter(|g| !associated.contains(g.id.as_str()))
        .collect()
}

fn referenceable(groups: Vec<&Group>) -> Vec<&Group> {
    groups.into_iter().filter(|g| g.is_referenceable()).collect()
}

/// Groups in the team's association list, in list order. Ids with no group
/// record are skipped.
pub fn groups_associated_to_team<'a>(state: &'a GlobalState, team_id: &str) -> Vec<&'a Group> {
    resolve(state, team_group_ids(state, team_id))
}

pub fn groups_associated_to_channel<'a>(state: &'a GlobalState, channel_id: &str) -> Vec<&'a Group> {
    resolve(state, channel_group_ids(state, channel_id))
}

pub fn groups_not_associated_to_team<'a>(state: &'a GlobalState, team_id: &str) -> Vec<&'a Group> {
    not_in(state, team_group_ids(state, team_id))
}

pub fn groups_not_associated_to_channel<'a>(
    state: &'a GlobalState,
    channel_id: &str,
) -> Vec<&'a Group> {
    not_in(state, channel_group_ids(state, channel_id))
}

pub fn groups_associated_to_team_for_reference<'a>(
    state: &'a GlobalState,
    team_id: &str,
) -> Vec<&'a Group> {
    referenceable(groups_associated_to_team(state, team_id))
}

pub fn groups_associated_to_channel_for_reference<'a>(
    state: &'a GlobalState,
    channel_id: &str,
) -> Vec<&'a Group> {
    referenceable(groups_associated_to_channel(state, channel_id))
}

/// Groups the current user belongs to.
pub fn my_groups(state: &GlobalState) -> Vec<&Group> {
    resolve(state, &state.entities.groups.my_groups)
}

fn matches_prefix(group: &Group, prefix: &str) -> bool {
    let prefix = prefix.to_lowercase();
    group.name.to_lowercase().starts_with(&prefix)
        || group.display_name.to_lowercase().starts_with(&prefix)
}

impl Views {
    /// Every group that may be mentioned anywhere, in id order.
    pub fn all_associated_groups_for_reference(&self, state: &GlobalState) -> Arc<Vec<Group>> {
        self.all_groups_for_reference
            .get(Arc::clone(get_all_groups(state)), |groups| {
                groups
                    .values()
                    .filter(|g| g.is_referenceable())
                    .cloned()
                    .collect()
            })
    }

    /// Groups that may be mentioned in a channel.
    ///
    /// When both the team and the channel are group constrained the channel's
    /// groups come first, followed by the team's groups not already listed.
    /// When only one side is constrained its groups are used. Otherwise every
    /// referenceable group qualifies.
    pub fn associated_groups_for_reference(
        &self,
        state: &GlobalState,
        team_id: &str,
        channel_id: &str,
    ) -> Vec<Group> {
        let team_constrained = teams::get_team(state, team_id).is_some_and(|t| t.group_constrained);
        let channel_constrained =
            channels::get_channel(state, channel_id).is_some_and(|c| c.group_constrained);

        let picked = match (team_constrained, channel_constrained) {
            (true, true) => {
                let mut union = groups_associated_to_channel_for_reference(state, channel_id);
                let seen: BTreeSet<String> = union.iter().map(|g| g.id.clone()).collect();
                union.extend(
                    groups_associated_to_team_for_reference(state, team_id)
                        .into_iter()
                        .filter(|g| !seen.contains(&g.id)),
                );
                union
            }
            (true, false) => groups_associated_to_team_for_reference(state, team_id),
            (false, true) => groups_associated_to_channel_for_reference(state, channel_id),
            (false, false) => return self.all_associated_groups_for_reference(state).to_vec(),
        };
        picked.into_iter().cloned().collect()
    }

    /// Referenceable groups for the channel whose name or display name starts
    /// with `prefix`, ignoring case.
    pub fn search_associated_groups_for_reference(
        &self,
        state: &GlobalState,
        prefix: &str,
        team_id: &str,
        channel_id: &str,
    ) -> Vec<Group> {
        self.associated_groups_for_reference(state, team_id, channel_id)
            .into_iter()
            .filter(|g| matches_prefix(g, prefix))
            .collect()
    }
}
