use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::state::{
    Channel, ChannelMembership, GlobalState, IdMap, RelationOneToMany, is_deleted,
};
use crate::views::Views;

/// `mark_unread` value that mutes a channel.
pub const MARK_UNREAD_MENTION: &str = "mention";

pub fn get_all_channels(state: &GlobalState) -> &Arc<IdMap<Channel>> {
    &state.entities.channels.channels
}

pub fn get_channel<'a>(state: &'a GlobalState, channel_id: &str) -> Option<&'a Channel> {
    get_all_channels(state).get(channel_id)
}

pub fn get_current_channel_id(state: &GlobalState) -> &str {
    &state.entities.channels.current_channel_id
}

pub fn get_current_channel(state: &GlobalState) -> Option<&Channel> {
    get_channel(state, get_current_channel_id(state))
}

/// The current user's channel memberships, keyed by channel id.
pub fn get_my_channel_memberships(state: &GlobalState) -> &Arc<IdMap<ChannelMembership>> {
    &state.entities.channels.my_members
}

pub fn get_my_channel_member<'a>(
    state: &'a GlobalState,
    channel_id: &str,
) -> Option<&'a ChannelMembership> {
    get_my_channel_memberships(state).get(channel_id)
}

pub fn get_channels_in_team<'a>(state: &'a GlobalState, team_id: &str) -> Option<&'a BTreeSet<String>> {
    state.entities.channels.channels_in_team.get(team_id)
}

pub fn is_muted(member: &ChannelMembership) -> bool {
    member.notify_props.mark_unread == MARK_UNREAD_MENTION
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnreadCounts {
    pub messages: u64,
    pub mentions: u64,
}

impl std::ops::AddAssign for UnreadCounts {
    fn add_assign(&mut self, other: Self) {
        self.messages += other.messages;
        self.mentions += other.mentions;
    }
}

fn unread_for(channel: &Channel, member: &ChannelMembership) -> UnreadCounts {
    UnreadCounts {
        messages: channel.total_msg_count.saturating_sub(member.msg_count),
        mentions: member.mention_count,
    }
}

/// Unread messages and mentions in a channel I belong to; zero otherwise.
pub fn channel_unread_counts(state: &GlobalState, channel_id: &str) -> UnreadCounts {
    match (
        get_channel(state, channel_id),
        get_my_channel_member(state, channel_id),
    ) {
        (Some(channel), Some(member)) => unread_for(channel, member),
        _ => UnreadCounts::default(),
    }
}

/// Sum over my live channels in a team. Muted channels contribute mentions
/// but not messages.
pub fn team_unread_totals(state: &GlobalState, team_id: &str) -> UnreadCounts {
    let mut totals = UnreadCounts::default();
    let Some(ids) = get_channels_in_team(state, team_id) else {
        return totals;
    };

    for id in ids {
        let (Some(channel), Some(member)) = (get_channel(state, id), get_my_channel_member(state, id))
        else {
            continue;
        };
        if is_deleted(channel.delete_at) {
            continue;
        }
        let mut counts = unread_for(channel, member);
        if is_muted(member) {
            counts.messages = 0;
        }
        totals += counts;
    }
    totals
}

pub(crate) type ChannelsInTeamKey = (
    Arc<IdMap<Channel>>,
    Arc<RelationOneToMany>,
    Arc<IdMap<ChannelMembership>>,
);

impl Views {
    /// Live channels in `team_id` the current user is a member of.
    pub fn my_channels_in_team(&self, state: &GlobalState, team_id: &str) -> Arc<Vec<Channel>> {
        let channels = &state.entities.channels;
        let key: ChannelsInTeamKey = (
            Arc::clone(&channels.channels),
            Arc::clone(&channels.channels_in_team),
            Arc::clone(&channels.my_members),
        );
        self.my_channels_in_team
            .get(&team_id.to_string(), key, |(all, in_team, members)| {
                in_team
                    .get(team_id)
                    .into_iter()
                    .flatten()
                    .filter(|id| members.contains_key(*id))
                    .filter_map(|id| all.get(id))
                    .filter(|c| !is_deleted(c.delete_at))
                    .cloned()
                    .collect()
            })
    }
}
