//! Snapshot builders shared by the unit and scenario tests.

use std::sync::Arc;

use crate::state::{
    Channel, ChannelMembership, ChannelType, GlobalState, Group, Role, Team, TeamMembership,
    Thread, ThreadPost, User,
};

pub fn team(id: &str, name: &str, display_name: &str) -> Team {
    Team {
        id: id.into(),
        name: name.into(),
        display_name: display_name.into(),
        ..Default::default()
    }
}

pub fn open_team(id: &str, name: &str, display_name: &str) -> Team {
    Team {
        allow_open_invite: true,
        ..team(id, name, display_name)
    }
}

pub fn channel(id: &str, team_id: &str, display_name: &str) -> Channel {
    Channel {
        id: id.into(),
        team_id: team_id.into(),
        name: id.into(),
        display_name: display_name.into(),
        channel_type: ChannelType::Open,
        ..Default::default()
    }
}

pub fn group(id: &str, name: &str) -> Group {
    Group {
        id: id.into(),
        name: name.into(),
        display_name: name.to_uppercase(),
        allow_reference: true,
        source: "custom".into(),
        ..Default::default()
    }
}

pub fn thread(id: &str, channel_id: &str, last_reply_at: i64) -> Thread {
    Thread {
        id: id.into(),
        last_reply_at,
        is_following: true,
        post: ThreadPost {
            channel_id: channel_id.into(),
            user_id: String::new(),
        },
        ..Default::default()
    }
}

/// Incrementally builds a snapshot. Every setter copies-on-write through the
/// `Arc`s, so the builder can also derive a modified snapshot from an
/// existing one while leaving untouched slices shared.
#[derive(Default)]
pub struct Fixture {
    state: GlobalState,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: &GlobalState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub fn current_user(mut self, id: &str, roles: &str) -> Self {
        let user = User {
            id: id.into(),
            username: id.into(),
            roles: roles.into(),
            ..Default::default()
        };
        let users = Arc::make_mut(&mut self.state.entities.users);
        users.current_user_id = id.into();
        Arc::make_mut(&mut users.profiles).insert(id.into(), user);
        self
    }

    pub fn user(mut self, user: User) -> Self {
        let users = Arc::make_mut(&mut self.state.entities.users);
        Arc::make_mut(&mut users.profiles).insert(user.id.clone(), user);
        self
    }

    pub fn role(mut self, name: &str, permissions: &[&str]) -> Self {
        let role = Role {
            id: format!("{name}-id"),
            name: name.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        };
        let roles = Arc::make_mut(&mut self.state.entities.roles);
        Arc::make_mut(&mut roles.roles).insert(name.into(), role);
        self
    }

    pub fn server_version(mut self, version: &str) -> Self {
        Arc::make_mut(&mut self.state.entities.general).server_version = version.into();
        self
    }

    pub fn config(mut self, key: &str, value: &str) -> Self {
        let general = Arc::make_mut(&mut self.state.entities.general);
        Arc::make_mut(&mut general.config)
            .0
            .insert(key.into(), value.into());
        self
    }

    pub fn team(mut self, team: Team) -> Self {
        let teams = Arc::make_mut(&mut self.state.entities.teams);
        Arc::make_mut(&mut teams.teams).insert(team.id.clone(), team);
        self
    }

    pub fn current_team(mut self, team_id: &str) -> Self {
        Arc::make_mut(&mut self.state.entities.teams).current_team_id = team_id.into();
        self
    }

    pub fn my_team_member(self, team_id: &str, roles: &str) -> Self {
        self.my_team_member_with_mentions(team_id, roles, 0)
    }

    pub fn my_team_member_with_mentions(mut self, team_id: &str, roles: &str, mentions: u64) -> Self {
        let member = TeamMembership {
            team_id: team_id.into(),
            user_id: self.state.entities.users.current_user_id.clone(),
            roles: roles.into(),
            mention_count: mentions,
            ..Default::default()
        };
        let teams = Arc::make_mut(&mut self.state.entities.teams);
        Arc::make_mut(&mut teams.my_members).insert(team_id.into(), member);
        self
    }

    pub fn clear_my_team_members(mut self) -> Self {
        Arc::make_mut(&mut self.state.entities.teams).my_members = Arc::default();
        self
    }

    pub fn team_groups(mut self, team_id: &str, group_ids: &[&str]) -> Self {
        let teams = Arc::make_mut(&mut self.state.entities.teams);
        Arc::make_mut(&mut teams.groups_associated_to_team).insert(
            team_id.into(),
            crate::state::groups::GroupAssociation {
                ids: group_ids.iter().map(|id| id.to_string()).collect(),
            },
        );
        self
    }

    pub fn channel(mut self, channel: Channel) -> Self {
        let channels = Arc::make_mut(&mut self.state.entities.channels);
        Arc::make_mut(&mut channels.channels_in_team)
            .entry(channel.team_id.clone())
            .or_default()
            .insert(channel.id.clone());
        Arc::make_mut(&mut channels.channels).insert(channel.id.clone(), channel);
        self
    }

    pub fn current_channel(mut self, channel_id: &str) -> Self {
        Arc::make_mut(&mut self.state.entities.channels).current_channel_id = channel_id.into();
        self
    }

    pub fn my_channel_member(self, channel_id: &str, roles: &str) -> Self {
        let member = ChannelMembership {
            channel_id: channel_id.into(),
            user_id: self.state.entities.users.current_user_id.clone(),
            roles: roles.into(),
            ..Default::default()
        };
        self.my_channel_membership(member)
    }

    pub fn my_channel_membership(mut self, member: ChannelMembership) -> Self {
        let channels = Arc::make_mut(&mut self.state.entities.channels);
        Arc::make_mut(&mut channels.my_members).insert(member.channel_id.clone(), member);
        self
    }

    pub fn channel_groups(mut self, channel_id: &str, group_ids: &[&str]) -> Self {
        let channels = Arc::make_mut(&mut self.state.entities.channels);
        Arc::make_mut(&mut channels.groups_associated_to_channel).insert(
            channel_id.into(),
            crate::state::groups::GroupAssociation {
                ids: group_ids.iter().map(|id| id.to_string()).collect(),
            },
        );
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        let groups = Arc::make_mut(&mut self.state.entities.groups);
        Arc::make_mut(&mut groups.groups).insert(group.id.clone(), group);
        self
    }

    pub fn my_group(mut self, group_id: &str) -> Self {
        let groups = Arc::make_mut(&mut self.state.entities.groups);
        Arc::make_mut(&mut groups.my_groups).push(group_id.into());
        self
    }

    pub fn thread(mut self, team_id: &str, thread: Thread) -> Self {
        let threads = Arc::make_mut(&mut self.state.entities.threads);
        Arc::make_mut(&mut threads.threads_in_team)
            .entry(team_id.into())
            .or_default()
            .push(thread.id.clone());
        Arc::make_mut(&mut threads.threads).insert(thread.id.clone(), thread);
        self
    }

    pub fn preference(mut self, category: &str, name: &str, value: &str) -> Self {
        let prefs = Arc::make_mut(&mut self.state.entities.preferences);
        Arc::make_mut(&mut prefs.my_preferences).insert(
            crate::state::preferences::preference_key(category, name),
            crate::state::Preference {
                user_id: self.state.entities.users.current_user_id.clone(),
                category: category.into(),
                name: name.into(),
                value: value.into(),
            },
        );
        self
    }

    pub fn build(self) -> GlobalState {
        self.state
    }
}
