//! Scenario tests that run several selector families against one snapshot and
//! check memoization across successive snapshots.
//!
//! Each test builds its own snapshot and its own `Views`, so caches never leak
//! between tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fixtures::{Fixture, channel, group, open_team, team, thread};
    use crate::selectors::general::DEFAULT_AUTOLINKED_URL_SCHEMES;
    use crate::selectors::roles::permissions::{
        CREATE_POST, EDIT_CUSTOM_GROUP, JOIN_PRIVATE_TEAMS, JOIN_PUBLIC_TEAMS, LIST_PUBLIC_TEAMS,
        MANAGE_PUBLIC_CHANNEL_MEMBERS,
    };
    use crate::selectors::{channels, teams};
    use crate::snapshot::parse_snapshot;
    use crate::state::{GlobalState, Team};
    use crate::views::Views;

    // ── Helpers ──────────────────────────────────────────────────

    fn ids(teams: &[Team]) -> Vec<&str> {
        teams.iter().map(|t| t.id.as_str()).collect()
    }

    /// One member team (t1) with two channels, an open team (t2), an archived
    /// open team (t3) and an invite-only team (t4).
    fn workspace() -> Fixture {
        let mut archived = open_team("t3", "old", "Old Team");
        archived.delete_at = 1_600_000_000;

        let mut core = team("t1", "core", "Core Team");
        core.group_constrained = true;
        let mut town_square = channel("c1", "t1", "Town Square");
        town_square.group_constrained = true;

        Fixture::new()
            .current_user("u1", "system_user")
            .server_version("5.10.0")
            .role("system_user", &[JOIN_PUBLIC_TEAMS, LIST_PUBLIC_TEAMS])
            .role("team_user", &[CREATE_POST])
            .role("channel_admin", &[MANAGE_PUBLIC_CHANNEL_MEMBERS])
            .role("custom_group_user", &[EDIT_CUSTOM_GROUP])
            .team(core)
            .team(open_team("t2", "market", "Marketeam"))
            .team(archived)
            .team(team("t4", "secret", "Secret"))
            .my_team_member("t1", "team_user")
            .current_team("t1")
            .channel(town_square)
            .channel(channel("c2", "t1", "Ops"))
            .my_channel_member("c1", "channel_user channel_admin")
            .my_channel_member("c2", "channel_user")
            .current_channel("c1")
            .group(group("g1", "devs"))
            .group(group("g2", "design"))
            .group(group("g3", "support"))
            .group(group("g4", "sales"))
            .team_groups("t1", &["g1"])
            .channel_groups("c1", &["g3", "g4"])
            .my_group("g2")
            .thread("t1", thread("a", "c1", 1))
            .thread("t1", thread("b", "c1", 2))
    }

    // ── Permissions ──────────────────────────────────────────────

    #[test]
    fn test_permissions_widen_with_each_scope() {
        let views = Views::new();
        let state = workspace().build();

        let system = views.my_system_permissions(&state);
        let team = views.my_team_permissions(&state, "t1");
        let channel = views.my_channel_permissions(&state, "t1", "c1");

        assert!(system.is_subset(&team));
        assert!(team.is_subset(&channel));
        assert!(!system.contains(CREATE_POST));
        assert!(team.contains(CREATE_POST));
        assert!(channel.contains(MANAGE_PUBLIC_CHANNEL_MEMBERS));

        // channel_admin is only held in c1
        assert!(!views.have_i_channel_permission(
            &state,
            "t1",
            "c2",
            MANAGE_PUBLIC_CHANNEL_MEMBERS
        ));
        assert!(views.have_i_current_channel_permission(&state, MANAGE_PUBLIC_CHANNEL_MEMBERS));
        assert!(views.have_i_current_team_permission(&state, CREATE_POST));
    }

    #[test]
    fn test_group_permissions_come_from_membership() {
        let views = Views::new();
        let state = workspace().build();

        assert!(views.have_i_group_permission(&state, "g2", EDIT_CUSTOM_GROUP));
        assert!(!views.have_i_group_permission(&state, "g1", EDIT_CUSTOM_GROUP));
        assert!(!views.have_i_system_permission(&state, EDIT_CUSTOM_GROUP));
    }

    #[test]
    fn test_channel_permissions_cached_per_channel() {
        let views = Views::new();
        let state = workspace().build();

        let c1 = views.my_channel_permissions(&state, "t1", "c1");
        let c2 = views.my_channel_permissions(&state, "t1", "c2");
        assert!(!Arc::ptr_eq(&c1, &c2));
        assert_eq!(views.my_channel_permissions.len(), 2);

        // Asking for c2 did not evict c1
        assert!(Arc::ptr_eq(&c1, &views.my_channel_permissions(&state, "t1", "c1")));
        let cell = views
            .my_channel_permissions
            .cell(&("t1".to_string(), "c1".to_string()));
        assert_eq!(cell.recomputations(), 1);
    }

    // ── Team visibility ──────────────────────────────────────────

    #[test]
    fn test_joinable_and_listable_teams() {
        let views = Views::new();
        let state = workspace().build();

        assert_eq!(ids(&views.my_teams(&state)), vec!["t1"]);
        assert_eq!(*views.joinable_team_ids(&state), vec!["t2"]);
        assert_eq!(ids(&views.listable_teams(&state)), vec!["t2"]);

        let state = Fixture::from_state(&state)
            .role("system_user", &[JOIN_PUBLIC_TEAMS, JOIN_PRIVATE_TEAMS, LIST_PUBLIC_TEAMS])
            .build();
        assert_eq!(*views.joinable_team_ids(&state), vec!["t2", "t4"]);
        assert_eq!(ids(&views.sorted_joinable_teams(&state)), vec!["t2", "t4"]);
    }

    #[test]
    fn test_legacy_server_uses_open_invite() {
        let views = Views::new();
        let state = workspace()
            .server_version("5.6.0")
            .role("system_user", &[])
            .build();

        assert_eq!(*views.joinable_team_ids(&state), vec!["t2"]);
        assert_eq!(*views.listable_team_ids(&state), vec!["t2"]);
    }

    #[test]
    fn test_archived_team_never_listed() {
        let views = Views::new();
        let state = workspace()
            .role("system_user", &[JOIN_PUBLIC_TEAMS, LIST_PUBLIC_TEAMS, JOIN_PRIVATE_TEAMS])
            .my_team_member("t3", "team_user")
            .build();

        assert!(!ids(&views.my_teams(&state)).contains(&"t3"));
        assert!(!views.joinable_team_ids(&state).iter().any(|id| id == "t3"));
        assert!(!ids(&views.listable_teams(&state)).contains(&"t3"));
    }

    // ── Groups and threads ───────────────────────────────────────

    #[test]
    fn test_groups_for_reference_in_constrained_channel() {
        let views = Views::new();
        let state = workspace().build();

        let groups = views.associated_groups_for_reference(&state, "t1", "c1");
        let group_ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(group_ids, vec!["g3", "g4", "g1"]);

        let found = views.search_associated_groups_for_reference(&state, "SA", "t1", "c1");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "sales");

        // c2 is unconstrained, so only the team's groups apply
        let groups = views.associated_groups_for_reference(&state, "t1", "c2");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "g1");
    }

    #[test]
    fn test_thread_order_newest_first() {
        let views = Views::new();
        let state = workspace().build();

        assert_eq!(*views.thread_order_in_current_team(&state, None), vec!["b", "a"]);
        assert_eq!(*views.threads_in_channel(&state, "c1"), vec!["b", "a"]);
        assert!(views.unread_thread_order_in_current_team(&state, None).is_empty());
    }

    #[test]
    fn test_url_schemes() {
        let views = Views::new();
        let state = workspace().build();
        assert_eq!(
            *views.autolinked_url_schemes(&state),
            DEFAULT_AUTOLINKED_URL_SCHEMES.to_vec()
        );

        let state = workspace().config("CustomUrlSchemes", "dns,steam,shttp").build();
        let schemes = views.autolinked_url_schemes(&state);
        assert_eq!(schemes.len(), DEFAULT_AUTOLINKED_URL_SCHEMES.len() + 3);
        assert_eq!(&schemes[DEFAULT_AUTOLINKED_URL_SCHEMES.len()..], ["dns", "steam", "shttp"]);
    }

    // ── Memoization across snapshots ─────────────────────────────

    #[test]
    fn test_same_snapshot_returns_identical_results() {
        let views = Views::new();
        let state = workspace().build();

        let first = (
            views.my_system_permissions(&state),
            views.my_teams(&state),
            views.sorted_joinable_teams(&state),
            views.thread_order_in_team(&state, "t1", None),
            views.my_channels_in_team(&state, "t1"),
        );
        let second = (
            views.my_system_permissions(&state),
            views.my_teams(&state),
            views.sorted_joinable_teams(&state),
            views.thread_order_in_team(&state, "t1", None),
            views.my_channels_in_team(&state, "t1"),
        );

        assert!(Arc::ptr_eq(&first.0, &second.0));
        assert!(Arc::ptr_eq(&first.1, &second.1));
        assert!(Arc::ptr_eq(&first.2, &second.2));
        assert!(Arc::ptr_eq(&first.3, &second.3));
        assert!(Arc::ptr_eq(&first.4, &second.4));
        assert_eq!(views.my_system_permissions.recomputations(), 1);
        assert_eq!(views.my_teams.recomputations(), 1);
        assert_eq!(views.sorted_joinable_teams.recomputations(), 1);
    }

    #[test]
    fn test_unrelated_edit_keeps_cached_views() {
        let views = Views::new();
        let before = workspace().build();
        let my_teams = views.my_teams(&before);
        let joinable = views.joinable_team_ids(&before);
        let channel_permissions = views.my_channel_permissions(&before, "t1", "c1");

        // A new channel I am not in touches neither teams nor my memberships
        let after = Fixture::from_state(&before)
            .channel(channel("c3", "t1", "Random"))
            .build();

        assert!(Arc::ptr_eq(&my_teams, &views.my_teams(&after)));
        assert!(Arc::ptr_eq(&joinable, &views.joinable_team_ids(&after)));
        assert!(Arc::ptr_eq(
            &channel_permissions,
            &views.my_channel_permissions(&after, "t1", "c1")
        ));
        assert_eq!(views.my_channels_in_team(&after, "t1").len(), 2);
    }

    #[test]
    fn test_equal_recomputation_keeps_previous_ids() {
        let views = Views::new();
        let before = workspace().build();
        let joinable = views.joinable_team_ids(&before);

        // Renaming a team replaces the teams map but not the joinable set
        let after = Fixture::from_state(&before)
            .team(open_team("t2", "market", "Marketing"))
            .build();

        let again = views.joinable_team_ids(&after);
        assert!(Arc::ptr_eq(&joinable, &again));
        assert_eq!(views.joinable_team_ids.recomputations(), 2);
        assert_eq!(views.joinable_teams(&after)[0].display_name, "Marketing");
    }

    #[test]
    fn test_views_shared_between_threads() {
        let views = Views::new();
        let state = workspace().build();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| views.my_team_permissions(&state, "t1")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for permissions in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], permissions));
        }
        assert_eq!(views.my_team_permissions.cell(&"t1".to_string()).recomputations(), 1);
    }

    // ── Snapshots ────────────────────────────────────────────────

    fn snapshot() -> GlobalState {
        parse_snapshot(
            r#"{
                "entities": {
                    "general": {
                        "serverVersion": "5.10.0",
                        "config": {"CustomUrlSchemes": "steam"}
                    },
                    "users": {
                        "currentUserId": "u1",
                        "profiles": {"u1": {"id": "u1", "username": "alice", "roles": "system_user"}}
                    },
                    "roles": {
                        "roles": {
                            "system_user": {"name": "system_user", "permissions": ["join_public_teams"]},
                            "team_user": {"name": "team_user", "permissions": ["create_post"]}
                        }
                    },
                    "teams": {
                        "currentTeamId": "t1",
                        "teams": {
                            "t1": {"id": "t1", "name": "core", "display_name": "Core"},
                            "t2": {"id": "t2", "name": "open", "display_name": "Open", "allow_open_invite": true}
                        },
                        "myMembers": {"t1": {"team_id": "t1", "user_id": "u1", "roles": "team_user"}}
                    },
                    "channels": {
                        "currentChannelId": "c1",
                        "channels": {
                            "c1": {"id": "c1", "team_id": "t1", "type": "O", "display_name": "Town Square", "total_msg_count": 12}
                        },
                        "channelsInTeam": {"t1": ["c1"]},
                        "myMembers": {"c1": {"channel_id": "c1", "user_id": "u1", "roles": "channel_user", "msg_count": 10, "mention_count": 1}}
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_drives_views() {
        let views = Views::new();
        let state = snapshot();

        assert_eq!(teams::current_relative_team_url(&state), "/core");
        assert_eq!(*views.joinable_team_ids(&state), vec!["t2"]);
        assert!(views.have_i_current_team_permission(&state, CREATE_POST));
        assert!(!views.have_i_system_permission(&state, CREATE_POST));
        assert_eq!(
            channels::team_unread_totals(&state, "t1"),
            channels::UnreadCounts { messages: 2, mentions: 1 }
        );
        assert_eq!(views.autolinked_url_schemes(&state).last().map(String::as_str), Some("steam"));
    }
}
