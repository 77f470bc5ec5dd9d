use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::state::GlobalState;

/// Read a JSON state snapshot. Absent slices deserialize empty.
pub fn load_snapshot(path: impl AsRef<Path>) -> anyhow::Result<GlobalState> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let state = parse_snapshot(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    debug!(
        path = %path.display(),
        teams = state.entities.teams.teams.len(),
        channels = state.entities.channels.channels.len(),
        "snapshot loaded"
    );
    Ok(state)
}

pub fn parse_snapshot(raw: &str) -> anyhow::Result<GlobalState> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "entities": {
            "users": {
                "currentUserId": "u1",
                "profiles": {"u1": {"id": "u1", "username": "alice", "roles": "system_user"}}
            },
            "teams": {
                "currentTeamId": "t1",
                "teams": {"t1": {"id": "t1", "name": "core", "display_name": "Core"}},
                "myMembers": {"t1": {"team_id": "t1", "user_id": "u1", "roles": "team_user", "mention_count": 2}}
            },
            "channels": {
                "channels": {"c1": {"id": "c1", "team_id": "t1", "type": "P", "display_name": "Ops"}}
            },
            "general": {
                "config": {"EnableFileAttachments": "false"},
                "serverVersion": "5.10.0"
            }
        }
    }"#;

    #[test]
    fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let state = load_snapshot(file.path()).unwrap();
        assert_eq!(state.entities.users.current_user_id, "u1");
        assert_eq!(state.entities.teams.my_members["t1"].mention_count, 2);
        assert_eq!(
            state.entities.channels.channels["c1"].channel_type,
            crate::state::ChannelType::Private
        );
        assert_eq!(state.entities.general.server_version, "5.10.0");
        assert!(state.entities.threads.threads.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let state = parse_snapshot(
            r#"{"entities": {
                "teams": {
                    "teams": {"t1": {"id": "t1", "name": "core", "scheme_id": null, "group_constrained": null}}
                },
                "channels": {
                    "channels": {"c1": {"id": "c1", "team_id": "t1", "type": "O", "scheme_id": null, "group_constrained": null}}
                }
            }}"#,
        )
        .unwrap();

        let team = &state.entities.teams.teams["t1"];
        assert_eq!(team.scheme_id, "");
        assert!(!team.group_constrained);
        let channel = &state.entities.channels.channels["c1"];
        assert_eq!(channel.scheme_id, "");
        assert!(!channel.group_constrained);
    }

    #[test]
    fn test_automatic_timezone_flag_forms() {
        let automatic = |flag: &str| {
            let state = parse_snapshot(&format!(
                r#"{{"entities": {{"users": {{"profiles": {{"u1": {{
                    "id": "u1",
                    "timezone": {{"useAutomaticTimezone": {flag}, "automaticTimezone": "Europe/Paris"}}
                }}}}}}}}}}"#
            ))
            .unwrap();
            state.entities.users.profiles["u1"].timezone.use_automatic_timezone
        };

        assert!(automatic("true"));
        assert!(automatic(r#""true""#));
        assert!(!automatic("false"));
        assert!(!automatic(r#""false""#));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"entities\": [").unwrap();
        let err = load_snapshot(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse snapshot"));
    }
}
