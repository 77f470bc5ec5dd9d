use crate::selectors::channels::{get_my_channel_member, is_muted};
use crate::selectors::users::get_current_user;
use crate::state::GlobalState;

/// Channel-level value meaning "use my account setting".
pub const NOTIFY_DEFAULT: &str = "default";
/// Account-level level when the user never chose one.
pub const NOTIFY_MENTION: &str = "mention";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Desktop,
    Push,
}

/// Effective notification level for a channel. A channel left at `default`
/// follows the user's account setting.
pub fn channel_notify_level(state: &GlobalState, channel_id: &str, kind: NotifyKind) -> String {
    let channel_level = get_my_channel_member(state, channel_id).map(|m| match kind {
        NotifyKind::Desktop => m.notify_props.desktop.as_str(),
        NotifyKind::Push => m.notify_props.push.as_str(),
    });

    match channel_level {
        Some(level) if !level.is_empty() && level != NOTIFY_DEFAULT => level.to_string(),
        _ => user_notify_level(state, kind).to_string(),
    }
}

fn user_notify_level(state: &GlobalState, kind: NotifyKind) -> &str {
    let level = get_current_user(state).map(|u| match kind {
        NotifyKind::Desktop => u.notify_props.desktop.as_str(),
        NotifyKind::Push => u.notify_props.push.as_str(),
    });
    match level {
        Some(level) if !level.is_empty() => level,
        _ => NOTIFY_MENTION,
    }
}

/// Muted channels only mark themselves unread on mentions.
pub fn is_channel_muted(state: &GlobalState, channel_id: &str) -> bool {
    get_my_channel_member(state, channel_id).is_some_and(is_muted)
}
