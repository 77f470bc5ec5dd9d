use crate::selectors::preferences::teammate_name_display_setting;
use crate::selectors::users::{display_name, get_current_user_id, get_user};
use crate::state::GlobalState;
use crate::state::activity::typing_key;

/// Shown for a typist whose profile is not loaded yet.
pub const UNKNOWN_TYPIST: &str = "Someone";

/// Display names of the other users typing in a channel or thread, earliest
/// typist first. Use an empty `post_id` for the channel itself.
pub fn users_typing(state: &GlobalState, channel_id: &str, post_id: &str) -> Vec<String> {
    let Some(typists) = state.entities.typing.0.get(&typing_key(channel_id, post_id)) else {
        return Vec::new();
    };

    let me = get_current_user_id(state);
    let setting = teammate_name_display_setting(state);

    let mut ordered: Vec<(&String, &i64)> = typists.iter().filter(|(id, _)| *id != me).collect();
    ordered.sort_by_key(|(_, at)| **at);

    ordered
        .into_iter()
        .map(|(id, _)| match get_user(state, id) {
            Some(user) => display_name(user, setting),
            None => UNKNOWN_TYPIST.to_string(),
        })
        .collect()
}
