//! The current user's stored preferences and the settings derived from them.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::memo::Memo;
use crate::selectors::general::get_config;
use crate::selectors::teams::get_current_team_id;
use crate::selectors::users::SHOW_USERNAME;
use crate::state::client_config::CLOSE_UNUSED_DIRECT_MESSAGES;
use crate::state::preferences::preference_key;
use crate::state::{GlobalState, IdMap, Preference};
use crate::theme::{self, Theme};
use crate::views::Views;

pub const CATEGORY_DIRECT_CHANNEL_SHOW: &str = "direct_channel_show";
pub const CATEGORY_GROUP_CHANNEL_SHOW: &str = "group_channel_show";
pub const CATEGORY_FAVORITE_CHANNEL: &str = "favorite_channel";
pub const CATEGORY_DISPLAY_SETTINGS: &str = "display_settings";
pub const CATEGORY_SIDEBAR_SETTINGS: &str = "sidebar_settings";
pub const CATEGORY_THEME: &str = "theme";

pub const NAME_NAME_FORMAT: &str = "name_format";
pub const COLLAPSED_REPLY_THREADS: &str = "collapsed_reply_threads";
pub const SHOW_UNREAD_SECTION: &str = "show_unread_section";
pub const CHANNEL_SIDEBAR_AUTOCLOSE_DMS: &str = "close_unused_direct_messages";
pub const AUTOCLOSE_DMS_ENABLED: &str = "after_seven_days";

pub fn get_my_preferences(state: &GlobalState) -> &Arc<IdMap<Preference>> {
    &state.entities.preferences.my_preferences
}

fn lookup<'a>(state: &'a GlobalState, category: &str, name: &str) -> Option<&'a str> {
    get_my_preferences(state)
        .get(&preference_key(category, name))
        .map(|p| p.value.as_str())
}

/// Stored value, or `default` when the preference was never saved. A saved
/// empty value is returned as is.
pub fn get<'a>(state: &'a GlobalState, category: &str, name: &str, default: &'a str) -> &'a str {
    lookup(state, category, name).unwrap_or(default)
}

pub fn get_bool(state: &GlobalState, category: &str, name: &str, default: bool) -> bool {
    lookup(state, category, name).map_or(default, |v| v == "true")
}

pub fn get_int(state: &GlobalState, category: &str, name: &str, default: i64) -> i64 {
    lookup(state, category, name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Preferences stored under `category--`. The key decides membership, not
/// the record's own `category` field.
fn in_category<'a>(state: &'a GlobalState, category: &str) -> impl Iterator<Item = &'a Preference> {
    in_category_of(get_my_preferences(state), category)
}

fn in_category_of<'a>(
    prefs: &'a IdMap<Preference>,
    category: &str,
) -> impl Iterator<Item = &'a Preference> {
    let prefix = preference_key(category, "");
    prefs
        .iter()
        .filter(move |(key, _)| key.starts_with(&prefix))
        .map(|(_, p)| p)
}

fn enabled_names(state: &GlobalState, category: &str) -> Vec<String> {
    in_category(state, category)
        .filter(|p| p.value == "true")
        .map(|p| p.name.clone())
        .collect()
}

pub fn direct_show_preferences(state: &GlobalState) -> Vec<&Preference> {
    in_category(state, CATEGORY_DIRECT_CHANNEL_SHOW).collect()
}

pub fn group_show_preferences(state: &GlobalState) -> Vec<&Preference> {
    in_category(state, CATEGORY_GROUP_CHANNEL_SHOW).collect()
}

/// Names of favorited channels.
pub fn favorites_names(state: &GlobalState) -> Vec<String> {
    enabled_names(state, CATEGORY_FAVORITE_CHANNEL)
}

/// Teammates whose direct channel is shown in the sidebar.
pub fn visible_teammates(state: &GlobalState) -> Vec<String> {
    enabled_names(state, CATEGORY_DIRECT_CHANNEL_SHOW)
}

pub fn visible_group_ids(state: &GlobalState) -> Vec<String> {
    enabled_names(state, CATEGORY_GROUP_CHANNEL_SHOW)
}

/// The user's name format, else the server's `TeammateNameDisplay`, else
/// usernames.
pub fn teammate_name_display_setting(state: &GlobalState) -> &str {
    let server = get_config(state)
        .get("TeammateNameDisplay")
        .filter(|v| !v.is_empty())
        .unwrap_or(SHOW_USERNAME);
    get(state, CATEGORY_DISPLAY_SETTINGS, NAME_NAME_FORMAT, server)
}

/// `CollapsedThreads` of `disabled` or `always_on` overrides the user;
/// `default_on` and `default_off` only seed the user's choice.
pub fn is_collapsed_threads_enabled(state: &GlobalState) -> bool {
    let server = get_config(state).get("CollapsedThreads").unwrap_or("disabled");
    match server {
        "disabled" => false,
        "always_on" => true,
        _ => {
            let default = if server == "default_on" { "on" } else { "off" };
            get(state, CATEGORY_DISPLAY_SETTINGS, COLLAPSED_REPLY_THREADS, default) == "on"
        }
    }
}

/// Server allows closing idle direct messages and the user kept the default
/// seven day window.
pub fn should_autoclose_dms(state: &GlobalState) -> bool {
    get_config(state).flag(CLOSE_UNUSED_DIRECT_MESSAGES)
        && get(
            state,
            CATEGORY_SIDEBAR_SETTINGS,
            CHANNEL_SIDEBAR_AUTOCLOSE_DMS,
            AUTOCLOSE_DMS_ENABLED,
        ) == AUTOCLOSE_DMS_ENABLED
}

#[derive(Deserialize)]
struct LegacySidebarSettings {
    #[serde(default)]
    unreads_at_top: String,
}

/// The dedicated preference wins, then the older JSON sidebar settings,
/// then the server default.
pub fn should_show_unreads_category(state: &GlobalState) -> bool {
    if let Some(value) = lookup(state, CATEGORY_SIDEBAR_SETTINGS, SHOW_UNREAD_SECTION) {
        return value == "true";
    }

    if let Some(raw) = lookup(state, CATEGORY_SIDEBAR_SETTINGS, "") {
        match serde_json::from_str::<LegacySidebarSettings>(raw) {
            Ok(legacy) => return legacy.unreads_at_top == "true",
            Err(error) => debug!(%error, "ignoring unreadable sidebar settings"),
        }
    }

    get_config(state).get("ExperimentalGroupUnreadChannels") == Some("default_on")
}

/// Saved theme: the current team's first, then the one shared by all teams.
pub fn theme_preference(state: &GlobalState) -> Option<&Preference> {
    let prefs = get_my_preferences(state);
    let team_id = get_current_team_id(state);
    let for_team = if team_id.is_empty() {
        None
    } else {
        prefs.get(&preference_key(CATEGORY_THEME, team_id))
    };
    for_team.or_else(|| prefs.get(&preference_key(CATEGORY_THEME, "")))
}

/// The server's `DefaultTheme` when it names a built-in theme, else denim.
pub fn default_theme_name(state: &GlobalState) -> &str {
    get_config(state)
        .get("DefaultTheme")
        .filter(|name| theme::is_built_in(name))
        .unwrap_or(theme::DEFAULT_THEME)
}

/// Style sheet derived from the current theme, rebuilt only when the theme
/// changes.
pub struct StyleFromTheme<S> {
    memo: Memo<Arc<Theme>, S>,
    build: fn(&Theme) -> S,
}

impl<S> StyleFromTheme<S> {
    pub fn new(build: fn(&Theme) -> S) -> Self {
        Self {
            memo: Memo::new("style_from_theme"),
            build,
        }
    }

    pub fn get(&self, views: &Views, state: &GlobalState) -> Arc<S> {
        self.memo.get(views.theme(state), |theme| (self.build)(theme))
    }
}

impl Views {
    /// The current theme with every colour filled in. Unrelated preference
    /// changes return the same `Arc`.
    pub fn theme(&self, state: &GlobalState) -> Arc<Theme> {
        let saved = theme_preference(state).map(|p| p.value.clone());
        let default = default_theme_name(state).to_string();
        self.theme.get((saved, default), |(saved, default)| {
            theme::resolve(saved.as_deref(), default)
        })
    }

    /// Preferences saved under `category`, in key order.
    pub fn preferences_in_category(&self, state: &GlobalState, category: &str) -> Arc<Vec<Preference>> {
        self.preferences_in_category.get(
            &category.to_string(),
            Arc::clone(get_my_preferences(state)),
            |prefs| in_category_of(prefs, category).cloned().collect(),
        )
    }
}
