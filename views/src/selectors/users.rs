use std::collections::BTreeMap;
use std::sync::Arc;

use crate::state::{GlobalState, IdMap, User, split_roles};
use crate::views::Views;

pub const SYSTEM_ADMIN_ROLE: &str = "system_admin";
pub const DEFAULT_LOCALE: &str = "en";

/// Teammate name display settings.
pub const SHOW_USERNAME: &str = "username";
pub const SHOW_NICKNAME_FULLNAME: &str = "nickname_full_name";
pub const SHOW_FULLNAME: &str = "full_name";

pub fn get_current_user_id(state: &GlobalState) -> &str {
    &state.entities.users.current_user_id
}

pub fn get_users(state: &GlobalState) -> &Arc<IdMap<User>> {
    &state.entities.users.profiles
}

pub fn get_user<'a>(state: &'a GlobalState, user_id: &str) -> Option<&'a User> {
    get_users(state).get(user_id)
}

pub fn get_current_user(state: &GlobalState) -> Option<&User> {
    get_user(state, get_current_user_id(state))
}

pub fn is_current_user_system_admin(state: &GlobalState) -> bool {
    get_current_user(state).is_some_and(|u| split_roles(&u.roles).contains(SYSTEM_ADMIN_ROLE))
}

pub fn get_current_user_locale(state: &GlobalState) -> &str {
    match get_current_user(state) {
        Some(user) if !user.locale.is_empty() => &user.locale,
        _ => DEFAULT_LOCALE,
    }
}

fn full_name(user: &User) -> String {
    [user.first_name.as_str(), user.last_name.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name to show for `user` under a teammate name display setting, falling
/// back to the username when the preferred name is blank.
pub fn display_name(user: &User, setting: &str) -> String {
    let preferred = match setting {
        SHOW_NICKNAME_FULLNAME if !user.nickname.is_empty() => user.nickname.clone(),
        SHOW_NICKNAME_FULLNAME | SHOW_FULLNAME => full_name(user),
        _ => String::new(),
    };

    if preferred.is_empty() {
        user.username.clone()
    } else {
        preferred
    }
}

impl Views {
    pub fn users_by_username(&self, state: &GlobalState) -> Arc<BTreeMap<String, User>> {
        self.users_by_username
            .get(Arc::clone(get_users(state)), |profiles| {
                profiles
                    .values()
                    .map(|u| (u.username.clone(), u.clone()))
                    .collect()
            })
    }
}
