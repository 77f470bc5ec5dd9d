use crate::selectors::general::is_timezone_enabled;
use crate::selectors::users::{get_current_user, get_user};
use crate::state::{GlobalState, User, UserTimezone};

pub fn user_timezone<'a>(state: &'a GlobalState, user_id: &str) -> Option<&'a UserTimezone> {
    get_user(state, user_id).map(|u| &u.timezone)
}

/// The automatic zone when the user opted into it, otherwise the manual one.
pub fn user_current_timezone(user: &User) -> &str {
    let tz = &user.timezone;
    if tz.use_automatic_timezone {
        &tz.automatic_timezone
    } else {
        &tz.manual_timezone
    }
}

/// `None` when the server has timezones switched off or no user is loaded.
pub fn current_user_timezone(state: &GlobalState) -> Option<&str> {
    if !is_timezone_enabled(state) {
        return None;
    }
    get_current_user(state).map(user_current_timezone)
}
