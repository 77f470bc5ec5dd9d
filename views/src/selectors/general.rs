use std::sync::Arc;

use crate::state::GlobalState;
use crate::state::client_config::{
    COMPLIANCE, ClientConfig, ENABLE_FILE_ATTACHMENTS, ENABLE_MOBILE_FILE_DOWNLOAD,
    ENABLE_MOBILE_FILE_UPLOAD, EXPERIMENTAL_TIMEZONE, IS_LICENSED, License,
};
use crate::version::{JOIN_VIEW_TEAM_PERMISSIONS, NEW_PERMISSIONS};
use crate::views::Views;

/// URL schemes the markdown renderer always autolinks.
pub const DEFAULT_AUTOLINKED_URL_SCHEMES: [&str; 6] =
    ["http", "https", "ftp", "mailto", "tel", "mattermost"];

pub fn get_config(state: &GlobalState) -> &Arc<ClientConfig> {
    &state.entities.general.config
}

pub fn get_license(state: &GlobalState) -> &Arc<License> {
    &state.entities.general.license
}

pub fn get_server_version(state: &GlobalState) -> &str {
    &state.entities.general.server_version
}

/// Raw value of `FeatureFlag<name>`, if the server sent one.
pub fn feature_flag_value<'a>(state: &'a GlobalState, name: &str) -> Option<&'a str> {
    get_config(state).get(&format!("FeatureFlag{name}"))
}

/// Comma separated list, entries trimmed, blanks dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn managed_resource_paths(state: &GlobalState) -> Vec<String> {
    get_config(state)
        .get("ManagedResourcePaths")
        .map(split_list)
        .unwrap_or_default()
}

/// Mobile upload is only restricted on a licensed, compliance-enabled
/// server; otherwise attachments being enabled is enough.
pub fn can_upload_files_on_mobile(state: &GlobalState) -> bool {
    let config = get_config(state);
    let license = get_license(state);

    config.flag(ENABLE_FILE_ATTACHMENTS)
        && (!license.flag(IS_LICENSED)
            || !license.flag(COMPLIANCE)
            || config.flag(ENABLE_MOBILE_FILE_UPLOAD))
}

pub fn can_download_files_on_mobile(state: &GlobalState) -> bool {
    let config = get_config(state);
    let license = get_license(state);

    !license.flag(IS_LICENSED)
        || !license.flag(COMPLIANCE)
        || config.flag(ENABLE_MOBILE_FILE_DOWNLOAD)
}

/// The server resolves permissions through roles and schemes.
pub fn has_new_permissions(state: &GlobalState) -> bool {
    NEW_PERMISSIONS.allows(get_server_version(state))
}

/// The server gates joining and listing teams on dedicated permissions
/// rather than on `allow_open_invite` alone.
pub fn is_compatible_with_join_view_team_permissions(state: &GlobalState) -> bool {
    JOIN_VIEW_TEAM_PERMISSIONS.allows(get_server_version(state))
}

pub fn is_timezone_enabled(state: &GlobalState) -> bool {
    get_config(state).flag(EXPERIMENTAL_TIMEZONE)
}

/// URL the client talks to: the connection URL, else the configured site URL.
pub fn get_current_url(state: &GlobalState) -> &str {
    let general = &state.entities.general;
    if !general.credentials.url.is_empty() {
        return &general.credentials.url;
    }
    general.config.get("SiteURL").unwrap_or_default()
}

impl Views {
    /// Default schemes followed by `CustomUrlSchemes`, in config order.
    pub fn autolinked_url_schemes(&self, state: &GlobalState) -> Arc<Vec<String>> {
        self.autolinked_url_schemes
            .get(Arc::clone(get_config(state)), |config| {
                let mut schemes: Vec<String> = DEFAULT_AUTOLINKED_URL_SCHEMES
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                if let Some(custom) = config.get("CustomUrlSchemes") {
                    schemes.extend(split_list(custom));
                }
                schemes
            })
    }
}
