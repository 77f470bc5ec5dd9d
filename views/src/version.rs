//! Server version predicates.
//!
//! Versions look like `5.10.0`, `4.8.0.dev.123123` or `5.8.1.20190312-...`.
//! Only the first three dot-separated components are compared; everything
//! after them is build metadata, consulted by the named exceptions below.

/// Parse the leading digits of a version component.
fn leading_number(component: &str) -> Option<u64> {
    let digits: String = component.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// True when `version` is at least `major.minor.patch`.
///
/// Missing minor/patch components count as 0. A version without a numeric
/// major component never satisfies a minimum.
pub fn is_minimum_version(version: &str, major: u64, minor: u64, patch: u64) -> bool {
    let mut parts = version.split('.');
    let Some(actual_major) = parts.next().and_then(leading_number) else {
        return false;
    };
    let actual_minor = parts.next().and_then(leading_number).unwrap_or(0);
    let actual_patch = parts.next().and_then(leading_number).unwrap_or(0);

    (actual_major, actual_minor, actual_patch) >= (major, minor, patch)
}

/// Development builds carry `dev` somewhere in the version string.
pub fn is_dev_build(version: &str) -> bool {
    version.contains("dev")
}

/// Dated patch build of `major.minor`: `major.minor.<patch>.<dddd>...`, the
/// shape release candidates were cut with before the 4th component became
/// a build number.
pub fn is_dated_patch_of(version: &str, major: u64, minor: u64) -> bool {
    let parts: Vec<&str> = version.splitn(4, '.').collect();
    let [ma, mi, patch, build] = parts[..] else {
        return false;
    };

    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    ma.parse::<u64>() == Ok(major)
        && mi.parse::<u64>() == Ok(minor)
        && numeric(patch)
        && build.len() >= 4
        && build.chars().take(4).all(|c| c.is_ascii_digit())
}

/// A minimum version plus the pre-release exceptions that already shipped
/// the gated behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// `major.minor` line whose dev and dated patch builds also pass.
    pub preview: (u64, u64),
}

impl VersionGate {
    pub const fn new(major: u64, minor: u64, patch: u64, preview: (u64, u64)) -> Self {
        Self {
            major,
            minor,
            patch,
            preview,
        }
    }

    pub fn allows(&self, version: &str) -> bool {
        if is_minimum_version(version, self.major, self.minor, self.patch) {
            return true;
        }

        let (major, minor) = self.preview;
        let on_preview_line = is_minimum_version(version, major, minor, 0);
        on_preview_line && (is_dev_build(version) || is_dated_patch_of(version, major, minor))
    }
}

/// Servers that resolve permissions through roles and schemes.
pub const NEW_PERMISSIONS: VersionGate = VersionGate::new(4, 9, 0, (4, 8));

/// Servers that gate team join/list on `join_*_teams`/`list_*_teams`.
pub const JOIN_VIEW_TEAM_PERMISSIONS: VersionGate = VersionGate::new(5, 10, 0, (5, 8));
