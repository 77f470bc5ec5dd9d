use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A boolean setting that the server ships as a `"true"`/`"false"` string.
///
/// `default` is what an absent key means. Default-true flags only turn off on
/// an explicit `"false"`; default-false flags only turn on on an explicit
/// `"true"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub key: &'static str,
    pub default: bool,
}

impl Flag {
    pub const fn new(key: &'static str, default: bool) -> Self {
        Self { key, default }
    }

    /// The one place a flag string becomes a bool.
    pub fn parse(&self, raw: Option<&str>) -> bool {
        match raw {
            None => self.default,
            Some(v) if self.default => v != "false",
            Some(v) => v == "true",
        }
    }
}

// ── Client config flags ──

pub const ENABLE_FILE_ATTACHMENTS: Flag = Flag::new("EnableFileAttachments", true);
pub const ENABLE_MOBILE_FILE_UPLOAD: Flag = Flag::new("EnableMobileFileUpload", true);
pub const ENABLE_MOBILE_FILE_DOWNLOAD: Flag = Flag::new("EnableMobileFileDownload", true);
pub const EXPERIMENTAL_TIMEZONE: Flag = Flag::new("ExperimentalTimezone", false);
pub const CLOSE_UNUSED_DIRECT_MESSAGES: Flag = Flag::new("CloseUnusedDirectMessages", false);

// ── License flags ──
// An absent license key allows: mobile file policies only bite when the
// server explicitly reports a licensed, compliance-enabled install.

pub const IS_LICENSED: Flag = Flag::new("IsLicensed", true);
pub const COMPLIANCE: Flag = Flag::new("Compliance", true);

/// Server-provided client config. Values stay as strings; read them through
/// [`ClientConfig::flag`] or [`ClientConfig::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientConfig(pub BTreeMap<String, String>);

impl ClientConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn flag(&self, flag: Flag) -> bool {
        flag.parse(self.get(flag.key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClientConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Server license summary, string-valued like the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct License(pub BTreeMap<String, String>);

impl License {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn flag(&self, flag: Flag) -> bool {
        flag.parse(self.get(flag.key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for License {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
