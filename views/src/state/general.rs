use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::client_config::{ClientConfig, License};

/// Server-wide facts: client config, license, version, connection URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralState {
    pub config: Arc<ClientConfig>,
    pub license: Arc<License>,
    pub server_version: String,
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// URL the client actually connected to. Empty when unknown.
    pub url: String,
}
