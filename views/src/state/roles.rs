use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::IdMap;

/// A named permission set. Roles are referenced by name, never by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub permissions: Vec<String>,
    pub scheme_managed: bool,
    pub built_in: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesState {
    /// Role name -> role.
    pub roles: Arc<IdMap<Role>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeScope {
    #[default]
    Team,
    Channel,
}

/// A role scheme a team or channel can opt into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scheme {
    pub id: String,
    pub name: String,
    pub scope: SchemeScope,
    pub delete_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemesState {
    pub schemes: Arc<IdMap<Scheme>>,
}
