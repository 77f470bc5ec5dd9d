//! Field deserializers for server payloads that send `null`, or a boolean as
//! either `true` or `"true"`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use super::IdMap;

/// An explicit `null` reads as the type's default, like a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Bool(bool),
    Text(String),
}

/// `true` or `"true"`. Any other string and `null` read as `false`.
pub fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseBool>::deserialize(deserializer)? {
        Some(LooseBool::Bool(value)) => value,
        Some(LooseBool::Text(text)) => text == "true",
        None => false,
    })
}

/// Id map whose `null` entries are dropped, as if never stored.
pub fn skip_null_entries<'de, D, T>(deserializer: D) -> Result<Arc<IdMap<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw = Option::<BTreeMap<String, Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(Arc::new(
        raw.into_iter()
            .filter_map(|(id, entry)| entry.map(|e| (id, e)))
            .collect(),
    ))
}
