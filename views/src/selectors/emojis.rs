use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::sort::natural_cmp;
use crate::state::{CustomEmoji, GlobalState, IdMap};
use crate::views::Views;

pub fn get_custom_emojis(state: &GlobalState) -> &Arc<IdMap<CustomEmoji>> {
    &state.entities.emojis.custom_emoji
}

/// Names the server reported as unknown, so lookups are not retried.
pub fn get_non_existent_emoji(state: &GlobalState) -> &BTreeSet<String> {
    &state.entities.emojis.non_existent_emoji
}

impl Views {
    pub fn custom_emojis_by_name(&self, state: &GlobalState) -> Arc<BTreeMap<String, CustomEmoji>> {
        self.custom_emojis_by_name
            .get(Arc::clone(get_custom_emojis(state)), |emojis| {
                emojis
                    .values()
                    .map(|e| (e.name.clone(), e.clone()))
                    .collect()
            })
    }

    pub fn custom_emoji_ids_sorted_by_name(&self, state: &GlobalState) -> Arc<Vec<String>> {
        self.custom_emoji_ids_sorted_by_name
            .get_ids(Arc::clone(get_custom_emojis(state)), |emojis| {
                let mut sorted: Vec<&CustomEmoji> = emojis.values().collect();
                sorted.sort_by(|a, b| natural_cmp(&a.name, &b.name));
                sorted.into_iter().map(|e| e.id.clone()).collect()
            })
    }
}
