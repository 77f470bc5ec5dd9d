use std::sync::Arc;

use crate::sort::natural_cmp;
use crate::state::{FileInfo, GlobalState};
use crate::views::Views;

pub fn file_public_link(state: &GlobalState) -> Option<&str> {
    state.entities.files.file_public_link.as_deref()
}

impl Views {
    /// Attachments of a post, oldest upload first, ties by file name.
    pub fn files_for_post(&self, state: &GlobalState, post_id: &str) -> Arc<Vec<FileInfo>> {
        let files = &state.entities.files;
        let key = (
            Arc::clone(&files.files),
            Arc::clone(&files.file_ids_by_post_id),
        );
        self.files_for_post
            .get(&post_id.to_string(), key, |(all, by_post)| {
                let mut infos: Vec<FileInfo> = by_post
                    .get(post_id)
                    .into_iter()
                    .flatten()
                    .filter_map(|id| all.get(id))
                    .cloned()
                    .collect();
                infos.sort_by(|a, b| {
                    a.create_at
                        .cmp(&b.create_at)
                        .then_with(|| natural_cmp(&a.name, &b.name))
                });
                infos
            })
    }
}
