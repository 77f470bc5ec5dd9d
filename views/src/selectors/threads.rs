use std::collections::BTreeMap;
use std::sync::Arc;

use crate::selectors::teams;
use crate::state::{GlobalState, IdMap, Thread, ThreadCounts};
use crate::views::Views;

pub fn get_threads(state: &GlobalState) -> &Arc<IdMap<Thread>> {
    &state.entities.threads.threads
}

pub fn get_thread<'a>(state: &'a GlobalState, thread_id: &str) -> Option<&'a Thread> {
    get_threads(state).get(thread_id)
}

pub fn get_threads_in_team<'a>(state: &'a GlobalState, team_id: &str) -> &'a [String] {
    state
        .entities
        .threads
        .threads_in_team
        .get(team_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn thread_counts(state: &GlobalState, team_id: &str) -> ThreadCounts {
    state
        .entities
        .threads
        .counts
        .get(team_id)
        .copied()
        .unwrap_or_default()
}

pub fn thread_counts_in_current_team(state: &GlobalState) -> ThreadCounts {
    thread_counts(state, teams::get_current_team_id(state))
}

/// Candidate ids that pass `keep`, plus `selected` if it was filtered out,
/// newest reply first. Ids without a record or without any reply are dropped.
fn order_threads(
    candidates: &[String],
    threads: &IdMap<Thread>,
    selected: Option<&str>,
    keep: impl Fn(&Thread) -> bool,
) -> Vec<String> {
    let mut ids: Vec<&str> = candidates
        .iter()
        .filter(|id| threads.get(id.as_str()).is_some_and(&keep))
        .map(String::as_str)
        .collect();

    if let Some(selected) = selected
        && !selected.is_empty()
        && !ids.contains(&selected)
    {
        ids.push(selected);
    }

    let mut present: Vec<&Thread> = ids
        .into_iter()
        .filter_map(|id| threads.get(id))
        .filter(|t| t.last_reply_at != 0)
        .collect();
    present.sort_by(|a, b| b.last_reply_at.cmp(&a.last_reply_at));
    present.into_iter().map(|t| t.id.clone()).collect()
}

pub(crate) type OrderKey = (
    Arc<BTreeMap<String, Vec<String>>>,
    Arc<IdMap<Thread>>,
    Option<String>,
);

impl Views {
    fn order_key(state: &GlobalState, selected: Option<&str>) -> OrderKey {
        let threads = &state.entities.threads;
        (
            Arc::clone(&threads.threads_in_team),
            Arc::clone(&threads.threads),
            selected.map(str::to_string),
        )
    }

    /// Followed threads in a team, newest reply first. The selected thread
    /// stays listed even after it is unfollowed.
    pub fn thread_order_in_team(
        &self,
        state: &GlobalState,
        team_id: &str,
        selected: Option<&str>,
    ) -> Arc<Vec<String>> {
        let key = Self::order_key(state, selected);
        self.thread_order_in_team
            .get_ids(&team_id.to_string(), key, |(in_team, threads, selected)| {
                let candidates = in_team.get(team_id).map(Vec::as_slice).unwrap_or_default();
                order_threads(candidates, threads, selected.as_deref(), |t| t.is_following)
            })
    }

    /// Like [`Views::thread_order_in_team`], restricted to threads with
    /// unread replies or mentions.
    pub fn unread_thread_order_in_team(
        &self,
        state: &GlobalState,
        team_id: &str,
        selected: Option<&str>,
    ) -> Arc<Vec<String>> {
        let key = Self::order_key(state, selected);
        self.unread_thread_order_in_team
            .get_ids(&team_id.to_string(), key, |(in_team, threads, selected)| {
                let candidates = in_team.get(team_id).map(Vec::as_slice).unwrap_or_default();
                order_threads(candidates, threads, selected.as_deref(), |t| {
                    t.is_following && t.is_unread()
                })
            })
    }

    pub fn thread_order_in_current_team(
        &self,
        state: &GlobalState,
        selected: Option<&str>,
    ) -> Arc<Vec<String>> {
        self.thread_order_in_team(state, teams::get_current_team_id(state), selected)
    }

    pub fn unread_thread_order_in_current_team(
        &self,
        state: &GlobalState,
        selected: Option<&str>,
    ) -> Arc<Vec<String>> {
        self.unread_thread_order_in_team(state, teams::get_current_team_id(state), selected)
    }

    /// Followed threads rooted in a channel, newest reply first.
    pub fn threads_in_channel(&self, state: &GlobalState, channel_id: &str) -> Arc<Vec<String>> {
        self.threads_in_channel
            .get_ids(&channel_id.to_string(), Arc::clone(get_threads(state)), |threads| {
                let candidates: Vec<String> = threads
                    .values()
                    .filter(|t| t.post.channel_id == channel_id)
                    .map(|t| t.id.clone())
                    .collect();
                order_threads(&candidates, threads, None, |t| t.is_following)
            })
    }
}
