use std::cmp::Reverse;

use crate::state::activity::ReactionsByTeam;
use crate::state::{GlobalState, TimeFrame, TopReaction};

fn top(
    reactions: &ReactionsByTeam,
    team_id: &str,
    time_frame: TimeFrame,
    limit: usize,
) -> Vec<TopReaction> {
    let Some(tallies) = reactions.get(team_id).and_then(|by_frame| by_frame.get(&time_frame)) else {
        return Vec::new();
    };

    let mut sorted: Vec<&TopReaction> = tallies.values().collect();
    sorted.sort_by_key(|r| (Reverse(r.count), r.emoji_name.clone()));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Most used reactions in a team over a window, most frequent first.
pub fn top_reactions_for_team(
    state: &GlobalState,
    team_id: &str,
    time_frame: TimeFrame,
    limit: usize,
) -> Vec<TopReaction> {
    top(&state.entities.insights.top_reactions, team_id, time_frame, limit)
}

/// The current user's own most used reactions in a team.
pub fn my_top_reactions(
    state: &GlobalState,
    team_id: &str,
    time_frame: TimeFrame,
    limit: usize,
) -> Vec<TopReaction> {
    top(&state.entities.insights.my_top_reactions, team_id, time_frame, limit)
}
