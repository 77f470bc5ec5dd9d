use std::sync::Arc;

use tracing::warn;

use crate::selectors::{channels, teams};
use crate::state::{Channel, GlobalState, IdMap, Scheme, SchemeScope, Team};

pub fn get_schemes(state: &GlobalState) -> &Arc<IdMap<Scheme>> {
    &state.entities.schemes.schemes
}

pub fn get_scheme<'a>(state: &'a GlobalState, scheme_id: &str) -> Option<&'a Scheme> {
    get_schemes(state).get(scheme_id)
}

/// Teams that opted into a team-scoped scheme.
pub fn scheme_teams<'a>(state: &'a GlobalState, scheme_id: &str) -> Vec<&'a Team> {
    if let Some(scheme) = get_scheme(state, scheme_id)
        && scheme.scope == SchemeScope::Channel
    {
        warn!(scheme_id, "asked for teams of a channel scheme");
        return Vec::new();
    }

    teams::get_teams(state)
        .values()
        .filter(|t| t.scheme_id == scheme_id)
        .collect()
}

/// Channels that opted into a channel-scoped scheme.
pub fn scheme_channels<'a>(state: &'a GlobalState, scheme_id: &str) -> Vec<&'a Channel> {
    if let Some(scheme) = get_scheme(state, scheme_id)
        && scheme.scope == SchemeScope::Team
    {
        warn!(scheme_id, "asked for channels of a team scheme");
        return Vec::new();
    }

    channels::get_all_channels(state)
        .values()
        .filter(|c| c.scheme_id == scheme_id)
        .collect()
}
