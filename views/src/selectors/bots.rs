use std::sync::Arc;

use crate::state::{Bot, GlobalState, IdMap};
use crate::views::Views;

/// Bots shipped with the server itself rather than created by users or
/// plugins.
pub const BUILT_IN_BOT_USERNAMES: [&str; 1] = ["mattermost-advisor"];

pub fn get_bot_accounts(state: &GlobalState) -> &Arc<IdMap<Bot>> {
    &state.entities.bots.accounts
}

pub fn bot_for_user<'a>(state: &'a GlobalState, user_id: &str) -> Option<&'a Bot> {
    get_bot_accounts(state).get(user_id)
}

impl Views {
    pub fn external_bot_accounts(&self, state: &GlobalState) -> Arc<IdMap<Bot>> {
        self.external_bot_accounts
            .get(Arc::clone(get_bot_accounts(state)), |accounts| {
                accounts
                    .iter()
                    .filter(|(_, bot)| !BUILT_IN_BOT_USERNAMES.contains(&bot.username.as_str()))
                    .map(|(id, bot)| (id.clone(), bot.clone()))
                    .collect()
            })
    }
}
