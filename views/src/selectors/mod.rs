//! Selectors grouped by entity kind.
//!
//! Plain lookups are free functions over `&GlobalState`. Derived views that
//! are worth caching are methods on [`Views`](crate::views::Views), declared
//! next to the lookups they build on.

pub mod bots;
pub mod channels;
pub mod emojis;
pub mod files;
pub mod general;
pub mod groups;
pub mod insights;
pub mod jobs;
pub mod notifications;
pub mod preferences;
pub mod roles;
pub mod schemes;
pub mod teams;
pub mod threads;
pub mod timezones;
pub mod typing;
pub mod users;
