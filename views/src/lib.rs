//! Read-only derived views over a chat client's state snapshot.
//!
//! A [`state::GlobalState`] is an immutable, normalized snapshot in which
//! every slice sits behind an `Arc`. Selectors in [`selectors`] read it;
//! the costly ones are memoized in a [`views::Views`].

pub mod config;
pub mod memo;
pub mod selectors;
pub mod snapshot;
pub mod sort;
pub mod state;
pub mod theme;
pub mod version;
pub mod views;

pub use state::GlobalState;
pub use views::Views;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod integration_tests;
