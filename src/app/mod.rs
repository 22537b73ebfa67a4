//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod actor;
pub mod bodies;
pub mod commands;
pub mod container;
pub mod dispatch;
pub mod documents;
pub mod expand;
pub mod forms;
pub mod links;
pub mod parameters;
pub mod projects;
pub mod state;

#[cfg(test)]
mod tests;

pub use actor::AppActor;
pub use state::AppState;
