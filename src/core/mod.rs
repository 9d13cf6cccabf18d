//! Core vocabulary: states, events, dispatch keys and actions.

pub mod action;
pub mod event;
pub mod key;
pub mod macros;
pub mod state;

pub use action::{Action, ActionShape, FoldFn, ObserveFn, RunFn, UpdateFn};
pub use event::Event;
pub use key::DispatchKey;
pub use state::State;
