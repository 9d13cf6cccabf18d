//! Machinist: an event-dispatch state machine engine.
//!
//! Application code declares states, events, transitions and actions; the
//! engine resolves each incoming event against the current state and runs
//! the configured actions, threading one mutable accumulator value through
//! every call.
//!
//! # Core concepts
//!
//! - **Two-tier matching**: transitions and default actions are keyed by a
//!   [`DispatchKey`](core::DispatchKey), either an exact event value or an
//!   event kind tag; value keys win over kind keys.
//! - **Default actions**: engine-wide fallbacks consulted when no
//!   state-scoped transition matches, one table per
//!   [`ActionShape`](core::ActionShape).
//! - **Phases**: models linked by id; reaching a done state hands the
//!   engine off to the successor model without resetting the cursor.
//! - **Fault routing**: action and hook faults are caught at the
//!   [`on_input`](engine::Engine::on_input) boundary and routed to error
//!   handlers, never to the caller.
//!
//! # Example
//!
//! ```rust
//! use machinist::core::{Action, DispatchKey};
//! use machinist::engine::Engine;
//! use machinist::event_enum;
//!
//! event_enum! {
//!     pub enum Signal {
//!         Advance,
//!         Reading(u64),
//!     }
//!     kind: SignalKind
//! }
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Phase {
//!     Idle,
//!     Sampling,
//! }
//!
//! let mut engine: Engine<Signal, Phase, u64> = Engine::new(Phase::Idle);
//! engine.add_transition(
//!     Phase::Idle,
//!     DispatchKey::value(Signal::Advance),
//!     Phase::Sampling,
//!     None,
//! );
//! engine.add_transition(
//!     Phase::Sampling,
//!     DispatchKey::kind(SignalKind::Reading),
//!     Phase::Sampling,
//!     Some(Action::fold(|signal: &Signal, total| {
//!         if let Signal::Reading(n) = signal {
//!             *total += n;
//!         }
//!     })),
//! );
//!
//! engine.on_input(Signal::Advance);
//! engine.on_input(Signal::Reading(3));
//! engine.on_input(Signal::Reading(4));
//!
//! assert_eq!(engine.current_state(), Phase::Sampling);
//! assert_eq!(*engine.value(), 7);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod errors;
pub mod model;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{Action, ActionShape, DispatchKey, Event, State};
pub use builder::EngineBuilder;
pub use engine::{Engine, Hooks, NoopHooks};
pub use errors::{ConfigError, Fault};
pub use model::{MachineModel, TransitionTable};
pub use snapshot::Snapshot;
