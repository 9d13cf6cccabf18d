//! Errors raised while wiring and driving state machines.
//!
//! Registration-time wiring mistakes surface as [`ConfigError`] so they are
//! caught where the machine is built. Faults raised by caller-supplied
//! actions and hooks at dispatch time are opaque [`Fault`] values; they are
//! routed through the engine's error handlers and never escape
//! [`on_input`](crate::engine::Engine::on_input).

use thiserror::Error;

/// An opaque fault raised by an action, hook or operation during dispatch.
pub type Fault = anyhow::Error;

/// Errors that occur while registering machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A registration addressed a model id that was never created.
    #[error("state machine model `{0}` is not registered")]
    UnknownModel(String),

    /// A phase model was created twice under the same id.
    #[error("state machine model `{0}` is already registered")]
    DuplicateModel(String),
}
