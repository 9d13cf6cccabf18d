//! Overridable hook points invoked around dispatch.

use crate::errors::Fault;

/// Cross-cutting hook points of an [`Engine`](crate::engine::Engine).
///
/// Every method is a no-op by default. Entry and exit hooks run on every
/// state change and may raise a [`Fault`], which is routed like any other
/// dispatch fault. The unmapped and error hooks are diagnostic seams and
/// cannot fail.
///
/// # Example
///
/// ```rust
/// use machinist::engine::Hooks;
/// use machinist::errors::Fault;
///
/// struct Audit {
///     entries: usize,
/// }
///
/// impl Hooks<&'static str, u8> for Audit {
///     fn on_entry(&mut self, _state: u8) -> Result<(), Fault> {
///         self.entries += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Hooks<E, S>: Send {
    /// Runs after the cursor moved into `state`, before the transition's
    /// action. Good for persistence and audit concerns.
    fn on_entry(&mut self, _state: S) -> Result<(), Fault> {
        Ok(())
    }

    /// Runs before the cursor leaves `state`.
    fn on_exit(&mut self, _state: S) -> Result<(), Fault> {
        Ok(())
    }

    /// Runs when an event resolves neither a transition nor a default
    /// action of some shape while the machine is not done. Fires once per
    /// unregistered default-action shape.
    fn on_unmapped(&mut self, _event: &E, _state: S) {}

    /// Runs when a dispatch fault has no registered error handler.
    fn on_error(&mut self, _event: &E, _state: S, _fault: &Fault) {}
}

/// The default hook set: every method a no-op.
pub struct NoopHooks;

impl<E, S> Hooks<E, S> for NoopHooks {}
