//! Actions attached to transitions, default-action tables and the
//! operations pipeline.
//!
//! An action comes in exactly one of four shapes, distinguished by what it
//! consumes: the event and the accumulator, the accumulator alone, the
//! event alone, or nothing. Value-producing shapes receive the accumulator
//! by exclusive reference and update it in place, so a faulting action
//! leaves the last written value intact.

use crate::errors::Fault;
use std::fmt;
use std::sync::Arc;

/// Fallible closure folding the event into the accumulator.
pub type FoldFn<E, V> = Arc<dyn Fn(&E, &mut V) -> Result<(), Fault> + Send + Sync>;

/// Fallible closure rewriting the accumulator without seeing the event.
pub type UpdateFn<V> = Arc<dyn Fn(&mut V) -> Result<(), Fault> + Send + Sync>;

/// Fallible side effect consuming the event.
pub type ObserveFn<E> = Arc<dyn Fn(&E) -> Result<(), Fault> + Send + Sync>;

/// Fallible side effect consuming nothing.
pub type RunFn = Arc<dyn Fn() -> Result<(), Fault> + Send + Sync>;

/// A registered action in one of the four shapes.
///
/// Construct through the shape constructors. The `try_` variants take
/// closures that can raise a [`Fault`]; the plain variants wrap infallible
/// closures.
///
/// # Example
///
/// ```rust
/// use machinist::core::Action;
///
/// let count: Action<&'static str, u32> = Action::fold(|_event, total| *total += 1);
/// let mut total = 0;
/// count.invoke(&"tick", &mut total).unwrap();
/// assert_eq!(total, 1);
/// ```
pub enum Action<E, V> {
    /// value <- f(event, value)
    Fold(FoldFn<E, V>),

    /// value <- f(value)
    Update(UpdateFn<V>),

    /// Side effect on the event.
    Observe(ObserveFn<E>),

    /// Side effect with no arguments.
    Run(RunFn),
}

/// Discriminant for the four action shapes.
///
/// [`ActionShape::ALL`] fixes the order the engine evaluates default-action
/// tables in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ActionShape {
    /// Event and accumulator.
    Fold,
    /// Accumulator only.
    Update,
    /// Event only.
    Observe,
    /// No arguments.
    Run,
}

impl ActionShape {
    /// All shapes, in default-action evaluation order.
    pub const ALL: [ActionShape; 4] = [
        ActionShape::Fold,
        ActionShape::Update,
        ActionShape::Observe,
        ActionShape::Run,
    ];
}

impl<E, V> Action<E, V> {
    /// Infallible fold over event and accumulator.
    pub fn fold<F>(f: F) -> Self
    where
        F: Fn(&E, &mut V) + Send + Sync + 'static,
    {
        Action::Fold(Arc::new(move |event, value| {
            f(event, value);
            Ok(())
        }))
    }

    /// Fallible fold over event and accumulator.
    pub fn try_fold<F>(f: F) -> Self
    where
        F: Fn(&E, &mut V) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Action::Fold(Arc::new(f))
    }

    /// Infallible rewrite of the accumulator.
    pub fn update<F>(f: F) -> Self
    where
        F: Fn(&mut V) + Send + Sync + 'static,
    {
        Action::Update(Arc::new(move |value| {
            f(value);
            Ok(())
        }))
    }

    /// Fallible rewrite of the accumulator.
    pub fn try_update<F>(f: F) -> Self
    where
        F: Fn(&mut V) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Action::Update(Arc::new(f))
    }

    /// Infallible side effect on the event.
    pub fn observe<F>(f: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Action::Observe(Arc::new(move |event| {
            f(event);
            Ok(())
        }))
    }

    /// Fallible side effect on the event.
    pub fn try_observe<F>(f: F) -> Self
    where
        F: Fn(&E) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Action::Observe(Arc::new(f))
    }

    /// Infallible side effect with no arguments.
    pub fn run<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Action::Run(Arc::new(move || {
            f();
            Ok(())
        }))
    }

    /// Fallible side effect with no arguments.
    pub fn try_run<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), Fault> + Send + Sync + 'static,
    {
        Action::Run(Arc::new(f))
    }

    /// The shape of this action.
    pub fn shape(&self) -> ActionShape {
        match self {
            Action::Fold(_) => ActionShape::Fold,
            Action::Update(_) => ActionShape::Update,
            Action::Observe(_) => ActionShape::Observe,
            Action::Run(_) => ActionShape::Run,
        }
    }

    /// Whether this shape writes the accumulator.
    pub fn produces_value(&self) -> bool {
        matches!(self, Action::Fold(_) | Action::Update(_))
    }

    /// Apply the action to an event and the accumulator.
    ///
    /// Shapes that do not consume one of the arguments simply ignore it.
    pub fn invoke(&self, event: &E, value: &mut V) -> Result<(), Fault> {
        match self {
            Action::Fold(f) => f(event, value),
            Action::Update(f) => f(value),
            Action::Observe(f) => f(event),
            Action::Run(f) => f(),
        }
    }
}

// A derived Clone would demand `E: Clone + V: Clone`; the variants are all
// `Arc`s, which clone regardless.
impl<E, V> Clone for Action<E, V> {
    fn clone(&self) -> Self {
        match self {
            Action::Fold(f) => Action::Fold(Arc::clone(f)),
            Action::Update(f) => Action::Update(Arc::clone(f)),
            Action::Observe(f) => Action::Observe(Arc::clone(f)),
            Action::Run(f) => Action::Run(Arc::clone(f)),
        }
    }
}

impl<E, V> fmt::Debug for Action<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action::{:?}", self.shape())
    }
}
