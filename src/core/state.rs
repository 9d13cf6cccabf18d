//! Core `State` trait for state machine states.
//!
//! States are members of a closed, caller-defined enumeration. Whether a
//! state is "done" or "terminal" is a property of a
//! [`MachineModel`](crate::model::MachineModel), not of the state itself,
//! so the trait carries no classification methods.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// Any `Copy` enum with derived `Eq`, `Hash` and `Debug` qualifies through
/// the blanket impl; there is nothing to implement by hand.
///
/// # Example
///
/// ```rust
/// use machinist::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// fn assert_state<S: State>(_: S) {}
/// assert_state(TaskState::Pending);
/// ```
pub trait State: Copy + Eq + Hash + Debug + 'static {}

impl<T> State for T where T: Copy + Eq + Hash + Debug + 'static {}
