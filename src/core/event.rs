//! Core `Event` trait for values delivered to the engine.
//!
//! Events are matched in two tiers: by value (the event's own `Eq`/`Hash`)
//! and by kind (a `Copy` discriminant naming the event's variant). A kind
//! key matches every payload of that variant; a value key matches exactly
//! one event.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for events driving a state machine.
///
/// The associated [`Kind`](Event::Kind) is the event's type tag: two events
/// of the same enum variant share a kind even when their payloads differ.
/// Kind matching is what lets a transition fire on "any `Payment`" rather
/// than one specific payment.
///
/// The [`event_enum!`](crate::event_enum) macro generates the enum, its
/// parallel kind enum and this impl in one go.
///
/// # Example
///
/// ```rust
/// use machinist::core::Event;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Msg {
///     Go(String),
///     Ping,
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum MsgKind {
///     Go,
///     Ping,
/// }
///
/// impl Event for Msg {
///     type Kind = MsgKind;
///
///     fn kind(&self) -> MsgKind {
///         match self {
///             Msg::Go(_) => MsgKind::Go,
///             Msg::Ping => MsgKind::Ping,
///         }
///     }
/// }
///
/// assert_eq!(Msg::Go("a".into()).kind(), Msg::Go("b".into()).kind());
/// ```
pub trait Event: Clone + Eq + Hash + Debug + 'static {
    /// The event's type tag, compared by identity of the tag value.
    type Kind: Copy + Eq + Hash + Debug + 'static;

    /// The kind of this event.
    fn kind(&self) -> Self::Kind;
}

/// Strings form a single-kind event space: every `String` has the same type
/// tag, so kind-keyed registrations match any string event.
impl Event for String {
    type Kind = ();

    fn kind(&self) {}
}

impl Event for &'static str {
    type Kind = ();

    fn kind(&self) {}
}
