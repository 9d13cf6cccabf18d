//! Two-mode lookup keys for transition and default-action tables.

use super::event::Event;

/// A lookup key holding either a concrete event value or an event kind tag,
/// never both.
///
/// Equality and hashing delegate to the held value or tag through the
/// derived impls; the enum discriminant keeps the two modes apart, so a
/// value key never compares equal to a kind key even when both were built
/// from the same event.
///
/// # Example
///
/// ```rust
/// use machinist::core::DispatchKey;
///
/// let by_value: DispatchKey<&'static str> = DispatchKey::value("go");
/// let by_kind: DispatchKey<&'static str> = DispatchKey::kind(());
/// assert_ne!(by_value, by_kind);
/// assert_eq!(by_value, DispatchKey::value("go"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DispatchKey<E: Event> {
    /// Matches one exact event value.
    Value(E),

    /// Matches every event of one kind.
    Kind(E::Kind),
}

impl<E: Event> DispatchKey<E> {
    /// Key matching the given event by value equality.
    pub fn value(event: E) -> Self {
        DispatchKey::Value(event)
    }

    /// Key matching any event of the given kind.
    pub fn kind(kind: E::Kind) -> Self {
        DispatchKey::Kind(kind)
    }
}
