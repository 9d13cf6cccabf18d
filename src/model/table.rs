//! Per-state transition tables.

use crate::core::{Action, DispatchKey, Event, State};
use std::collections::HashMap;

/// One registered transition: a target state plus an optional action.
///
/// The entry is resolved as a unit, so when an event matches both a
/// value-keyed and a kind-keyed registration, the value-keyed entry wins
/// wholly, target and action together.
#[derive(Clone, Debug)]
pub struct TransitionEntry<E, S, V> {
    target: S,
    action: Option<Action<E, V>>,
}

impl<E, S: State, V> TransitionEntry<E, S, V> {
    /// The state this transition moves to.
    pub fn target(&self) -> S {
        self.target
    }

    /// The action invoked after the move, if any.
    pub fn action(&self) -> Option<&Action<E, V>> {
        self.action.as_ref()
    }
}

/// Transition table for a single state: dispatch key to transition entry.
///
/// Entries are never removed; re-registering a key silently overwrites
/// (last write wins).
pub struct TransitionTable<E: Event, S, V> {
    entries: HashMap<DispatchKey<E>, TransitionEntry<E, S, V>>,
}

impl<E: Event, S: State, V> TransitionTable<E, S, V> {
    /// An empty table.
    pub fn new() -> Self {
        TransitionTable { entries: HashMap::new() }
    }

    /// Register an entry under the given key.
    pub fn add(&mut self, key: DispatchKey<E>, target: S, action: Option<Action<E, V>>) {
        self.entries.insert(key, TransitionEntry { target, action });
    }

    /// Resolve an event against this table.
    ///
    /// The value-keyed lookup is tried first, then the kind-keyed one; the
    /// first hit wins.
    pub fn resolve(&self, event: &E) -> Option<&TransitionEntry<E, S, V>> {
        self.entries
            .get(&DispatchKey::Value(event.clone()))
            .or_else(|| self.entries.get(&DispatchKey::Kind(event.kind())))
    }

    /// Resolve only the target state for an event.
    pub fn resolve_target(&self, event: &E) -> Option<S> {
        self.resolve(event).map(TransitionEntry::target)
    }

    /// Whether any entry is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<E: Event, S: State, V> Default for TransitionTable<E, S, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_enum;

    event_enum! {
        enum Ev {
            Go(u8),
            Stop,
        }
        kind: EvKind
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum St {
        A,
        B,
        C,
    }

    #[test]
    fn value_key_wins_over_kind_key() {
        let mut table: TransitionTable<Ev, St, u32> = TransitionTable::new();
        table.add(DispatchKey::kind(EvKind::Go), St::B, None);
        table.add(DispatchKey::value(Ev::Go(7)), St::C, None);

        assert_eq!(table.resolve_target(&Ev::Go(7)), Some(St::C));
        // Other payloads fall through to the kind entry.
        assert_eq!(table.resolve_target(&Ev::Go(1)), Some(St::B));
    }

    #[test]
    fn unmatched_event_resolves_to_none() {
        let mut table: TransitionTable<Ev, St, u32> = TransitionTable::new();
        table.add(DispatchKey::value(Ev::Go(1)), St::B, None);

        assert!(table.resolve(&Ev::Stop).is_none());
        assert!(table.resolve(&Ev::Go(2)).is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut table: TransitionTable<Ev, St, u32> = TransitionTable::new();
        table.add(DispatchKey::value(Ev::Stop), St::B, None);
        table.add(DispatchKey::value(Ev::Stop), St::C, None);

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve_target(&Ev::Stop), Some(St::C));
    }

    #[test]
    fn entry_carries_its_action() {
        let mut table: TransitionTable<Ev, St, u32> = TransitionTable::new();
        table.add(
            DispatchKey::kind(EvKind::Stop),
            St::A,
            Some(Action::update(|v| *v += 1)),
        );

        let entry = table.resolve(&Ev::Stop).unwrap();
        assert_eq!(entry.target(), St::A);
        let mut value = 0;
        entry.action().unwrap().invoke(&Ev::Stop, &mut value).unwrap();
        assert_eq!(value, 1);
    }
}
