//! Machine models: the static description one phase of a machine runs on.

pub mod table;

pub use table::{TransitionEntry, TransitionTable};

use crate::core::{Action, DispatchKey, Event, State};
use std::collections::{HashMap, HashSet};

/// A named machine model: transition tables keyed by state, the initial
/// state, done and terminal state sets, and an optional next-phase pointer.
///
/// Declaring a done or terminal state materializes an (initially empty)
/// transition table for it, so state lookups at the model layer never need
/// a second existence check for declared states.
pub struct MachineModel<E: Event, S: State, V> {
    id: Option<String>,
    initial: S,
    transitions: HashMap<S, TransitionTable<E, S, V>>,
    done: HashSet<S>,
    terminal: HashSet<S>,
    next_phase: Option<String>,
}

impl<E: Event, S: State, V> MachineModel<E, S, V> {
    /// A model without an id.
    pub fn new(initial: S) -> Self {
        MachineModel {
            id: None,
            initial,
            transitions: HashMap::new(),
            done: HashSet::new(),
            terminal: HashSet::new(),
            next_phase: None,
        }
    }

    /// A model registered under an id, addressable for phase linking.
    pub fn with_id(id: impl Into<String>, initial: S) -> Self {
        let mut model = Self::new(initial);
        model.id = Some(id.into());
        model
    }

    /// The model's id, if it has one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// The state the model starts in.
    pub fn initial_state(&self) -> S {
        self.initial
    }

    /// The transition table for a state, or `None` if the state was never
    /// registered with a transition, done marking or terminal marking.
    pub fn transitions_for(&self, state: S) -> Option<&TransitionTable<E, S, V>> {
        self.transitions.get(&state)
    }

    /// Register a transition out of `state`.
    ///
    /// Re-registering the same key overwrites silently.
    pub fn add_transition(
        &mut self,
        state: S,
        matcher: DispatchKey<E>,
        target: S,
        action: Option<Action<E, V>>,
    ) {
        self.transitions.entry(state).or_default().add(matcher, target, action);
    }

    /// Mark a state as a done state.
    pub fn mark_done(&mut self, state: S) {
        self.done.insert(state);
        self.transitions.entry(state).or_default();
    }

    /// Mark a state as a terminal state.
    pub fn mark_terminal(&mut self, state: S) {
        self.terminal.insert(state);
        self.transitions.entry(state).or_default();
    }

    /// Whether `state` is a done state of this model.
    pub fn is_done(&self, state: S) -> bool {
        self.done.contains(&state)
    }

    /// Whether `state` is a terminal state of this model.
    pub fn is_terminal(&self, state: S) -> bool {
        self.terminal.contains(&state)
    }

    /// Point this model at a successor phase.
    ///
    /// The pointed-to id is not validated here; it is resolved when the
    /// machine reaches a done state of this model.
    pub fn set_next_phase(&mut self, id: impl Into<String>) {
        self.next_phase = Some(id.into());
    }

    /// Whether a successor phase is configured.
    pub fn has_next_phase(&self) -> bool {
        self.next_phase.is_some()
    }

    /// The successor phase id, if configured.
    pub fn next_phase_id(&self) -> Option<&str> {
        self.next_phase.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_enum;

    event_enum! {
        enum Ev {
            Go,
            Halt,
        }
        kind: EvKind
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum St {
        Start,
        Work,
        Finish,
    }

    #[test]
    fn unregistered_state_has_no_table() {
        let model: MachineModel<Ev, St, u32> = MachineModel::new(St::Start);
        assert!(model.transitions_for(St::Work).is_none());
    }

    #[test]
    fn transitions_materialize_tables() {
        let mut model: MachineModel<Ev, St, u32> = MachineModel::new(St::Start);
        model.add_transition(St::Start, DispatchKey::value(Ev::Go), St::Work, None);

        let table = model.transitions_for(St::Start).unwrap();
        assert_eq!(table.resolve_target(&Ev::Go), Some(St::Work));
    }

    #[test]
    fn done_marking_materializes_an_empty_table() {
        let mut model: MachineModel<Ev, St, u32> = MachineModel::new(St::Start);
        model.mark_done(St::Finish);

        assert!(model.is_done(St::Finish));
        assert!(!model.is_done(St::Start));
        assert!(model.transitions_for(St::Finish).unwrap().is_empty());
    }

    #[test]
    fn terminal_marking_is_membership_only() {
        let mut model: MachineModel<Ev, St, u32> = MachineModel::new(St::Start);
        model.mark_terminal(St::Finish);

        assert!(model.is_terminal(St::Finish));
        assert!(!model.is_done(St::Finish));
        assert!(model.transitions_for(St::Finish).is_some());
    }

    #[test]
    fn next_phase_is_a_plain_field() {
        let mut model: MachineModel<Ev, St, u32> = MachineModel::with_id("p1", St::Start);
        assert!(!model.has_next_phase());

        // No validation that the target exists happens here.
        model.set_next_phase("p2");
        assert!(model.has_next_phase());
        assert_eq!(model.next_phase_id(), Some("p2"));
        assert_eq!(model.id(), Some("p1"));
    }
}
