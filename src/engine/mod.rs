//! The execution engine: event dispatch, default actions, the operations
//! pipeline and phase hand-off.

pub mod hooks;

pub use hooks::{Hooks, NoopHooks};

use crate::core::{Action, ActionShape, DispatchKey, Event, State};
use crate::errors::{ConfigError, Fault};
use crate::model::MachineModel;
use anyhow::anyhow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler invoked when dispatch of a matching event faults. Receives the
/// event, the state at the time of the fault and the fault itself.
pub type ErrorHandler<E, S> = Arc<dyn Fn(&E, S, &Fault) + Send + Sync>;

/// A default-action registration: the action plus an optional state to move
/// to when it fires.
struct DefaultEntry<E, S, V> {
    action: Action<E, V>,
    target: Option<S>,
}

impl<E, S: Clone, V> Clone for DefaultEntry<E, S, V> {
    fn clone(&self) -> Self {
        DefaultEntry { action: self.action.clone(), target: self.target.clone() }
    }
}

/// Engine-wide default actions, one table per action shape.
///
/// The tables are deliberately independent: during fallback each shape is
/// resolved and invoked on its own, so registering one shape does not
/// shadow the other three.
struct DefaultTables<E: Event, S, V> {
    fold: HashMap<DispatchKey<E>, DefaultEntry<E, S, V>>,
    update: HashMap<DispatchKey<E>, DefaultEntry<E, S, V>>,
    observe: HashMap<DispatchKey<E>, DefaultEntry<E, S, V>>,
    run: HashMap<DispatchKey<E>, DefaultEntry<E, S, V>>,
}

impl<E: Event, S, V> DefaultTables<E, S, V> {
    fn new() -> Self {
        DefaultTables {
            fold: HashMap::new(),
            update: HashMap::new(),
            observe: HashMap::new(),
            run: HashMap::new(),
        }
    }

    fn table_mut(&mut self, shape: ActionShape) -> &mut HashMap<DispatchKey<E>, DefaultEntry<E, S, V>> {
        match shape {
            ActionShape::Fold => &mut self.fold,
            ActionShape::Update => &mut self.update,
            ActionShape::Observe => &mut self.observe,
            ActionShape::Run => &mut self.run,
        }
    }

    fn resolve(&self, shape: ActionShape, event: &E) -> Option<&DefaultEntry<E, S, V>> {
        let table = match shape {
            ActionShape::Fold => &self.fold,
            ActionShape::Update => &self.update,
            ActionShape::Observe => &self.observe,
            ActionShape::Run => &self.run,
        };
        table
            .get(&DispatchKey::Value(event.clone()))
            .or_else(|| table.get(&DispatchKey::Kind(event.kind())))
    }
}

/// A state machine execution engine.
///
/// The engine owns the live cursor (current and previous state, current
/// event, accumulator value), the active [`MachineModel`], a registry of
/// linked phase models, engine-wide default-action tables, error handlers
/// and the unconditional operations pipeline. All mutation goes through
/// [`on_input`](Engine::on_input).
///
/// The engine is synchronous and non-reentrant; calls must be serialized by
/// the caller.
///
/// # Example
///
/// ```rust
/// use machinist::core::DispatchKey;
/// use machinist::engine::Engine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum St {
///     Start,
///     New,
/// }
///
/// let mut engine: Engine<&'static str, St, u32> = Engine::new(St::Start);
/// engine.add_transition(St::Start, DispatchKey::value("go"), St::New, None);
///
/// engine.on_input("go");
/// assert_eq!(engine.current_state(), St::New);
/// ```
pub struct Engine<E: Event, S: State, V> {
    id: Option<String>,
    current: S,
    previous: Option<S>,
    current_event: Option<E>,
    value: V,
    model: MachineModel<E, S, V>,
    models: HashMap<String, MachineModel<E, S, V>>,
    defaults: DefaultTables<E, S, V>,
    error_handlers: HashMap<DispatchKey<E>, ErrorHandler<E, S>>,
    value_ops: Vec<Action<E, V>>,
    observe_ops: Vec<Action<E, V>>,
    run_ops: Vec<Action<E, V>>,
    hooks: Box<dyn Hooks<E, S>>,
}

impl<E: Event, S: State, V: Default> Engine<E, S, V> {
    /// An engine with a default-initialized accumulator.
    pub fn new(initial_state: S) -> Self {
        Self::with_value(V::default(), initial_state)
    }
}

impl<E: Event, S: State, V> Engine<E, S, V> {
    /// An engine starting from the given accumulator value.
    pub fn with_value(value: V, initial_state: S) -> Self {
        Engine {
            id: None,
            current: initial_state,
            previous: None,
            current_event: None,
            value,
            model: MachineModel::new(initial_state),
            models: HashMap::new(),
            defaults: DefaultTables::new(),
            error_handlers: HashMap::new(),
            value_ops: Vec::new(),
            observe_ops: Vec::new(),
            run_ops: Vec::new(),
            hooks: Box::new(NoopHooks),
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.model.set_id(id.clone());
        self.id = Some(id);
    }

    /// Replace the hook set.
    pub fn set_hooks(&mut self, hooks: Box<dyn Hooks<E, S>>) {
        self.hooks = hooks;
    }

    // --- registration ---

    /// Register a transition on the active model.
    ///
    /// Re-registering the same `(state, matcher)` pair overwrites silently.
    pub fn add_transition(
        &mut self,
        state: S,
        matcher: DispatchKey<E>,
        target: S,
        action: Option<Action<E, V>>,
    ) {
        self.model.add_transition(state, matcher, target, action);
    }

    /// Register a transition on a linked phase model.
    pub fn add_transition_for(
        &mut self,
        model_id: &str,
        state: S,
        matcher: DispatchKey<E>,
        target: S,
        action: Option<Action<E, V>>,
    ) -> Result<(), ConfigError> {
        self.model_mut(model_id)?.add_transition(state, matcher, target, action);
        Ok(())
    }

    /// Create a phase model addressable by id.
    pub fn add_phase(&mut self, model_id: &str, initial_state: S) -> Result<(), ConfigError> {
        if self.model.id() == Some(model_id) || self.models.contains_key(model_id) {
            return Err(ConfigError::DuplicateModel(model_id.to_owned()));
        }
        self.models.insert(model_id.to_owned(), MachineModel::with_id(model_id, initial_state));
        Ok(())
    }

    /// Register an engine-wide default action for events matching `matcher`,
    /// optionally moving to `target` when it fires.
    ///
    /// The action lands in the table for its shape; each shape's table is
    /// consulted independently during fallback.
    pub fn add_default_action(
        &mut self,
        matcher: DispatchKey<E>,
        action: Action<E, V>,
        target: Option<S>,
    ) {
        let shape = action.shape();
        self.defaults.table_mut(shape).insert(matcher, DefaultEntry { action, target });
    }

    /// Register an error handler for events matching `matcher`.
    pub fn add_error_handler(&mut self, matcher: DispatchKey<E>, handler: ErrorHandler<E, S>) {
        self.error_handlers.insert(matcher, handler);
    }

    /// Mark a done state on the active model.
    pub fn add_done_state(&mut self, state: S) {
        self.model.mark_done(state);
    }

    /// Mark a terminal state on the active model.
    pub fn add_terminal_state(&mut self, state: S) {
        self.model.mark_terminal(state);
    }

    /// Mark a done state on a linked phase model.
    pub fn add_done_state_for(&mut self, model_id: &str, state: S) -> Result<(), ConfigError> {
        self.model_mut(model_id)?.mark_done(state);
        Ok(())
    }

    /// Mark a terminal state on a linked phase model.
    pub fn add_terminal_state_for(&mut self, model_id: &str, state: S) -> Result<(), ConfigError> {
        self.model_mut(model_id)?.mark_terminal(state);
        Ok(())
    }

    /// Append an operation to the unconditional pipeline.
    ///
    /// Value-producing shapes join the value-producing sequence,
    /// event-consuming shapes the event sequence, no-argument shapes the
    /// final sequence. Each sequence runs in registration order on every
    /// call.
    pub fn add_operation(&mut self, operation: Action<E, V>) {
        match operation.shape() {
            ActionShape::Fold | ActionShape::Update => self.value_ops.push(operation),
            ActionShape::Observe => self.observe_ops.push(operation),
            ActionShape::Run => self.run_ops.push(operation),
        }
    }

    /// Point the model `model_id` at `next_id` as its successor phase.
    ///
    /// The source model must exist; the successor id is only resolved at
    /// hand-off time.
    pub fn link_phases(&mut self, model_id: &str, next_id: &str) -> Result<(), ConfigError> {
        self.model_mut(model_id)?.set_next_phase(next_id);
        Ok(())
    }

    fn model_mut(&mut self, model_id: &str) -> Result<&mut MachineModel<E, S, V>, ConfigError> {
        if self.model.id() == Some(model_id) {
            Ok(&mut self.model)
        } else {
            self.models
                .get_mut(model_id)
                .ok_or_else(|| ConfigError::UnknownModel(model_id.to_owned()))
        }
    }

    // --- execution ---

    /// Dispatch one event and return the (possibly updated) accumulator.
    ///
    /// Per call, in order: resolve a state-scoped transition entry for the
    /// current state (value key before kind key); when nothing resolved and
    /// the machine is not done, fall back to the per-shape default-action
    /// tables; when a target resolved, run exit hook, move the cursor, run
    /// entry hook and the transition's action; hand the active model off to
    /// its next phase if the machine is now done; finally run the
    /// unconditional operations pipeline.
    ///
    /// Faults raised anywhere in that sequence are routed to a registered
    /// error handler for the event, or to the error hook; they never
    /// propagate to the caller. Neither the accumulator nor a state change
    /// already applied is rolled back.
    pub fn on_input(&mut self, event: E) -> &V {
        if let Err(fault) = self.dispatch(&event) {
            warn!("dispatch fault on event {:?}: {fault:#}", event);
            let handler = self
                .error_handlers
                .get(&DispatchKey::Value(event.clone()))
                .or_else(|| self.error_handlers.get(&DispatchKey::Kind(event.kind())))
                .cloned();
            match handler {
                Some(handler) => handler(&event, self.current, &fault),
                None => self.hooks.on_error(&event, self.current, &fault),
            }
        }
        &self.value
    }

    fn dispatch(&mut self, event: &E) -> Result<(), Fault> {
        self.current_event = Some(event.clone());

        let resolved = self
            .model
            .transitions_for(self.current)
            .and_then(|table| table.resolve(event));
        let next = resolved.map(|entry| entry.target());
        let action = resolved.and_then(|entry| entry.action().cloned());

        if next.is_none() && !self.is_done() {
            self.run_default_actions(event)?;
        }

        if let Some(next) = next {
            self.hooks.on_exit(self.current)?;
            debug!("transition {:?} -> {:?} on event {:?}", self.current, next, event);
            self.previous = Some(self.current);
            self.current = next;
            self.hooks.on_entry(self.current)?;
            if let Some(action) = action {
                action.invoke(event, &mut self.value)?;
            }
        }

        if self.is_done() && self.model.has_next_phase() {
            self.advance_phase()?;
        }

        self.run_operations(event)
    }

    /// Fallback when no state-scoped transition matched: each of the four
    /// default-action shapes is checked independently. A registered entry is
    /// invoked (advancing the cursor when it carries a target state); a
    /// missing one fires the unmapped hook, once per missing shape.
    fn run_default_actions(&mut self, event: &E) -> Result<(), Fault> {
        for shape in ActionShape::ALL {
            let entry = self.defaults.resolve(shape, event).cloned();
            match entry {
                Some(entry) => {
                    debug!(
                        "default {:?} action for event {:?} in state {:?}",
                        shape, event, self.current
                    );
                    entry.action.invoke(event, &mut self.value)?;
                    if let Some(target) = entry.target {
                        self.previous = Some(self.current);
                        self.current = target;
                    }
                }
                None => self.hooks.on_unmapped(event, self.current),
            }
        }
        Ok(())
    }

    /// Swap the active model for its configured successor.
    ///
    /// The cursor is deliberately left where it is; only an explicit
    /// [`replace_model`](Engine::replace_model) resets it.
    fn advance_phase(&mut self) -> Result<(), Fault> {
        let next_id = match self.model.next_phase_id() {
            Some(id) => id.to_owned(),
            None => return Ok(()),
        };
        let next = self
            .models
            .remove(&next_id)
            .ok_or_else(|| anyhow!("next phase model `{next_id}` is not registered"))?;
        debug!("phase hand-off {:?} -> {next_id:?}", self.id);
        let prior = std::mem::replace(&mut self.model, next);
        if let Some(prior_id) = prior.id().map(str::to_owned) {
            self.models.insert(prior_id, prior);
        }
        self.id = self.model.id().map(str::to_owned);
        Ok(())
    }

    fn run_operations(&mut self, event: &E) -> Result<(), Fault> {
        for op in &self.value_ops {
            op.invoke(event, &mut self.value)?;
        }
        for op in &self.observe_ops {
            op.invoke(event, &mut self.value)?;
        }
        for op in &self.run_ops {
            op.invoke(event, &mut self.value)?;
        }
        Ok(())
    }

    /// Install a model as the active one, resetting the cursor to the
    /// model's initial state and clearing the previous state.
    ///
    /// This is the explicit counterpart of the implicit phase hand-off,
    /// which keeps the cursor.
    pub fn replace_model(&mut self, model: MachineModel<E, S, V>) {
        self.current = model.initial_state();
        self.previous = None;
        self.id = model.id().map(str::to_owned);
        self.model = model;
    }

    // --- introspection ---

    /// The state the machine is currently in.
    pub fn current_state(&self) -> S {
        self.current
    }

    /// The state before the most recent state change, if any change
    /// happened yet.
    pub fn previous_state(&self) -> Option<S> {
        self.previous
    }

    /// The event most recently passed to [`on_input`](Engine::on_input).
    pub fn current_event(&self) -> Option<&E> {
        self.current_event.as_ref()
    }

    /// The accumulator value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Whether the current state is a done state of the active model.
    pub fn is_done(&self) -> bool {
        self.model.is_done(self.current)
    }

    /// Whether the current state is a terminal state of the active model.
    pub fn is_terminal(&self) -> bool {
        self.model.is_terminal(self.current)
    }

    /// The engine's id, adopted from the active model.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the active model has a successor phase configured.
    pub fn has_next_phase(&self) -> bool {
        self.model.has_next_phase()
    }

    /// The active model.
    pub fn model(&self) -> &MachineModel<E, S, V> {
        &self.model
    }
}

impl<E: Event, S: State, V> fmt::Display for Engine<E, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "Engine({id})"),
            None => write!(f, "Engine(anonymous)"),
        }
    }
}
