//! Fluent construction of engines.

use crate::core::{Event, State};
use crate::engine::{Engine, Hooks};

/// Builder collapsing the optional pieces of engine construction: an id
/// (which makes the initial model addressable for phase linking), an
/// initial accumulator value and a hook set.
///
/// # Example
///
/// ```rust
/// use machinist::engine::Engine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum St {
///     Start,
/// }
///
/// let engine: Engine<&'static str, St, u64> = Engine::builder(St::Start)
///     .id("phase-1")
///     .value(10)
///     .build();
///
/// assert_eq!(engine.id(), Some("phase-1"));
/// assert_eq!(*engine.value(), 10);
/// ```
pub struct EngineBuilder<E: Event, S: State, V> {
    initial: S,
    id: Option<String>,
    value: Option<V>,
    hooks: Option<Box<dyn Hooks<E, S>>>,
}

impl<E: Event, S: State, V> Engine<E, S, V> {
    /// Start building an engine with the mandatory initial state.
    pub fn builder(initial_state: S) -> EngineBuilder<E, S, V> {
        EngineBuilder { initial: initial_state, id: None, value: None, hooks: None }
    }
}

impl<E: Event, S: State, V> EngineBuilder<E, S, V> {
    /// Set the engine (and initial model) id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the initial accumulator value.
    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the hook set.
    pub fn hooks(mut self, hooks: Box<dyn Hooks<E, S>>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Build the engine, defaulting the accumulator when none was given.
    pub fn build(self) -> Engine<E, S, V>
    where
        V: Default,
    {
        let mut engine = Engine::with_value(self.value.unwrap_or_default(), self.initial);
        if let Some(id) = self.id {
            engine.set_id(id);
        }
        if let Some(hooks) = self.hooks {
            engine.set_hooks(hooks);
        }
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum St {
        Start,
    }

    #[test]
    fn defaults_are_minimal() {
        let engine: Engine<&'static str, St, u32> = Engine::builder(St::Start).build();
        assert_eq!(engine.id(), None);
        assert_eq!(*engine.value(), 0);
        assert_eq!(engine.current_state(), St::Start);
        assert_eq!(engine.previous_state(), None);
    }

    #[test]
    fn id_flows_to_engine_and_model() {
        let engine: Engine<&'static str, St, u32> =
            Engine::builder(St::Start).id("p1").build();
        assert_eq!(engine.id(), Some("p1"));
        assert_eq!(engine.model().id(), Some("p1"));
    }

    #[test]
    fn value_overrides_the_default() {
        let engine: Engine<&'static str, St, u32> =
            Engine::builder(St::Start).value(42).build();
        assert_eq!(*engine.value(), 42);
    }
}
