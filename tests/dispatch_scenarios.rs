//! End-to-end dispatch scenarios driving a full engine.

use machinist::core::{Action, DispatchKey};
use machinist::engine::{Engine, Hooks};
use machinist::errors::Fault;
use machinist::event_enum;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

event_enum! {
    pub enum Ev {
        Ping,
        Tally(u32),
    }
    kind: EvKind
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum St {
    Start,
    New,
    Idle,
    Acked,
    Compute,
    P2Start,
    P2End,
}

struct CountingHooks<E> {
    unmapped: Arc<AtomicUsize>,
    _marker: std::marker::PhantomData<E>,
}

impl<E> CountingHooks<E> {
    fn new(unmapped: Arc<AtomicUsize>) -> Self {
        CountingHooks { unmapped, _marker: std::marker::PhantomData }
    }
}

impl<E: Send + 'static> Hooks<E, St> for CountingHooks<E> {
    fn on_unmapped(&mut self, _event: &E, _state: St) {
        self.unmapped.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn start_goes_to_new_on_go() {
    let mut engine: Engine<&'static str, St, u32> = Engine::new(St::Start);
    engine.add_transition(St::Start, DispatchKey::value("go"), St::New, None);

    engine.on_input("go");
    assert_eq!(engine.current_state(), St::New);
}

#[test]
fn repeated_no_match_inputs_are_idempotent() {
    let unmapped = Arc::new(AtomicUsize::new(0));
    let mut engine: Engine<&'static str, St, u32> = Engine::with_value(9, St::Start);
    engine.set_hooks(Box::new(CountingHooks::new(Arc::clone(&unmapped))));

    for _ in 0..3 {
        engine.on_input("nothing-registered");
        assert_eq!(engine.current_state(), St::Start);
        assert_eq!(*engine.value(), 9);
    }
    // Four unregistered default-action shapes, once each per call.
    assert_eq!(unmapped.load(Ordering::SeqCst), 12);
}

#[test]
fn default_action_advances_and_updates_value() {
    let mut engine: Engine<Ev, St, u32> = Engine::new(St::Idle);
    engine.add_default_action(
        DispatchKey::kind(EvKind::Ping),
        Action::update(|v| *v += 1),
        Some(St::Acked),
    );

    engine.on_input(Ev::Ping);
    assert_eq!(*engine.value(), 1);
    assert_eq!(engine.current_state(), St::Acked);
}

#[test]
fn operations_fold_left_to_right_within_one_call() {
    let mut engine: Engine<Ev, St, u32> = Engine::with_value(5, St::Idle);
    engine.add_operation(Action::fold(|event: &Ev, v| {
        if let Ev::Tally(n) = event {
            *v += n;
        }
    }));
    engine.add_operation(Action::update(|v| *v *= 10));

    engine.on_input(Ev::Tally(2));
    // f2(e, f1(e, v)): (5 + 2) * 10.
    assert_eq!(*engine.value(), 70);
}

#[test]
fn done_state_with_linked_phase_swaps_the_model_id_only() {
    let mut engine: Engine<&'static str, St, u32> =
        Engine::builder(St::Start).id("p1").build();
    engine.add_transition(St::Start, DispatchKey::value("compute"), St::Compute, None);
    engine.add_done_state(St::Compute);

    engine.add_phase("p2", St::P2Start).unwrap();
    engine
        .add_transition_for("p2", St::Compute, DispatchKey::value("resume"), St::P2End, None)
        .unwrap();
    engine.link_phases("p1", "p2").unwrap();

    engine.on_input("compute");

    // The id swapped; the cursor did not jump to the new model's initial
    // state.
    assert_eq!(engine.id(), Some("p2"));
    assert_eq!(engine.current_state(), St::Compute);
    assert_ne!(engine.current_state(), St::P2Start);

    // Dispatch continues against the new model's tables.
    engine.on_input("resume");
    assert_eq!(engine.current_state(), St::P2End);
    assert_eq!(engine.previous_state(), Some(St::Compute));
}

#[test]
fn event_that_causes_no_transition_still_triggers_hand_off_when_done() {
    let mut engine: Engine<&'static str, St, u32> =
        Engine::builder(St::Compute).id("p1").build();
    engine.add_done_state(St::Compute);
    engine.add_phase("p2", St::P2Start).unwrap();
    engine.link_phases("p1", "p2").unwrap();

    // Already done when the event arrives; no transition, no defaults.
    engine.on_input("anything");
    assert_eq!(engine.id(), Some("p2"));
    assert_eq!(engine.current_state(), St::Compute);
}

#[test]
fn error_handler_receives_event_state_and_fault() {
    let seen = Arc::new(AtomicUsize::new(0));
    let seen_in_handler = Arc::clone(&seen);

    let mut engine: Engine<&'static str, St, u32> = Engine::new(St::Start);
    engine.add_transition(
        St::Start,
        DispatchKey::value("explode"),
        St::New,
        Some(Action::try_run(|| Err(anyhow::anyhow!("kaput")))),
    );
    engine.add_error_handler(
        DispatchKey::value("explode"),
        Arc::new(move |event: &&'static str, state, fault: &Fault| {
            assert_eq!(*event, "explode");
            assert_eq!(state, St::New);
            assert!(fault.to_string().contains("kaput"));
            seen_in_handler.fetch_add(1, Ordering::SeqCst);
        }),
    );

    engine.on_input("explode");
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    // No rollback of the state advanced before the fault.
    assert_eq!(engine.current_state(), St::New);
}

#[test]
fn faulting_entry_hook_is_a_dispatch_fault() {
    struct FailingEntry;

    impl Hooks<&'static str, St> for FailingEntry {
        fn on_entry(&mut self, _state: St) -> Result<(), Fault> {
            Err(anyhow::anyhow!("storage offline"))
        }
    }

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_in_handler = Arc::clone(&seen);

    let mut engine: Engine<&'static str, St, u32> = Engine::new(St::Start);
    engine.set_hooks(Box::new(FailingEntry));
    engine.add_transition(St::Start, DispatchKey::value("go"), St::New, None);
    engine.add_error_handler(
        DispatchKey::value("go"),
        Arc::new(move |_, _, _| {
            seen_in_handler.fetch_add(1, Ordering::SeqCst);
        }),
    );

    engine.on_input("go");
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    // The cursor had already moved when the entry hook faulted.
    assert_eq!(engine.current_state(), St::New);
}

#[test]
fn entry_and_exit_hooks_bracket_every_state_change() {
    struct Recorder {
        log: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl Hooks<&'static str, St> for Recorder {
        fn on_entry(&mut self, state: St) -> Result<(), Fault> {
            self.log.lock().unwrap().push(format!("enter {state:?}"));
            Ok(())
        }

        fn on_exit(&mut self, state: St) -> Result<(), Fault> {
            self.log.lock().unwrap().push(format!("exit {state:?}"));
            Ok(())
        }
    }

    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut engine: Engine<&'static str, St, u32> = Engine::new(St::Start);
    engine.set_hooks(Box::new(Recorder { log: Arc::clone(&log) }));
    engine.add_transition(St::Start, DispatchKey::value("go"), St::New, None);

    engine.on_input("go");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["exit Start".to_string(), "enter New".to_string()]
    );
}
