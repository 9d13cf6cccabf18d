//! Property-based tests for the dispatch core.
//!
//! These tests use proptest to verify dispatch invariants hold across many
//! randomly generated inputs.

use machinist::core::{Action, DispatchKey, Event};
use machinist::engine::Engine;
use machinist::event_enum;
use proptest::prelude::*;

event_enum! {
    pub enum Ev {
        Step(u8),
        Noise(u8),
    }
    kind: EvKind
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum St {
    Start,
    ByValue,
    ByKind,
}

prop_compose! {
    fn arbitrary_noise()(payload in any::<u8>()) -> Ev {
        Ev::Noise(payload)
    }
}

proptest! {
    #[test]
    fn unmatched_events_change_nothing(events in prop::collection::vec(arbitrary_noise(), 1..20)) {
        let mut engine: Engine<Ev, St, u32> = Engine::with_value(17, St::Start);
        engine.add_transition(St::Start, DispatchKey::kind(EvKind::Step), St::ByKind, None);

        for event in events {
            engine.on_input(event);
            prop_assert_eq!(engine.current_state(), St::Start);
            prop_assert_eq!(*engine.value(), 17);
        }
    }

    #[test]
    fn value_key_always_beats_kind_key(chosen in any::<u8>(), probe in any::<u8>()) {
        let mut engine: Engine<Ev, St, u32> = Engine::new(St::Start);
        engine.add_transition(St::Start, DispatchKey::kind(EvKind::Step), St::ByKind, None);
        engine.add_transition(St::Start, DispatchKey::value(Ev::Step(chosen)), St::ByValue, None);

        engine.on_input(Ev::Step(probe));
        if probe == chosen {
            prop_assert_eq!(engine.current_state(), St::ByValue);
        } else {
            prop_assert_eq!(engine.current_state(), St::ByKind);
        }
    }

    #[test]
    fn value_operations_compose_left_to_right(
        start in 0u64..1000,
        add in 0u64..1000,
        mul in 1u64..10,
    ) {
        let mut engine: Engine<Ev, St, u64> = Engine::with_value(start, St::Start);
        engine.add_operation(Action::update(move |v| *v += add));
        engine.add_operation(Action::update(move |v| *v *= mul));

        engine.on_input(Ev::Noise(0));
        // f2(f1(v)), never f1(f2(v)).
        prop_assert_eq!(*engine.value(), (start + add) * mul);
    }

    #[test]
    fn current_event_tracks_the_last_input(payloads in prop::collection::vec(any::<u8>(), 1..10)) {
        let mut engine: Engine<Ev, St, u32> = Engine::new(St::Start);
        let mut last = None;

        for payload in payloads {
            let event = Ev::Noise(payload);
            engine.on_input(event.clone());
            last = Some(event);
        }

        prop_assert_eq!(engine.current_event(), last.as_ref());
    }

    #[test]
    fn kind_tags_are_payload_independent(a in any::<u8>(), b in any::<u8>()) {
        prop_assert_eq!(Ev::Step(a).kind(), Ev::Step(b).kind());
        prop_assert_ne!(Ev::Step(a).kind(), Ev::Noise(b).kind());
    }
}
