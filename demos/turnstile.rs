//! Turnstile State Machine
//!
//! This example demonstrates event dispatch against a coin-operated
//! turnstile.
//!
//! Key concepts:
//! - Value-keyed and kind-keyed transitions
//! - Value keys taking precedence over kind keys
//! - The unconditional operations pipeline
//! - Reading the cursor and accumulator after each input
//!
//! Run with: cargo run --example turnstile

use machinist::core::{Action, DispatchKey};
use machinist::engine::Engine;
use machinist::event_enum;

event_enum! {
    pub enum Input {
        Coin(u32),
        Push,
    }
    kind: InputKind
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Turnstile {
    Locked,
    Unlocked,
}

fn main() {
    println!("=== Turnstile State Machine ===\n");

    // Accumulator: total cents collected.
    let mut engine: Engine<Input, Turnstile, u32> = Engine::new(Turnstile::Locked);

    // Any coin unlocks the turnstile and is added to the takings.
    engine.add_transition(
        Turnstile::Locked,
        DispatchKey::kind(InputKind::Coin),
        Turnstile::Unlocked,
        Some(Action::fold(|input: &Input, takings| {
            if let Input::Coin(cents) = input {
                *takings += cents;
            }
        })),
    );

    // A slug (zero-value coin) is keyed by exact value and wins over the
    // kind-keyed rule above: it bounces, leaving the turnstile locked.
    engine.add_transition(
        Turnstile::Locked,
        DispatchKey::value(Input::Coin(0)),
        Turnstile::Locked,
        Some(Action::observe(|_: &Input| println!("  [alarm] slug rejected"))),
    );

    // Pushing through re-locks the turnstile.
    engine.add_transition(
        Turnstile::Unlocked,
        DispatchKey::value(Input::Push),
        Turnstile::Locked,
        None,
    );

    // Runs on every input, matched or not.
    engine.add_operation(Action::observe(|input: &Input| {
        println!("  [audit] saw {input:?}")
    }));

    println!("Initial state: {:?}\n", engine.current_state());

    for input in [
        Input::Push,    // no match in Locked: nothing happens
        Input::Coin(0), // exact-value rule beats the kind rule
        Input::Coin(25),
        Input::Push,
        Input::Coin(25),
        Input::Push,
    ] {
        println!("Input: {input:?}");
        engine.on_input(input);
        println!(
            "  state = {:?}, takings = {} cents\n",
            engine.current_state(),
            engine.value()
        );
    }

    println!("Key Takeaways:");
    println!("- Kind keys match every payload of an event variant");
    println!("- A value key overrides the kind key for one exact event");
    println!("- Operations observe every input regardless of matching");

    println!("\n=== Example Complete ===");
}
