//! Two-Phase Order Pipeline
//!
//! This example demonstrates an order lifecycle split across two linked
//! phase models: an intake phase that collects and prices the order, and a
//! fulfilment phase that ships it.
//!
//! Key concepts:
//! - Phase models linked by id and swapped at a done state
//! - The cursor carrying over across the hand-off
//! - Default actions as engine-wide fallbacks
//! - Error handlers receiving the event, state and fault
//!
//! Run with: cargo run --example order_pipeline

use machinist::core::{Action, DispatchKey};
use machinist::engine::Engine;
use machinist::event_enum;
use std::sync::Arc;

event_enum! {
    pub enum OrderEvent {
        AddItem(u32),
        Checkout,
        Ship,
        Deliver,
        Cancel,
    }
    kind: OrderEventKind
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum OrderState {
    Draft,
    Priced,
    Shipped,
    Delivered,
    Cancelled,
}

fn main() {
    println!("=== Two-Phase Order Pipeline ===\n");

    // Accumulator: order total in cents.
    let mut engine: Engine<OrderEvent, OrderState, u32> =
        Engine::builder(OrderState::Draft).id("intake").build();

    // Intake phase: collect items, then price the order. Priced is the
    // done state that hands off to fulfilment.
    engine.add_transition(
        OrderState::Draft,
        DispatchKey::kind(OrderEventKind::AddItem),
        OrderState::Draft,
        Some(Action::fold(|event: &OrderEvent, total| {
            if let OrderEvent::AddItem(cents) = event {
                *total += cents;
            }
        })),
    );
    engine.add_transition(
        OrderState::Draft,
        DispatchKey::value(OrderEvent::Checkout),
        OrderState::Priced,
        None,
    );
    engine.add_done_state(OrderState::Priced);

    // Fulfilment phase: picks dispatch up from Priced, where the hand-off
    // leaves the cursor.
    engine.add_phase("fulfilment", OrderState::Priced).unwrap();
    engine
        .add_transition_for(
            "fulfilment",
            OrderState::Priced,
            DispatchKey::value(OrderEvent::Ship),
            OrderState::Shipped,
            Some(Action::try_update(|total| {
                if *total == 0 {
                    anyhow::bail!("refusing to ship an empty order");
                }
                Ok(())
            })),
        )
        .unwrap();
    engine
        .add_transition_for(
            "fulfilment",
            OrderState::Shipped,
            DispatchKey::value(OrderEvent::Deliver),
            OrderState::Delivered,
            None,
        )
        .unwrap();
    engine
        .add_terminal_state_for("fulfilment", OrderState::Delivered)
        .unwrap();
    engine.link_phases("intake", "fulfilment").unwrap();

    // Engine-wide fallback: a Cancel that no state maps jumps straight to
    // Cancelled.
    engine.add_default_action(
        DispatchKey::value(OrderEvent::Cancel),
        Action::observe(|_: &OrderEvent| println!("  [fallback] cancel requested")),
        Some(OrderState::Cancelled),
    );

    // Faults from Ship dispatch land here instead of panicking the caller.
    engine.add_error_handler(
        DispatchKey::value(OrderEvent::Ship),
        Arc::new(|event, state, fault| {
            println!("  [error] {event:?} in {state:?}: {fault}");
        }),
    );

    for event in [
        OrderEvent::AddItem(1250),
        OrderEvent::AddItem(499),
        OrderEvent::Checkout,
        OrderEvent::Ship,
        OrderEvent::Deliver,
    ] {
        println!("Event: {event:?}");
        engine.on_input(event);
        println!(
            "  phase = {:?}, state = {:?}, total = {} cents\n",
            engine.id(),
            engine.current_state(),
            engine.value()
        );
    }

    println!("Terminal: {}", engine.is_terminal());

    println!("\nKey Takeaways:");
    println!("- Checkout reaches the intake phase's done state, so the");
    println!("  engine adopts the fulfilment model before the next event");
    println!("- The hand-off swaps tables, not the cursor");
    println!("- Default actions and error handlers are engine-wide, not");
    println!("  per phase");

    println!("\n=== Example Complete ===");
}
