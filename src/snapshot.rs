//! Serializable cursor snapshots.
//!
//! Exit and entry hooks are the intended seam for persistence concerns; a
//! [`Snapshot`] gives such hooks a ready-made value to write. The engine
//! does not persist or restore anything itself.

use crate::core::{Event, State};
use crate::engine::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-in-time copy of an engine's cursor and accumulator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot<S, V> {
    /// Unique snapshot identifier.
    pub id: String,

    /// The engine's id at capture time, if it had one.
    pub machine_id: Option<String>,

    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,

    /// Current state of the cursor.
    pub current: S,

    /// Previous state of the cursor, if any change happened yet.
    pub previous: Option<S>,

    /// Copy of the accumulator value.
    pub value: V,
}

impl<E: Event, S: State, V: Clone> Engine<E, S, V> {
    /// Capture the cursor and accumulator as a [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot<S, V> {
        Snapshot {
            id: Uuid::new_v4().to_string(),
            machine_id: self.id().map(str::to_owned),
            taken_at: Utc::now(),
            current: self.current_state(),
            previous: self.previous_state(),
            value: self.value().clone(),
        }
    }
}
