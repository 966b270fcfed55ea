//! Discrete events emitted by the simulation.
//!
//! Events accumulate during a tick and are drained into that tick's
//! snapshot, so each event is delivered exactly once.

use serde::{Deserialize, Serialize};

use crate::enums::{GameOutcome, HostileClass, RemovalReason, Team};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A wave has begun spawning. `index` is zero-based.
    WaveStarted { index: u32, total: u32 },
    /// The countdown to the next wave has been (re)armed.
    NextWaveScheduled { seconds: f64 },
    /// A hostile entered the arena.
    HostileSpawned { hostile_id: u32, class: HostileClass },
    /// A hostile left the arena, by death or by escape.
    HostileRemoved {
        hostile_id: u32,
        reason: RemovalReason,
    },
    /// An attacker's weapon cycled while aimed at a live target.
    ReadyToFire { tower_id: u32, target_id: u32 },
    /// Capture drain applied to a structure this tick.
    CaptureProgress {
        structure_id: u32,
        hp: f64,
        hp_max: f64,
    },
    /// A capture beam connected.
    CaptureBeamStarted { tower_id: u32, structure_id: u32 },
    /// A capture beam disconnected.
    CaptureBeamStopped { tower_id: u32 },
    /// A structure's integrity reached zero and it changed hands.
    StructureCaptured { structure_id: u32, new_owner: Team },
    /// The mission reached a terminal state.
    GameOver {
        outcome: GameOutcome,
        final_score: i64,
        elapsed_secs: f64,
    },
}
