//! Player commands accepted by the simulation engine.
//!
//! Commands are queued and applied at the start of the next tick.
//! Invalid or inapplicable commands are dropped silently; after the
//! mission ends, clock and order commands are ignored entirely.

use serde::{Deserialize, Serialize};

use crate::enums::{SpeedMode, Team};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Switch the clock to a preset speed mode.
    SetSpeedMode { mode: SpeedMode },
    /// Set an arbitrary clock scale (negative rewinds, zero pauses).
    SetSpeed { scale: f64 },
    /// Begin a manual rewind, remembering the current scale for resume.
    /// Ignored if already rewinding or the rewind meter is depleted.
    StartRewind,
    /// End a manual rewind and restore the remembered scale.
    StopRewind,
    /// Order a tower to capture a neutral structure. Falls back to
    /// normal attack orders if the target is not capturable.
    OrderCapture { tower_id: u32, structure_id: u32 },
    /// Order a tower to engage a bonus objective.
    OrderAttackBonus { tower_id: u32, target_id: u32 },
    /// Return a tower to its default attack orders.
    OrderAttack { tower_id: u32 },
    /// Order a tower to hold fire.
    OrderHoldFire { tower_id: u32 },
    /// Take a tower offline.
    OrderDisable { tower_id: u32 },
    /// Zero the inter-wave countdown and start the next wave now.
    RequestNextWave,
    /// Apply scripted damage to a hostile.
    DamageHostile { hostile_id: u32, amount: f64 },
    /// Apply scripted capture damage to a neutral structure on behalf
    /// of `as_team`; reaching zero flips ownership to that team.
    DamageStructure {
        structure_id: u32,
        amount: f64,
        as_team: Team,
    },
}
