//! Enumerations used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{FAST_SPEED, NORMAL_SPEED, REVERSE_SPEED, VERY_FAST_SPEED};

/// Preset clock speed modes selectable by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedMode {
    Reverse,
    #[default]
    Normal,
    Fast,
    VeryFast,
}

/// Behavioral state of an attack tower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Default: engage hostiles from the target queue.
    #[default]
    AttackEnemies,
    /// Drain a designated neutral structure with the capture beam.
    CaptureTower,
    /// Engage a designated bonus objective; normal targeting suspended.
    AttackBonus,
    /// Player-ordered weapons hold.
    HoldFire,
    /// Tower is inoperative.
    Disabled,
}

/// Team ownership of towers, structures and hostiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Neutral,
    Defender,
    Hostile,
}

/// Archetype of a spawned hostile, fixing its movement and durability profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileClass {
    /// Fast, fragile.
    Runner,
    /// Baseline infantry.
    Soldier,
    /// Slow, heavily armored, high bounty.
    Juggernaut,
}

/// Why a hostile left the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Destroyed by defender fire (or scripted damage).
    Killed,
    /// Reached the end of its path and escaped.
    Leaked,
}

/// Terminal result of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// All waves cleared with lives remaining.
    Victory,
    /// Lives exhausted.
    Defeat,
}

impl SpeedMode {
    /// Clock scale this preset applies.
    pub fn scale(&self) -> f64 {
        match self {
            SpeedMode::Reverse => REVERSE_SPEED,
            SpeedMode::Normal => NORMAL_SPEED,
            SpeedMode::Fast => FAST_SPEED,
            SpeedMode::VeryFast => VERY_FAST_SPEED,
        }
    }
}

impl OrderState {
    /// Whether this state permits the fire-control loop to run at all.
    pub fn allows_weapons(&self) -> bool {
        matches!(self, OrderState::AttackEnemies | OrderState::CaptureTower)
    }
}
