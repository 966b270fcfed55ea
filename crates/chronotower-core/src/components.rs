//! Plain-data components attached to simulation entities.
//!
//! These carry no entity references; runtime combat state that points
//! at other entities lives in the sim crate.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIM_TOLERANCE_DEG, CAPTURE_HP_MAX, CAPTURE_RANGE, CAPTURE_RATE, DEFAULT_ATTACK_RANGE,
    DEFAULT_FIRE_RATE, PROJECTILE_DAMAGE, PROJECTILE_HOMING_ACCEL, PROJECTILE_SPEED,
    TURRET_ROTATION_DEG_PER_SEC,
};
use crate::enums::{HostileClass, Team};

/// Common identity for every tower or structure on the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    /// Stable external identifier used in commands and snapshots.
    pub id: u32,
    pub team: Team,
}

/// Weapon and capture-beam configuration of an attack tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    /// Shots per second of effective time. Non-positive means no
    /// cooldown at all: one shot per eligible tick.
    pub fire_rate: f64,
    /// Acquisition and engagement range in world units.
    pub attack_range: f64,
    pub projectile_speed: f64,
    pub projectile_damage: f64,
    pub homing_accel: f64,
    /// Capture damage per second of effective time.
    pub capture_rate: f64,
    /// Maximum beam range for capturing.
    pub capture_range: f64,
}

/// Turret orientation state of an attack tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Turret {
    /// Current yaw in radians, measured from +x toward +y.
    pub yaw: f64,
    /// Current pitch in radians above the horizontal.
    pub pitch: f64,
    /// Slew rate in radians per second of effective time.
    pub rotation_speed: f64,
    /// Aim tolerance in radians.
    pub aim_tolerance: f64,
    /// Track targets in yaw only, ignoring elevation.
    pub yaw_only: bool,
}

/// Structural integrity of a capturable neutral structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CapturePoint {
    pub hp: f64,
    pub hp_max: f64,
}

/// A hostile advancing along a path toward the defended exit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile {
    /// Stable external identifier used in commands and snapshots.
    pub id: u32,
    pub class: HostileClass,
    pub health: f64,
    pub health_max: f64,
    /// Base score awarded when this hostile is killed.
    pub bounty: f64,
    /// Path speed in units per second of effective time.
    pub move_speed: f64,
}

/// Progress of a hostile along its assigned path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathFollower {
    pub path_index: usize,
    /// Arc-length distance from the path start.
    pub distance: f64,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            fire_rate: DEFAULT_FIRE_RATE,
            attack_range: DEFAULT_ATTACK_RANGE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            homing_accel: PROJECTILE_HOMING_ACCEL,
            capture_rate: CAPTURE_RATE,
            capture_range: CAPTURE_RANGE,
        }
    }
}

impl Default for Turret {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            rotation_speed: TURRET_ROTATION_DEG_PER_SEC.to_radians(),
            aim_tolerance: AIM_TOLERANCE_DEG.to_radians(),
            yaw_only: true,
        }
    }
}

impl Default for CapturePoint {
    fn default() -> Self {
        Self {
            hp: CAPTURE_HP_MAX,
            hp_max: CAPTURE_HP_MAX,
        }
    }
}

impl CapturePoint {
    /// Remaining integrity as a fraction in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.hp_max <= 0.0 {
            0.0
        } else {
            (self.hp / self.hp_max).clamp(0.0, 1.0)
        }
    }
}

impl Hostile {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}
