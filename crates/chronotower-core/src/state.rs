//! Snapshot of the observable simulation state.
//!
//! A snapshot is produced once per tick. It is a read-only projection:
//! everything a presentation layer or test needs, nothing it can
//! mutate.

use serde::{Deserialize, Serialize};

use crate::enums::{GameOutcome, HostileClass, OrderState, SpeedMode, Team};
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

/// Clock and rewind-resource state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockView {
    /// Current clock scale. Negative values run the world backwards.
    pub scale: f64,
    pub mode: SpeedMode,
    /// A manual rewind is in progress.
    pub rewinding: bool,
    pub reverse_meter: f64,
    pub reverse_meter_max: f64,
}

/// Mission-level score and survival state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionView {
    pub score: i64,
    pub lives: i32,
    /// Set once the mission ends; never cleared.
    pub outcome: Option<GameOutcome>,
    pub hostiles_alive: u32,
}

/// Wave scheduler state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveView {
    /// Zero-based index of the running or most recent wave.
    pub current_index: Option<u32>,
    pub total_waves: u32,
    pub wave_running: bool,
    /// Seconds until the next wave begins, when one is scheduled.
    pub time_until_next: Option<f64>,
    pub has_more_waves: bool,
}

/// One tower or structure, as seen from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u32,
    pub position: Position,
    pub team: Team,
    /// Present for attack towers only.
    pub order_state: Option<OrderState>,
    /// Hostile currently engaged, if any.
    pub current_target: Option<u32>,
    /// Queued target count (excluding the current target).
    pub queued_targets: u32,
    pub yaw: Option<f64>,
    pub aimed: bool,
    pub cooldown_remaining: Option<f64>,
    /// Present for capturable structures only; remaining integrity.
    pub capture_hp: Option<f64>,
    pub capture_hp_max: Option<f64>,
    /// A capture beam from this tower is connected.
    pub beam_active: bool,
}

/// One hostile, as seen from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub id: u32,
    pub class: HostileClass,
    pub position: Position,
    pub health: f64,
    pub health_max: f64,
    /// Fraction of the path covered, in [0, 1].
    pub path_fraction: f64,
}

/// One projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub target_id: Option<u32>,
}

/// Full per-tick observable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: SimTime,
    pub clock: ClockView,
    pub mission: MissionView,
    pub wave: WaveView,
    pub towers: Vec<TowerView>,
    pub hostiles: Vec<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised during this tick, in emission order.
    pub events: Vec<SimEvent>,
}
