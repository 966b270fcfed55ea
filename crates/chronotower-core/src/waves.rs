//! Wave composition data.
//!
//! A mission carries a [`WaveSet`]; each [`Wave`] spawns several
//! [`SpawnLane`]s in parallel, each feeding one hostile class onto one
//! path on a randomized cadence.

use serde::{Deserialize, Serialize};

use crate::enums::HostileClass;

/// One stream of spawns within a wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnLane {
    /// Hostile archetype to spawn. `None` means the lane is miswired;
    /// its slots are consumed without producing hostiles.
    pub class: Option<HostileClass>,
    /// Which arena path spawned hostiles follow.
    pub path_index: usize,
    /// Number of hostiles this lane produces.
    pub spawn_count: u32,
    /// Seconds of wave time before the first spawn.
    pub first_spawn_delay: f64,
    /// Nominal seconds between consecutive spawns.
    pub spawn_interval: f64,
    /// Uniform jitter applied to each gap, in +/- seconds.
    pub spawn_jitter: f64,
}

/// One wave of the mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    pub name: String,
    /// Countdown seconds before this wave begins.
    pub time_before_wave: f64,
    pub lanes: Vec<SpawnLane>,
}

/// The full spawn schedule of a mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveSet {
    pub waves: Vec<Wave>,
    /// Restart from the first wave after the last one completes.
    pub loop_waves: bool,
}

impl SpawnLane {
    /// A lane with a non-positive count contributes nothing.
    pub fn is_empty(&self) -> bool {
        self.spawn_count == 0
    }
}

impl WaveSet {
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }
}
