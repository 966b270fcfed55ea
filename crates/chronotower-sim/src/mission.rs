//! Mission ledger — score, lives, rewind meter, and the terminal state.
//!
//! Owned by the engine, not stored in the ECS world. Score is kept as a
//! float internally (speed multipliers and rewind drain produce
//! fractional amounts); snapshots expose the rounded integer.

use chronotower_core::constants::{
    REVERSE_METER_DRAIN_PER_SEC, REVERSE_METER_GAIN_PER_KILL, REVERSE_METER_MAX,
    REVERSE_METER_USABLE_MIN, REWIND_SCORE_COST_PER_SEC,
};
use chronotower_core::enums::GameOutcome;

#[derive(Debug, Clone)]
pub struct MissionLedger {
    score: f64,
    lives: i32,
    reverse_meter: f64,
    outcome: Option<GameOutcome>,
    hostiles_alive: u32,
}

impl MissionLedger {
    pub fn new(start_lives: i32) -> Self {
        Self {
            score: 0.0,
            lives: start_lives.max(0),
            reverse_meter: REVERSE_METER_MAX,
            outcome: None,
            hostiles_alive: 0,
        }
    }

    pub fn score_rounded(&self) -> i64 {
        self.score.round() as i64
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn reverse_meter(&self) -> f64 {
        self.reverse_meter
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn hostiles_alive(&self) -> u32 {
        self.hostiles_alive
    }

    /// Whether enough meter remains to begin a manual rewind.
    pub fn can_rewind(&self) -> bool {
        !self.is_over() && self.reverse_meter > REVERSE_METER_USABLE_MIN
    }

    /// Credit a kill. The bounty is multiplied by the current clock
    /// scale; kills at zero or negative scale award nothing.
    pub fn award_kill(&mut self, bounty: f64, scale: f64) {
        if self.is_over() || bounty <= 0.0 || scale <= 0.0 {
            return;
        }
        self.score += bounty * scale;
        self.reverse_meter = (self.reverse_meter + REVERSE_METER_GAIN_PER_KILL)
            .min(REVERSE_METER_MAX);
    }

    /// Charge the score for running time backwards. Proportional to the
    /// rewind magnitude; no-op at non-negative scale. Score may go
    /// negative.
    pub fn charge_rewind(&mut self, scale: f64, raw_dt: f64) {
        if self.is_over() || scale >= 0.0 {
            return;
        }
        self.score -= REWIND_SCORE_COST_PER_SEC * (-scale) * raw_dt;
    }

    /// Drain the rewind meter for one raw tick of manual rewinding.
    /// Returns true when the meter hits empty.
    pub fn drain_meter(&mut self, raw_dt: f64) -> bool {
        self.reverse_meter = (self.reverse_meter - REVERSE_METER_DRAIN_PER_SEC * raw_dt).max(0.0);
        self.reverse_meter <= 0.0
    }

    pub fn note_hostile_spawned(&mut self) {
        self.hostiles_alive += 1;
    }

    pub fn note_hostile_removed(&mut self) {
        self.hostiles_alive = self.hostiles_alive.saturating_sub(1);
    }

    /// Deduct one life for a leaked hostile. Returns true if this loss
    /// exhausted the last life.
    pub fn lose_life(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.lives = (self.lives - 1).max(0);
        self.lives == 0
    }

    /// Record the terminal outcome. First writer wins.
    pub fn finish(&mut self, outcome: GameOutcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }
}
