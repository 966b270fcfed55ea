//! The warped game clock.
//!
//! Every gameplay quantity advances by `raw_dt * scale`; the scale is
//! player-controlled, may be negative (rewind) or zero (pause), and is
//! frozen permanently once the mission ends.

use chronotower_core::constants::NORMAL_SPEED;
use chronotower_core::enums::SpeedMode;

/// Clock scale state. Owned by the engine, not stored in the ECS world.
#[derive(Debug, Clone)]
pub struct GameClock {
    scale: f64,
    mode: SpeedMode,
    rewinding: bool,
    /// Scale to restore when a manual rewind ends.
    resume_scale: f64,
    /// Set at game over; all further changes are ignored.
    frozen: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            scale: NORMAL_SPEED,
            mode: SpeedMode::Normal,
            rewinding: false,
            resume_scale: NORMAL_SPEED,
            frozen: false,
        }
    }
}

impl GameClock {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mode(&self) -> SpeedMode {
        self.mode
    }

    pub fn is_rewinding(&self) -> bool {
        self.rewinding
    }

    /// Effective gameplay delta for a raw tick delta.
    pub fn effective_delta(&self, raw_dt: f64) -> f64 {
        raw_dt * self.scale
    }

    /// Switch to a preset speed mode.
    pub fn set_mode(&mut self, mode: SpeedMode) {
        if self.frozen {
            return;
        }
        self.mode = mode;
        self.scale = mode.scale();
    }

    /// Set an arbitrary scale. The preset mode is left as-is; the scale
    /// shown to the player is authoritative.
    pub fn set_scale(&mut self, scale: f64) {
        if self.frozen {
            return;
        }
        self.scale = scale;
    }

    /// Begin a manual rewind. The current scale is remembered so that
    /// [`stop_rewind`](Self::stop_rewind) can restore it.
    pub fn start_rewind(&mut self) {
        if self.frozen || self.rewinding {
            return;
        }
        self.resume_scale = self.scale;
        self.rewinding = true;
        self.scale = SpeedMode::Reverse.scale();
    }

    /// End a manual rewind and restore the remembered scale.
    pub fn stop_rewind(&mut self) {
        if self.frozen || !self.rewinding {
            return;
        }
        self.rewinding = false;
        self.scale = self.resume_scale;
    }

    /// Pin the clock at zero. Called once at game over; irreversible.
    pub fn freeze(&mut self) {
        self.scale = 0.0;
        self.rewinding = false;
        self.frozen = true;
    }
}
