//! Wave countdown and lane spawn cadence.
//!
//! The inter-wave countdown and the per-wave clock both advance by
//! effective time, so slowing the clock delays waves and rewinding (or
//! pausing) freezes them. Already-spawned hostiles are never reclaimed
//! by a rewind.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use chronotower_core::constants::MIN_SPAWN_STEP_SECS;
use chronotower_core::enums::HostileClass;
use chronotower_core::events::SimEvent;
use chronotower_core::waves::WaveSet;

/// A lane slot became due; the engine spawns the hostile.
pub struct SpawnRequest {
    pub class: HostileClass,
    pub path_index: usize,
}

#[derive(Debug, Clone, Default)]
struct LaneRuntime {
    spawned: u32,
    /// Wave-clock time of the next spawn.
    next_spawn_at: f64,
}

/// Scheduler state. Owned by the engine, not stored in the ECS world.
pub struct WaveScheduler {
    set: WaveSet,
    /// Zero-based index of the running or most recent wave.
    current: Option<usize>,
    /// Wave that the countdown (or a next-wave request) will start.
    next: Option<usize>,
    /// Effective seconds until `next` starts, when armed.
    countdown: Option<f64>,
    running: bool,
    /// Effective seconds since the running wave started.
    wave_clock: f64,
    lanes: Vec<LaneRuntime>,
}

impl WaveScheduler {
    pub fn new(set: WaveSet) -> Self {
        let next = if set.is_empty() { None } else { Some(0) };
        let countdown = next.map(|i| set.waves[i].time_before_wave);
        Self {
            set,
            current: None,
            next,
            countdown,
            running: false,
            wave_clock: 0.0,
            lanes: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_index(&self) -> Option<u32> {
        self.current.map(|i| i as u32)
    }

    pub fn total_waves(&self) -> u32 {
        self.set.total_waves()
    }

    pub fn time_until_next(&self) -> Option<f64> {
        self.countdown
    }

    /// Whether any wave remains after the current one.
    pub fn has_more_waves(&self) -> bool {
        self.next.is_some()
    }

    /// Zero the countdown and start the next wave immediately. No-op
    /// while a wave is running or after the last wave.
    pub fn request_next_wave_now(&mut self, events: &mut Vec<SimEvent>) {
        if self.running {
            return;
        }
        self.start_next_wave(events);
    }

    fn start_next_wave(&mut self, events: &mut Vec<SimEvent>) {
        let Some(index) = self.next else {
            return;
        };
        let wave = &self.set.waves[index];
        self.lanes = wave
            .lanes
            .iter()
            .map(|lane| LaneRuntime {
                spawned: 0,
                next_spawn_at: lane.first_spawn_delay,
            })
            .collect();
        self.current = Some(index);
        self.next = None;
        self.countdown = None;
        self.running = true;
        self.wave_clock = 0.0;
        events.push(SimEvent::WaveStarted {
            index: index as u32,
            total: self.set.total_waves(),
        });
    }

    /// Arm the countdown for the wave after `current`, if any.
    fn schedule_next_wave(&mut self, events: &mut Vec<SimEvent>) {
        let after = self.current.map_or(0, |i| i + 1);
        let next = if after < self.set.waves.len() {
            Some(after)
        } else if self.set.loop_waves && !self.set.is_empty() {
            Some(0)
        } else {
            None
        };
        self.next = next;
        self.countdown = next.map(|i| self.set.waves[i].time_before_wave);
        if let Some(seconds) = self.countdown {
            events.push(SimEvent::NextWaveScheduled { seconds });
        }
    }

    /// Advance the scheduler by one tick and return the spawns that
    /// came due.
    pub fn run(
        &mut self,
        rng: &mut ChaCha8Rng,
        scale: f64,
        raw_dt: f64,
        events: &mut Vec<SimEvent>,
    ) -> Vec<SpawnRequest> {
        let mut spawns = Vec::new();

        if !self.running {
            if let Some(countdown) = self.countdown.as_mut() {
                *countdown -= raw_dt * scale.max(0.0);
                if *countdown <= 0.0 {
                    self.start_next_wave(events);
                }
            }
        }
        if !self.running || scale <= 0.0 {
            return spawns;
        }

        self.wave_clock += raw_dt * scale;
        let Some(current) = self.current else {
            return spawns;
        };
        let wave = &self.set.waves[current];
        let mut all_done = true;
        for (lane, runtime) in wave.lanes.iter().zip(self.lanes.iter_mut()) {
            while runtime.spawned < lane.spawn_count && self.wave_clock >= runtime.next_spawn_at {
                if let Some(class) = lane.class {
                    spawns.push(SpawnRequest {
                        class,
                        path_index: lane.path_index,
                    });
                }
                runtime.spawned += 1;
                let jitter = if lane.spawn_jitter > 0.0 {
                    rng.gen_range(-lane.spawn_jitter..=lane.spawn_jitter)
                } else {
                    0.0
                };
                let step = (lane.spawn_interval + jitter).max(MIN_SPAWN_STEP_SECS);
                runtime.next_spawn_at = self.wave_clock.max(runtime.next_spawn_at) + step;
            }
            if runtime.spawned < lane.spawn_count {
                all_done = false;
            }
        }

        if all_done {
            self.running = false;
            self.schedule_next_wave(events);
        }

        spawns
    }
}
