//! Tuning constants for the simulation.
//!
//! Gameplay-speed-sensitive quantities are expressed per second of
//! effective (scaled) time unless noted otherwise.

/// Simulation tick rate in Hz.
pub const TICK_RATE: u32 = 30;

/// Clock scale applied by the `Reverse` speed mode.
pub const REVERSE_SPEED: f64 = -3.0;

/// Clock scale applied by the `Normal` speed mode.
pub const NORMAL_SPEED: f64 = 1.0;

/// Clock scale applied by the `Fast` speed mode.
pub const FAST_SPEED: f64 = 3.0;

/// Clock scale applied by the `VeryFast` speed mode.
pub const VERY_FAST_SPEED: f64 = 5.0;

/// Lives the defender starts with. Each leaked hostile costs one.
pub const START_LIVES: i32 = 20;

/// Upper bound of the rewind meter.
pub const REVERSE_METER_MAX: f64 = 100.0;

/// Meter drained per second of raw time while manually rewinding.
pub const REVERSE_METER_DRAIN_PER_SEC: f64 = 25.0;

/// Meter gained for each hostile kill, clamped to the meter maximum.
pub const REVERSE_METER_GAIN_PER_KILL: f64 = 5.0;

/// Minimum meter required to begin a manual rewind.
pub const REVERSE_METER_USABLE_MIN: f64 = 0.1;

/// Score drained per second of raw time per unit of reverse scale.
/// At scale -3 the drain is three times this value.
pub const REWIND_SCORE_COST_PER_SEC: f64 = 500.0;

/// Default attacker fire rate in shots per second of effective time.
pub const DEFAULT_FIRE_RATE: f64 = 1.0;

/// Default attacker acquisition / engagement range in world units.
pub const DEFAULT_ATTACK_RANGE: f64 = 1000.0;

/// Angular tolerance within which an attacker counts as aimed (degrees).
pub const AIM_TOLERANCE_DEG: f64 = 5.0;

/// Turret slew rate in degrees per second of effective time.
pub const TURRET_ROTATION_DEG_PER_SEC: f64 = 90.0;

/// Projectile cruise speed in units per second of effective time.
pub const PROJECTILE_SPEED: f64 = 2000.0;

/// Damage applied by a projectile on impact.
pub const PROJECTILE_DAMAGE: f64 = 20.0;

/// Homing steering acceleration in units/s^2 of effective time.
pub const PROJECTILE_HOMING_ACCEL: f64 = 8000.0;

/// Projectile lifetime in seconds of effective forward time.
pub const PROJECTILE_LIFETIME_SECS: f64 = 5.0;

/// Distance at which a projectile counts as hitting its target.
pub const PROJECTILE_HIT_RADIUS: f64 = 25.0;

/// Structural integrity of a neutral capturable structure.
pub const CAPTURE_HP_MAX: f64 = 100.0;

/// Capture damage applied per second of effective time.
pub const CAPTURE_RATE: f64 = 10.0;

/// Maximum distance at which a capture beam stays connected.
pub const CAPTURE_RANGE: f64 = 1000.0;

/// Floor for the randomized gap between two spawns in a lane.
pub const MIN_SPAWN_STEP_SECS: f64 = 0.01;
