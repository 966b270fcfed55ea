//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whatever engine
//! state they need. Effects that must outlive the borrow (spawns,
//! despawns, damage) are returned as request lists for the engine to
//! apply.

pub mod capture;
pub mod cleanup;
pub mod fire_control;
pub mod movement;
pub mod orders;
pub mod projectile;
pub mod snapshot;
pub mod targeting;
pub mod wave_scheduler;
