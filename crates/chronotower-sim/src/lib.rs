//! Simulation engine for CHRONOTOWER.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate under a
//! player-controlled (and reversible) clock scale, and produces
//! `Snapshot`s for the frontend.

pub mod clock;
pub mod combat;
pub mod engine;
pub mod mission;
pub mod systems;
pub mod world_setup;

pub use chronotower_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
