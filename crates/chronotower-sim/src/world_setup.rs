//! Spawn factories for towers, structures, and hostiles.

use hecs::{Entity, World};

use chronotower_core::components::{CapturePoint, Hostile, PathFollower, Platform, Turret, Weapon};
use chronotower_core::enums::{HostileClass, Team};
use chronotower_core::path::Path;
use chronotower_core::types::Position;

use crate::combat::TowerCombat;

/// Movement and durability profile of a hostile class:
/// (move speed, health, bounty).
pub fn hostile_profile(class: HostileClass) -> (f64, f64, f64) {
    match class {
        HostileClass::Runner => (450.0, 60.0, 75.0),
        HostileClass::Soldier => (300.0, 100.0, 100.0),
        HostileClass::Juggernaut => (180.0, 300.0, 250.0),
    }
}

/// Spawn a defender attack tower.
pub fn spawn_attack_tower(world: &mut World, id: u32, position: Position, weapon: Weapon) -> Entity {
    let combat = TowerCombat::new(weapon.fire_rate);
    world.spawn((
        Platform {
            id,
            team: Team::Defender,
        },
        position,
        weapon,
        Turret::default(),
        combat,
    ))
}

/// Spawn a neutral capturable structure.
pub fn spawn_capture_structure(world: &mut World, id: u32, position: Position) -> Entity {
    world.spawn((
        Platform {
            id,
            team: Team::Neutral,
        },
        position,
        CapturePoint::default(),
    ))
}

/// Spawn a hostile at the head of a path.
pub fn spawn_hostile(
    world: &mut World,
    id: u32,
    class: HostileClass,
    path: &Path,
    path_index: usize,
) -> Entity {
    let (move_speed, health, bounty) = hostile_profile(class);
    world.spawn((
        Hostile {
            id,
            class,
            health,
            health_max: health,
            bounty,
            move_speed,
        },
        PathFollower {
            path_index,
            distance: 0.0,
        },
        path.sample(0.0),
    ))
}
