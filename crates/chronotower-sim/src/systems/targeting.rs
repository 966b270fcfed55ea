//! Range-based target acquisition.
//!
//! Each tick, every attack tower enqueues live hostiles inside its
//! engagement range and drops hostiles that have left it. Dropping the
//! current target leaves the slot empty; promotion happens in the
//! fire-control advance.

use hecs::World;

use chronotower_core::components::{Hostile, Platform, Weapon};
use chronotower_core::types::Position;

use crate::combat::TowerCombat;

pub fn run(world: &mut World) {
    let hostiles: Vec<(hecs::Entity, Position, bool)> = world
        .query::<(&Hostile, &Position)>()
        .iter()
        .map(|(e, (h, pos))| (e, *pos, h.is_alive()))
        .collect();

    for (_entity, (_platform, combat, weapon, tower_pos)) in
        world.query_mut::<(&Platform, &mut TowerCombat, &Weapon, &Position)>()
    {
        for (hostile, hostile_pos, alive) in &hostiles {
            let in_range = tower_pos.range_to(hostile_pos) <= weapon.attack_range;
            if in_range && *alive {
                combat.targets.add(*hostile);
            } else if !in_range {
                combat.targets.remove(*hostile);
            }
        }
    }
}
