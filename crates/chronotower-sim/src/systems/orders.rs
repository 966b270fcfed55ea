//! Order state machine for attack towers.
//!
//! Player order commands funnel through [`apply_order`]; [`run`]
//! handles the automatic transitions, chiefly reverting a capture order
//! once its target stops being a valid neutral structure in range.

use hecs::{Entity, World};

use chronotower_core::components::{CapturePoint, Platform, Weapon};
use chronotower_core::enums::{OrderState, Team};
use chronotower_core::events::SimEvent;
use chronotower_core::types::Position;

use crate::combat::TowerCombat;

/// Whether `target` is a neutral capturable structure.
fn is_capturable(world: &World, target: Entity) -> bool {
    if !world.contains(target) {
        return false;
    }
    let neutral = world
        .get::<&Platform>(target)
        .map(|p| p.team == Team::Neutral)
        .unwrap_or(false);
    neutral && world.get::<&CapturePoint>(target).is_ok()
}

/// Apply a player order to a tower.
///
/// A capture order against anything but a neutral structure falls back
/// to default attack orders. Entering any state clears the previous
/// state's assignments and drops the beam; the target queue persists.
pub fn apply_order(
    world: &mut World,
    tower: Entity,
    requested: OrderState,
    objective: Option<Entity>,
    events: &mut Vec<SimEvent>,
) {
    let mut state = requested;
    let mut capture_target = None;
    let mut forced_target = None;
    match requested {
        OrderState::CaptureTower => match objective {
            Some(target) if is_capturable(world, target) => capture_target = Some(target),
            _ => state = OrderState::AttackEnemies,
        },
        OrderState::AttackBonus => match objective {
            Some(target) if world.contains(target) => forced_target = Some(target),
            _ => state = OrderState::AttackEnemies,
        },
        _ => {}
    }

    let tower_id = match world.get::<&Platform>(tower) {
        Ok(p) => p.id,
        Err(_) => return,
    };
    let Ok(combat) = world.query_one_mut::<&mut TowerCombat>(tower) else {
        return;
    };
    if combat.beam_active {
        events.push(SimEvent::CaptureBeamStopped { tower_id });
    }
    combat.clear_assignments();
    combat.order = state;
    combat.capture_target = capture_target;
    combat.forced_target = forced_target;
}

/// Automatic order transitions, evaluated every tick.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    let capturing: Vec<(Entity, u32, Position, f64, Option<Entity>)> = world
        .query::<(&Platform, &TowerCombat, &Weapon, &Position)>()
        .iter()
        .filter(|(_, (_, combat, _, _))| combat.order == OrderState::CaptureTower)
        .map(|(e, (platform, combat, weapon, pos))| {
            (e, platform.id, *pos, weapon.capture_range, combat.capture_target)
        })
        .collect();

    for (tower, tower_id, tower_pos, capture_range, target) in capturing {
        let still_valid = target.is_some_and(|t| {
            is_capturable(world, t)
                && world
                    .get::<&Position>(t)
                    .map(|p| tower_pos.range_to(&p) <= capture_range)
                    .unwrap_or(false)
        });
        if still_valid {
            continue;
        }
        // Capture complete or target lost: back to default orders.
        let Ok(combat) = world.query_one_mut::<&mut TowerCombat>(tower) else {
            continue;
        };
        if combat.beam_active {
            events.push(SimEvent::CaptureBeamStopped { tower_id });
        }
        combat.clear_assignments();
        combat.order = OrderState::AttackEnemies;
    }
}
