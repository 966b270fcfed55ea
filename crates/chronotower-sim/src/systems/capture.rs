//! Capture beam drain on neutral structures.
//!
//! Runs only while the clock moves forward; while paused or rewinding a
//! connected beam stays connected but drains nothing. When a
//! structure's integrity reaches zero it flips to the capturer's team
//! with integrity reset to full.

use hecs::{Entity, World};

use chronotower_core::components::{CapturePoint, Platform, Weapon};
use chronotower_core::enums::{OrderState, Team};
use chronotower_core::events::SimEvent;
use chronotower_core::types::Position;

use crate::combat::TowerCombat;

pub fn run(world: &mut World, scale: f64, raw_dt: f64, events: &mut Vec<SimEvent>) {
    if scale <= 0.0 {
        return;
    }
    let dt_eff = raw_dt * scale;

    let capturing: Vec<(Entity, u32, Team, Position, f64, f64, Entity)> = world
        .query::<(&Platform, &TowerCombat, &Weapon, &Position)>()
        .iter()
        .filter(|(_, (_, combat, _, _))| combat.order == OrderState::CaptureTower)
        .filter_map(|(e, (platform, combat, weapon, pos))| {
            combat.capture_target.map(|target| {
                (
                    e,
                    platform.id,
                    platform.team,
                    *pos,
                    weapon.capture_rate,
                    weapon.capture_range,
                    target,
                )
            })
        })
        .collect();

    for (tower, tower_id, tower_team, tower_pos, rate, range, target) in capturing {
        // Validity is re-checked here because the orders pass ran before
        // this tick's movement; a stale assignment drains nothing.
        let in_range = world
            .get::<&Position>(target)
            .map(|p| tower_pos.range_to(&p) <= range)
            .unwrap_or(false);
        let neutral = world
            .get::<&Platform>(target)
            .map(|p| p.team == Team::Neutral)
            .unwrap_or(false);
        if !in_range || !neutral {
            continue;
        }

        let structure_id = match world.get::<&Platform>(target) {
            Ok(p) => p.id,
            Err(_) => continue,
        };
        let Ok(point) = world.query_one_mut::<&mut CapturePoint>(target) else {
            continue;
        };
        point.hp = (point.hp - rate * dt_eff).max(0.0);
        let captured = point.hp <= 0.0;
        if captured {
            point.hp = point.hp_max;
        }
        let (hp, hp_max) = (point.hp, point.hp_max);
        events.push(SimEvent::CaptureProgress {
            structure_id,
            hp: if captured { 0.0 } else { hp },
            hp_max,
        });

        if captured {
            if let Ok(platform) = world.query_one_mut::<&mut Platform>(target) {
                platform.team = tower_team;
            }
            events.push(SimEvent::StructureCaptured {
                structure_id,
                new_owner: tower_team,
            });
            if let Ok(combat) = world.query_one_mut::<&mut TowerCombat>(tower) {
                if combat.beam_active {
                    events.push(SimEvent::CaptureBeamStopped { tower_id });
                }
                combat.clear_assignments();
                combat.order = OrderState::AttackEnemies;
            }
        } else if let Ok(combat) = world.query_one_mut::<&mut TowerCombat>(tower) {
            if !combat.beam_active {
                combat.beam_active = true;
                events.push(SimEvent::CaptureBeamStarted {
                    tower_id,
                    structure_id,
                });
            }
        }
    }
}
