//! Turret rotation, aim checks, and weapon cycling.
//!
//! Runs only while the clock moves forward. Each tower first advances
//! its target queue, then slews toward the engaged target, and finally
//! ticks its weapon cooldown; a cycle completed while aimed at a live
//! target produces a fire request for the engine to turn into a
//! projectile.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};

use chronotower_core::components::{Hostile, Platform, Turret, Weapon};
use chronotower_core::events::SimEvent;
use chronotower_core::types::Position;

use crate::combat::TowerCombat;

/// A weapon cycled while aimed; the engine spawns the round.
pub struct FireRequest {
    pub tower: Entity,
    pub target: Entity,
    pub origin: Position,
    pub weapon: Weapon,
}

/// Wrap an angle difference into (-pi, pi].
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    if wrapped > std::f64::consts::PI {
        wrapped - std::f64::consts::TAU
    } else {
        wrapped
    }
}

/// Slew the turret toward `to_target` and report whether it is within
/// aim tolerance afterwards.
fn rotate_and_check_aim(turret: &mut Turret, to_target: DVec3, dt_eff: f64) -> bool {
    let mut aim_dir = to_target;
    if turret.yaw_only {
        aim_dir.z = 0.0;
    }
    if aim_dir.length_squared() <= f64::EPSILON {
        return true;
    }

    let step = turret.rotation_speed * dt_eff;
    let desired_yaw = aim_dir.y.atan2(aim_dir.x);
    turret.yaw += wrap_angle(desired_yaw - turret.yaw).clamp(-step, step);
    let desired_pitch = if turret.yaw_only {
        0.0
    } else {
        aim_dir.z.atan2(aim_dir.truncate().length())
    };
    turret.pitch += wrap_angle(desired_pitch - turret.pitch).clamp(-step, step);

    let facing = DVec3::new(
        turret.yaw.cos() * turret.pitch.cos(),
        turret.yaw.sin() * turret.pitch.cos(),
        turret.pitch.sin(),
    );
    facing.angle_between(aim_dir) <= turret.aim_tolerance
}

pub fn run(
    world: &mut World,
    scale: f64,
    raw_dt: f64,
    events: &mut Vec<SimEvent>,
) -> Vec<FireRequest> {
    let mut requests = Vec::new();
    if scale <= 0.0 {
        return requests;
    }
    let dt_eff = raw_dt * scale;

    // (position, external id) of every live hostile.
    let live: HashMap<Entity, (Position, u32)> = world
        .query::<(&Hostile, &Position)>()
        .iter()
        .filter(|(_, (h, _))| h.is_alive())
        .map(|(e, (h, pos))| (e, (*pos, h.id)))
        .collect();

    let towers: Vec<Entity> = world
        .query::<(&Platform, &TowerCombat)>()
        .iter()
        .map(|(e, _)| e)
        .collect();

    for tower in towers {
        let Ok((platform, combat, turret, weapon, tower_pos)) = world
            .query_one_mut::<(&Platform, &mut TowerCombat, &mut Turret, &Weapon, &Position)>(tower)
        else {
            continue;
        };
        let tower_pos = *tower_pos;

        combat.targets.advance(|e| live.contains_key(&e));

        let gate_open = combat.order.allows_weapons();
        let target = if gate_open { combat.targets.current() } else { None };

        combat.aimed = match target.and_then(|t| live.get(&t)) {
            Some((target_pos, _)) => {
                let to_target = target_pos.as_vec() - tower_pos.as_vec();
                rotate_and_check_aim(turret, to_target, dt_eff)
            }
            None => false,
        };

        let may_fire = gate_open && combat.aimed && target.is_some();
        if combat.fire.tick(dt_eff, weapon.fire_rate, may_fire) {
            if let Some((target, &(_, target_id))) = target.and_then(|t| live.get(&t).map(|v| (t, v)))
            {
                events.push(SimEvent::ReadyToFire {
                    tower_id: platform.id,
                    target_id,
                });
                requests.push(FireRequest {
                    tower,
                    target,
                    origin: tower_pos,
                    weapon: *weapon,
                });
            }
        }
    }

    requests
}
