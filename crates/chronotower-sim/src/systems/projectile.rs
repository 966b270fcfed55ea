//! Projectile flight, homing, and impact detection.
//!
//! Forward time integrates position and steers homing rounds toward
//! their target; at zero scale rounds freeze in place; at negative
//! scale they retrace their trajectory with homing disabled.

use std::collections::HashMap;

use hecs::{Entity, World};

use chronotower_core::components::Hostile;
use chronotower_core::constants::{PROJECTILE_HIT_RADIUS, PROJECTILE_LIFETIME_SECS};
use chronotower_core::types::{Position, Velocity};

use crate::combat::Projectile;

/// A projectile reached its target.
pub struct Hit {
    pub target: Entity,
    pub damage: f64,
}

/// Closest distance from `point` to the segment `a..b`. Used as a swept
/// impact test so fast rounds cannot tunnel through the hit radius.
fn segment_distance(point: glam::DVec3, a: glam::DVec3, b: glam::DVec3) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Integrate all projectiles. Returns impacts plus the projectiles to
/// despawn (spent or expired).
pub fn run(world: &mut World, scale: f64, raw_dt: f64) -> (Vec<Hit>, Vec<Entity>) {
    let mut hits = Vec::new();
    let mut spent = Vec::new();
    if scale == 0.0 {
        return (hits, spent);
    }
    let dt_eff = raw_dt * scale;

    let live: HashMap<Entity, Position> = world
        .query::<(&Hostile, &Position)>()
        .iter()
        .filter(|(_, (h, _))| h.is_alive())
        .map(|(e, (_, pos))| (e, *pos))
        .collect();

    for (entity, (proj, pos, vel)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Velocity)>()
    {
        if scale > 0.0 {
            proj.age_secs += dt_eff;
            if proj.age_secs >= PROJECTILE_LIFETIME_SECS {
                spent.push(entity);
                continue;
            }
            let target_pos = proj.target.and_then(|t| live.get(&t).copied());
            if proj.target.is_some() && target_pos.is_none() {
                // Target died mid-flight; coast straight.
                proj.target = None;
            }
            if proj.homing {
                if let Some(target_pos) = target_pos {
                    let to_target = target_pos.as_vec() - pos.as_vec();
                    let steered = vel.as_vec() + to_target.normalize_or_zero() * proj.homing_accel * dt_eff;
                    *vel = Velocity::from_vec(steered.normalize_or_zero() * proj.speed);
                }
            }
        } else {
            // Rewind: fly the trajectory backwards, no steering, and
            // un-age so a resumed round gets its full remaining life.
            proj.age_secs = (proj.age_secs + dt_eff).max(0.0);
        }

        let before = pos.as_vec();
        *pos = Position::from_vec(before + vel.as_vec() * dt_eff);

        if scale > 0.0 {
            if let Some(target) = proj.target {
                if let Some(target_pos) = live.get(&target) {
                    if segment_distance(target_pos.as_vec(), before, pos.as_vec())
                        <= PROJECTILE_HIT_RADIUS
                    {
                        hits.push(Hit {
                            target,
                            damage: proj.damage,
                        });
                        spent.push(entity);
                    }
                }
            }
        }
    }

    (hits, spent)
}
