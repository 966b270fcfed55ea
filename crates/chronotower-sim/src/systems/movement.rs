//! Hostile path advancement.
//!
//! Hostiles progress by arc length along their assigned path. At zero
//! or negative scale they hold position; the warp never walks a hostile
//! backwards. A hostile that reaches the end of its path leaks.

use hecs::{Entity, World};

use chronotower_core::components::{Hostile, PathFollower};
use chronotower_core::path::Path;
use chronotower_core::types::Position;

/// Advance all live hostiles; returns those that reached the exit.
pub fn run(world: &mut World, scale: f64, raw_dt: f64, paths: &[Path]) -> Vec<Entity> {
    let mut leaked = Vec::new();
    if scale <= 0.0 {
        return leaked;
    }
    let dt_eff = raw_dt * scale;

    for (entity, (hostile, follower, pos)) in
        world.query_mut::<(&Hostile, &mut PathFollower, &mut Position)>()
    {
        if !hostile.is_alive() {
            continue;
        }
        let Some(path) = paths.get(follower.path_index) else {
            continue;
        };
        follower.distance += hostile.move_speed * dt_eff;
        if follower.distance >= path.length() {
            follower.distance = path.length();
            leaked.push(entity);
        }
        *pos = path.sample(follower.distance);
    }

    leaked
}
