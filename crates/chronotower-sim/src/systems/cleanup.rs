//! Deferred entity removal.
//!
//! Systems never despawn mid-iteration; the engine buffers entities
//! here and this system drains the buffer at the end of the tick.

use hecs::{Entity, World};

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        // Duplicate buffer entries are harmless.
        let _ = world.despawn(entity);
    }
}
