//! Projectile creation for the tower's fire action

use glam::Vec2;

use super::state::{GameEvent, Projectile, World};
use crate::consts::PROJECTILE_SPEED;
use crate::velocity_toward;

/// Fire one projectile from the tower toward `aim`.
///
/// The projectile starts at the tower center with the tower's current
/// `fire_size`. Returns the new projectile's ID.
pub fn fire(world: &mut World, aim: Vec2) -> u32 {
    let id = world.next_entity_id();
    let origin = world.tower.pos;
    world.projectiles.push(Projectile {
        id,
        pos: origin,
        vel: velocity_toward(origin, aim, PROJECTILE_SPEED),
        size: world.tower.fire_size,
    });
    world.events.push(GameEvent::ProjectileFired { id });
    id
}
