//! Linear motion for projectiles and enemies

use super::state::{Enemy, Projectile, World};
use crate::consts::ENEMY_STEP_INTERVAL;

/// Advance every projectile by its velocity
pub fn move_projectiles(projectiles: &mut [Projectile]) {
    for projectile in projectiles {
        projectile.pos += projectile.vel;
    }
}

/// Advance every enemy by its velocity
pub fn move_enemies(enemies: &mut [Enemy]) {
    for enemy in enemies {
        enemy.pos += enemy.vel;
    }
}

/// Whether enemies step on this tick
#[inline]
pub fn enemies_step_on(tick_number: u64) -> bool {
    tick_number % ENEMY_STEP_INTERVAL == 0
}

/// Run the motion passes for the world's current tick
pub fn integrate(world: &mut World) {
    move_projectiles(&mut world.projectiles);
    if enemies_step_on(world.tick_number) {
        move_enemies(&mut world.enemies);
    }
}
