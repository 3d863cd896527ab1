//! Collision and combat resolution
//!
//! Runs once per tick after motion. Each enemy is first tested against the
//! tower, then against every live projectile in fire order. Removals are
//! only flagged during the pass; both collections are compacted once at the
//! end, so nothing shifts under the loops.

use super::collision::circle_square_overlap;
use super::state::{GameEvent, World};
use crate::in_playfield;

/// Summary of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Tower could not absorb a collision; the game is over
    pub tower_destroyed: bool,
    /// Enemies killed by projectiles this pass
    pub enemies_destroyed: u32,
    /// Enemies that rammed the tower and were absorbed
    pub enemies_absorbed: u32,
    /// Projectiles culled for leaving the playfield
    pub projectiles_expired: u32,
}

/// Resolve tower and projectile hits against every enemy
pub fn resolve(world: &mut World) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    let World {
        tower,
        enemies,
        projectiles,
        events,
        ..
    } = world;

    // Projectiles that left the field never take part in combat
    let mut projectile_live: Vec<bool> = projectiles
        .iter()
        .map(|p| {
            let inside = in_playfield(p.pos);
            if !inside {
                events.push(GameEvent::ProjectileExpired { id: p.id });
                outcome.projectiles_expired += 1;
            }
            inside
        })
        .collect();
    let mut enemy_live = vec![true; enemies.len()];

    'enemies: for (ei, enemy) in enemies.iter_mut().enumerate() {
        if circle_square_overlap(&tower.body(), &enemy.body()) {
            if tower.size > enemy.size {
                tower.size -= enemy.size;
                enemy_live[ei] = false;
                outcome.enemies_absorbed += 1;
                events.push(GameEvent::TowerDamaged { damage: enemy.size });
                continue;
            }
            // Remaining enemies are left as they are
            outcome.tower_destroyed = true;
            events.push(GameEvent::TowerDestroyed);
            break;
        }

        for (pi, projectile) in projectiles.iter_mut().enumerate() {
            if !projectile_live[pi] {
                continue;
            }
            if !circle_square_overlap(&projectile.body(), &enemy.body()) {
                continue;
            }

            if enemy.size > projectile.size + 1 {
                // Enemy soaks the hit
                enemy.size -= projectile.size;
                projectile_live[pi] = false;
                tower.score += u64::from(projectile.size);
                events.push(GameEvent::EnemyDamaged {
                    id: enemy.id,
                    damage: projectile.size,
                });
                continue;
            }

            // Enemy destroyed; an oversized projectile carries on, shrunk
            if projectile.size > enemy.size {
                projectile.size -= enemy.size;
            } else {
                projectile_live[pi] = false;
            }
            enemy_live[ei] = false;
            tower.score += u64::from(enemy.size);
            tower.squares_destroyed += 1;
            outcome.enemies_destroyed += 1;
            events.push(GameEvent::EnemyDestroyed {
                id: enemy.id,
                size: enemy.size,
            });
            continue 'enemies;
        }
    }

    compact(enemies, &enemy_live);
    compact(projectiles, &projectile_live);

    outcome
}

/// Keep only the entries whose flag is set
fn compact<T>(items: &mut Vec<T>, live: &[bool]) {
    let mut flags = live.iter();
    items.retain(|_| flags.next().copied().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Projectile};
    use glam::Vec2;

    fn enemy(id: u32, x: f32, y: f32, size: u32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size,
        }
    }

    fn projectile(id: u32, x: f32, y: f32, size: u32) -> Projectile {
        Projectile {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size,
        }
    }

    #[test]
    fn test_partial_hit_shrinks_enemy_and_consumes_projectile() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        // 10 - 8 = 2 > 1: the largest projectile the enemy survives
        world.projectiles.push(projectile(2, 105.0, 105.0, 8));

        let outcome = resolve(&mut world);

        assert_eq!(outcome.enemies_destroyed, 0);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].size, 2);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.tower.score, 8);
        assert_eq!(world.tower.squares_destroyed, 0);
    }

    #[test]
    fn test_projectile_one_below_enemy_size_destroys() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        // 10 - 9 = 1 is not > 1, so the enemy is destroyed
        world.projectiles.push(projectile(2, 105.0, 105.0, 9));

        let outcome = resolve(&mut world);

        assert_eq!(outcome.enemies_destroyed, 1);
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.tower.score, 10);
        assert_eq!(world.tower.squares_destroyed, 1);
    }

    #[test]
    fn test_oversized_projectile_survives_shrunk() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        world.projectiles.push(projectile(2, 105.0, 105.0, 25));

        resolve(&mut world);

        assert!(world.enemies.is_empty());
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].size, 15);
        assert_eq!(world.tower.score, 10);
        assert_eq!(world.tower.squares_destroyed, 1);
    }

    #[test]
    fn test_equal_sizes_consume_both() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        world.projectiles.push(projectile(2, 105.0, 105.0, 10));

        resolve(&mut world);

        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.tower.score, 10);
    }

    #[test]
    fn test_destroyed_enemy_not_hit_again() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        world.projectiles.push(projectile(2, 105.0, 105.0, 10));
        world.projectiles.push(projectile(3, 106.0, 106.0, 10));

        resolve(&mut world);

        assert_eq!(world.tower.squares_destroyed, 1);
        assert_eq!(world.tower.score, 10);
        // The second projectile was never spent
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].id, 3);
    }

    #[test]
    fn test_surviving_projectile_moves_on_to_next_enemy() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        world.enemies.push(enemy(2, 108.0, 100.0, 10));
        world.projectiles.push(projectile(3, 107.0, 105.0, 25));

        resolve(&mut world);

        // 25 -> 15 after the first kill, 15 -> 5 after the second
        assert!(world.enemies.is_empty());
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].size, 5);
        assert_eq!(world.tower.squares_destroyed, 2);
        assert_eq!(world.tower.score, 20);
    }

    #[test]
    fn test_tower_absorbs_smaller_enemy() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 370.0, 370.0, 10));

        let outcome = resolve(&mut world);

        assert!(!outcome.tower_destroyed);
        assert_eq!(outcome.enemies_absorbed, 1);
        assert_eq!(world.tower.size, 40);
        assert!(world.enemies.is_empty());
        // Ramming earns nothing
        assert_eq!(world.tower.score, 0);
        assert_eq!(world.tower.squares_destroyed, 0);
    }

    #[test]
    fn test_equal_sized_enemy_destroys_tower() {
        let mut world = World::new(1);
        world.enemies.push(enemy(1, 370.0, 370.0, 50));
        world.enemies.push(enemy(2, 100.0, 100.0, 10));
        world.projectiles.push(projectile(3, 105.0, 105.0, 5));

        let outcome = resolve(&mut world);

        assert!(outcome.tower_destroyed);
        assert_eq!(world.tower.size, 50);
        // Resolution halted: the second enemy was never processed
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.enemies[1].size, 10);
        assert_eq!(world.projectiles.len(), 1);
        assert!(world.events.contains(&GameEvent::TowerDestroyed));
    }

    #[test]
    fn test_out_of_bounds_projectiles_culled_without_enemies() {
        let mut world = World::new(1);
        world.projectiles.push(projectile(1, -1.0, 300.0, 5));
        world.projectiles.push(projectile(2, 300.0, 300.0, 5));
        world.projectiles.push(projectile(3, 300.0, 751.0, 5));

        let outcome = resolve(&mut world);

        assert_eq!(outcome.projectiles_expired, 2);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].id, 2);
    }

    #[test]
    fn test_out_of_bounds_projectile_has_no_effect() {
        let mut world = World::new(1);
        // Enemy hugging the left edge, projectile just past it but overlapping
        world.enemies.push(enemy(1, 0.0, 300.0, 10));
        world.projectiles.push(projectile(2, -2.0, 305.0, 5));

        resolve(&mut world);

        assert_eq!(world.enemies[0].size, 10);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.tower.score, 0);
    }

    #[test]
    fn test_kill_order_preserved_after_compaction() {
        let mut world = World::new(3);
        world.enemies.push(enemy(1, 100.0, 100.0, 10));
        world.enemies.push(enemy(2, 300.0, 100.0, 10));
        world.enemies.push(enemy(3, 500.0, 100.0, 10));
        world.projectiles.push(projectile(4, 305.0, 105.0, 10));

        resolve(&mut world);

        let ids: Vec<u32> = world.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
