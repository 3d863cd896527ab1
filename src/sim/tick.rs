//! Fixed timestep simulation tick
//!
//! One tick: count -> replenish -> move -> present -> resolve -> level up.
//! Presentation happens between motion and resolution, so a frame shows
//! bodies at their new positions before hits are settled.

use rand::Rng;

use super::combat::{ResolveOutcome, resolve};
use super::motion::integrate;
use super::spawn::replenish;
use super::state::World;

/// What a single tick produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub resolve: ResolveOutcome,
    /// New level, if the tick ended with a level-up
    pub leveled_up: Option<u32>,
}

impl TickOutcome {
    #[inline]
    pub fn game_over(&self) -> bool {
        self.resolve.tower_destroyed
    }
}

/// Advance the world by one tick.
///
/// `present` is called once with the moved-but-unresolved world.
pub fn tick<R, F>(world: &mut World, rng: &mut R, present: F) -> TickOutcome
where
    R: Rng,
    F: FnOnce(&World),
{
    world.events.clear();
    world.tick_number += 1;

    replenish(world, rng);
    integrate(world);

    present(world);

    let resolve = resolve(world);
    if resolve.tower_destroyed {
        return TickOutcome {
            resolve,
            leveled_up: None,
        };
    }

    TickOutcome {
        resolve,
        leveled_up: world.apply_level_up(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, GameEvent, Projectile};
    use crate::sim::weapon::fire;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tick_spawns_to_quota() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut world = World::new(3);

        for _ in 0..3 {
            tick(&mut world, &mut rng, |_| {});
        }
        assert_eq!(world.enemies.len(), 3);
        assert_eq!(world.tick_number, 3);

        tick(&mut world, &mut rng, |_| {});
        assert_eq!(world.enemies.len(), 3);
    }

    #[test]
    fn test_present_sees_moved_unresolved_world() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = World::new(1);
        world.enemies.push(Enemy {
            id: 90,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 10,
        });
        world.projectiles.push(Projectile {
            id: 91,
            pos: Vec2::new(95.0, 105.0),
            vel: Vec2::new(10.0, 0.0),
            size: 5,
        });

        let mut seen = None;
        tick(&mut world, &mut rng, |w| {
            seen = Some((w.projectiles.len(), w.projectiles[0].pos));
        });

        // Renderer saw the projectile after motion but before it was spent
        assert_eq!(seen, Some((1, Vec2::new(105.0, 105.0))));
        assert!(world.projectiles.is_empty());
        assert_eq!(world.enemies[0].size, 5);
    }

    #[test]
    fn test_level_up_once_per_tick() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut world = World::new(1);
        // Two kills in one tick at level 1 still only level up once
        for (id, x) in [(50, 100.0), (51, 300.0)] {
            world.enemies.push(Enemy {
                id,
                pos: Vec2::new(x, 100.0),
                vel: Vec2::ZERO,
                size: 10,
            });
            world.projectiles.push(Projectile {
                id: id + 10,
                pos: Vec2::new(x + 5.0, 105.0),
                vel: Vec2::ZERO,
                size: 10,
            });
        }

        let outcome = tick(&mut world, &mut rng, |_| {});

        assert_eq!(outcome.resolve.enemies_destroyed, 2);
        assert_eq!(outcome.leveled_up, Some(2));
        assert_eq!(world.level, 2);
        assert_eq!(world.tower.squares_destroyed, 0);
        assert_eq!(
            world
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_extreme_level_tick_does_not_overflow() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut world = World::new(u32::MAX);
        tick(&mut world, &mut rng, |_| {});
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].size, u32::MAX);
    }

    #[test]
    fn test_game_over_when_tower_overrun() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = World::new(1);
        world.tower.size = 50;
        world.enemies.push(Enemy {
            id: 1,
            pos: Vec2::new(370.0, 370.0),
            vel: Vec2::ZERO,
            size: 50,
        });

        let outcome = tick(&mut world, &mut rng, |_| {});
        assert!(outcome.game_over());
        assert_eq!(outcome.leveled_up, None);
    }

    #[test]
    fn test_scenario_first_shot_halves_left_enemy() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut world = World::new(1);
        // Enemy directly left of the tower, closing at speed 1
        world.enemies.push(Enemy {
            id: 100,
            pos: Vec2::new(200.0, 370.0),
            vel: Vec2::new(1.0, 0.0),
            size: 10,
        });
        fire(&mut world, Vec2::new(0.0, 375.0));

        let mut ticks = 0;
        while !world.projectiles.is_empty() && ticks < 100 {
            tick(&mut world, &mut rng, |_| {});
            ticks += 1;
        }

        assert!(world.projectiles.is_empty());
        let target = world.enemies.iter().find(|e| e.id == 100).unwrap();
        assert_eq!(target.size, 5);
        assert_eq!(world.tower.score, 5);
        assert_eq!(world.tower.squares_destroyed, 0);
        assert_eq!(world.level, 1);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut world1 = World::new(5);
        let mut world2 = World::new(5);

        for step in 0..200 {
            if step % 30 == 0 {
                fire(&mut world1, Vec2::new(0.0, 0.0));
                fire(&mut world2, Vec2::new(0.0, 0.0));
            }
            tick(&mut world1, &mut rng1, |_| {});
            tick(&mut world2, &mut rng2, |_| {});
        }

        assert_eq!(world1.tick_number, world2.tick_number);
        assert_eq!(world1.enemies, world2.enemies);
        assert_eq!(world1.projectiles, world2.projectiles);
        assert_eq!(world1.tower, world2.tower);
    }
}
