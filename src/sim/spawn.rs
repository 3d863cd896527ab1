//! Enemy spawning along the playfield edges

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, World};
use crate::consts::{PLAYFIELD_SIZE, TOWER_POS};
use crate::velocity_toward;

/// Playfield edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Map a roll in [0, 40) onto four 10-wide bands
    pub fn from_roll(roll: f32) -> Self {
        if roll < 10.0 {
            Edge::Left
        } else if roll < 20.0 {
            Edge::Right
        } else if roll < 30.0 {
            Edge::Top
        } else {
            Edge::Bottom
        }
    }

    /// Point on this edge at `offset` along it
    pub fn point(self, offset: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(0.0, offset),
            Edge::Right => Vec2::new(PLAYFIELD_SIZE, offset),
            Edge::Top => Vec2::new(offset, 0.0),
            Edge::Bottom => Vec2::new(offset, PLAYFIELD_SIZE),
        }
    }
}

/// Side length of enemies spawned at `level`
#[inline]
pub fn enemy_size_for_level(level: u32) -> u32 {
    10u32.saturating_add(10u32.saturating_mul(level / 10))
}

/// Speed (units per enemy step) of enemies spawned at `level`
#[inline]
pub fn enemy_speed_for_level(level: u32) -> f32 {
    (level / 10 + 1) as f32
}

/// Roll a new enemy for `level`. The caller assigns the ID.
pub fn roll_enemy<R: Rng>(rng: &mut R, level: u32, id: u32) -> Enemy {
    let edge = Edge::from_roll(rng.random_range(0.0..40.0));
    let offset = rng.random_range(1..=PLAYFIELD_SIZE as u32) as f32;
    let pos = edge.point(offset);

    Enemy {
        id,
        pos,
        vel: velocity_toward(pos, Vec2::splat(TOWER_POS), enemy_speed_for_level(level)),
        size: enemy_size_for_level(level),
    }
}

/// Spawn one enemy into the world at its current level
pub fn spawn_enemy<R: Rng>(world: &mut World, rng: &mut R) -> u32 {
    let id = world.next_entity_id();
    let enemy = roll_enemy(rng, world.level, id);
    world.events.push(GameEvent::EnemySpawned {
        id,
        size: enemy.size,
    });
    world.enemies.push(enemy);
    id
}

/// Top the field up by a single enemy when below the level's quota
pub fn replenish<R: Rng>(world: &mut World, rng: &mut R) -> Option<u32> {
    if world.enemies.len() < world.level as usize {
        Some(spawn_enemy(world, rng))
    } else {
        None
    }
}
