//! World state and core simulation types
//!
//! Everything a tick reads or mutates lives here. There is no in-place
//! reset: a new game is a new `World`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Square};
use super::upgrade::UpgradeKind;
use crate::consts::*;

/// The player's tower, fixed at the playfield center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub pos: Vec2,
    /// Hit points, also the collision radius
    pub size: u32,
    /// Radius and damage of fired projectiles
    pub fire_size: u32,
    /// Milliseconds between shots while firing
    pub fire_delay: u32,
    pub score: u64,
    /// Enemies destroyed since the last level-up
    pub squares_destroyed: u32,
    pub upgrades_bought: u32,
}

impl Default for Tower {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(TOWER_POS),
            size: TOWER_START_SIZE,
            fire_size: TOWER_START_FIRE_SIZE,
            fire_delay: TOWER_START_FIRE_DELAY,
            score: 0,
            squares_destroyed: 0,
            upgrades_bought: 0,
        }
    }
}

impl Tower {
    /// Collision body. The radius is the full `size`, twice the drawn radius.
    pub fn body(&self) -> Circle {
        Circle::new(self.pos, self.size as f32)
    }
}

/// A hostile square converging on the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Hit points and side length
    pub size: u32,
}

impl Enemy {
    pub fn body(&self) -> Square {
        Square::new(self.pos, self.size as f32)
    }
}

/// A projectile fired by the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius and damage
    pub size: u32,
}

impl Projectile {
    pub fn body(&self) -> Circle {
        Circle::new(self.pos, self.size as f32)
    }
}

/// Gameplay events emitted during a tick (or an input between ticks)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnemySpawned { id: u32, size: u32 },
    EnemyDamaged { id: u32, damage: u32 },
    EnemyDestroyed { id: u32, size: u32 },
    TowerDamaged { damage: u32 },
    TowerDestroyed,
    ProjectileFired { id: u32 },
    ProjectileExpired { id: u32 },
    LevelUp { level: u32 },
    UpgradePurchased { kind: UpgradeKind, cost: u64 },
}

/// Complete world state (serializable snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub tower: Tower,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles in fire order
    pub projectiles: Vec<Projectile>,
    /// Current level (>= 1)
    pub level: u32,
    /// Simulation tick counter
    pub tick_number: u64,
    /// Events since the last tick started
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(1)
    }
}

impl World {
    /// Create a fresh world starting at `start_level` (clamped to at least 1)
    pub fn new(start_level: u32) -> Self {
        Self {
            tower: Tower::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            level: start_level.max(1),
            tick_number: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Upgrade price at the current purchase count
    pub fn upgrade_cost(&self) -> u64 {
        UPGRADE_BASE_COST + UPGRADE_BASE_COST * u64::from(self.tower.upgrades_bought)
    }

    /// Whether the next level-up threshold has been met
    pub fn level_up_due(&self) -> bool {
        self.tower.squares_destroyed >= self.level
    }

    /// Advance the level and reset the destroyed counter.
    /// Returns the new level when a level-up happened.
    pub fn apply_level_up(&mut self) -> Option<u32> {
        if !self.level_up_due() {
            return None;
        }
        self.level = self.level.saturating_add(1);
        self.tower.squares_destroyed = 0;
        self.events.push(GameEvent::LevelUp { level: self.level });
        log::info!("Level up -> {}", self.level);
        Some(self.level)
    }
}
