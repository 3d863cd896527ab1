//! Pixel Wars - hold the tower against converging squares
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (spawning, motion, combat, upgrades)
//! - `game`: Game loop driver (phase machine, tick and fire schedules)
//! - `renderer`: Drawing sink abstraction and scene/HUD rendering
//! - `platform`: Browser canvas backend
//! - `settings`: Start level, seed and palette configuration
//! - `autopilot`: Scripted player for headless sessions

pub mod autopilot;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, InputEvent, Phase};
pub use settings::{Palette, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield is a fixed square of logical units
    pub const PLAYFIELD_SIZE: f32 = 750.0;
    /// Tower sits at floor(PLAYFIELD_SIZE / 2) on both axes
    pub const TOWER_POS: f32 = 375.0;

    /// Fixed tick period in milliseconds
    pub const TICK_MS: f64 = 10.0;
    /// Enemies only step on every Nth tick
    pub const ENEMY_STEP_INTERVAL: u64 = 5;
    /// Maximum ticks run per `advance` call before the backlog is dropped
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// Highest level a game may be configured to start at
    pub const MAX_START_LEVEL: u32 = 1_000;

    /// Tower defaults
    pub const TOWER_START_SIZE: u32 = 50;
    pub const TOWER_START_FIRE_SIZE: u32 = 5;
    pub const TOWER_START_FIRE_DELAY: u32 = 300;

    /// Projectile speed in units per tick
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Upgrade shop pricing and effects
    pub const UPGRADE_BASE_COST: u64 = 100;
    pub const FIRE_DELAY_STEP: u32 = 50;
    pub const MIN_FIRE_DELAY: u32 = 50;
    pub const FIRE_SIZE_STEP: u32 = 5;
}

/// Heading from `origin` to `target` in degrees, normalized to [0, 360)
#[inline]
pub fn heading_degrees(origin: Vec2, target: Vec2) -> f32 {
    let delta = target - origin;
    let degrees = delta.y.atan2(delta.x).to_degrees();
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

/// Convert polar (r, heading in degrees) to a cartesian vector
#[inline]
pub fn polar_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Velocity of magnitude `speed` pointing from `origin` toward `target`
#[inline]
pub fn velocity_toward(origin: Vec2, target: Vec2, speed: f32) -> Vec2 {
    polar_to_cartesian(speed, heading_degrees(origin, target))
}

/// Whether a point lies inside the playfield (edges inclusive)
#[inline]
pub fn in_playfield(pos: Vec2) -> bool {
    use consts::PLAYFIELD_SIZE;
    (0.0..=PLAYFIELD_SIZE).contains(&pos.x) && (0.0..=PLAYFIELD_SIZE).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_degrees_range() {
        let origin = Vec2::new(375.0, 375.0);
        assert!((heading_degrees(origin, Vec2::new(400.0, 375.0)) - 0.0).abs() < 1e-4);
        assert!((heading_degrees(origin, Vec2::new(375.0, 400.0)) - 90.0).abs() < 1e-4);
        assert!((heading_degrees(origin, Vec2::new(350.0, 375.0)) - 180.0).abs() < 1e-4);
        // Negative atan2 results wrap into [0, 360)
        assert!((heading_degrees(origin, Vec2::new(375.0, 350.0)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_toward_magnitude() {
        let v = velocity_toward(Vec2::ZERO, Vec2::new(3.0, 4.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
        assert!((v.x - 6.0).abs() < 1e-4);
        assert!((v.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_in_playfield_edges() {
        assert!(in_playfield(Vec2::new(0.0, 750.0)));
        assert!(!in_playfield(Vec2::new(-0.1, 10.0)));
        assert!(!in_playfield(Vec2::new(10.0, 750.5)));
    }
}
