//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;
pub mod weapon;

pub use collision::{Circle, Square, circle_square_overlap};
pub use combat::{ResolveOutcome, resolve};
pub use spawn::{enemy_size_for_level, enemy_speed_for_level, spawn_enemy};
pub use state::{Enemy, GameEvent, Projectile, Tower, World};
pub use tick::{TickOutcome, tick};
pub use upgrade::{UpgradeKind, buy_upgrade, can_buy, fire_delay_at_minimum};
pub use weapon::fire;
