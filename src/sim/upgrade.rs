//! Upgrade shop: score-funded permanent tower improvements

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, World};
use crate::consts::*;
use crate::settings::SettingsError;

/// The three purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Shorter delay between shots
    Speed,
    /// Bigger (and harder hitting) projectiles
    BulletSize,
    /// Restore the tower to its starting hit points
    Repair,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Speed, UpgradeKind::BulletSize, UpgradeKind::Repair];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Speed => "speed",
            UpgradeKind::BulletSize => "bullet",
            UpgradeKind::Repair => "hp",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "speed" | "firespeed" => Ok(UpgradeKind::Speed),
            "bullet" | "bullet_size" | "bulletsize" => Ok(UpgradeKind::BulletSize),
            "hp" | "repair" => Ok(UpgradeKind::Repair),
            other => Err(SettingsError::UnknownUpgrade(other.to_string())),
        }
    }
}

/// Whether the fire delay has hit its floor (speed upgrades are closed)
#[inline]
pub fn fire_delay_at_minimum(world: &World) -> bool {
    world.tower.fire_delay <= MIN_FIRE_DELAY
}

/// Whether `kind` could be bought right now
pub fn can_buy(world: &World, kind: UpgradeKind) -> bool {
    if kind == UpgradeKind::Speed && fire_delay_at_minimum(world) {
        return false;
    }
    world.tower.score >= world.upgrade_cost()
}

/// Try to buy an upgrade. Unaffordable (or maxed-out speed) purchases are
/// silently rejected and leave the world untouched. Returns whether the
/// purchase went through.
pub fn buy_upgrade(world: &mut World, kind: UpgradeKind) -> bool {
    if !can_buy(world, kind) {
        log::debug!(
            "Upgrade {} rejected (score {}, cost {})",
            kind,
            world.tower.score,
            world.upgrade_cost()
        );
        return false;
    }

    let cost = world.upgrade_cost();
    let tower = &mut world.tower;
    match kind {
        UpgradeKind::Speed => {
            tower.fire_delay = tower.fire_delay.saturating_sub(FIRE_DELAY_STEP).max(MIN_FIRE_DELAY);
        }
        UpgradeKind::BulletSize => tower.fire_size += FIRE_SIZE_STEP,
        // Resets to the starting value; it does not raise a cap
        UpgradeKind::Repair => tower.size = TOWER_START_SIZE,
    }
    tower.score -= cost;
    tower.upgrades_bought += 1;

    world.events.push(GameEvent::UpgradePurchased { kind, cost });
    log::debug!("Bought {} for {}", kind, cost);
    true
}
