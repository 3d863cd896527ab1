//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Mapping pointer positions into playfield coordinates
//! - Reading the start level from the host element
//! - Drawing onto a 2D canvas (web only)

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::PLAYFIELD_SIZE;
use crate::settings::Settings;
use crate::sim::UpgradeKind;

/// Attribute on the canvas element that selects the start level
pub const START_LEVEL_ATTRIBUTE: &str = "data-start-level";

/// Element ID of the control that buys `kind`
pub fn upgrade_control_id(kind: UpgradeKind) -> &'static str {
    match kind {
        UpgradeKind::Speed => "upgradeSpeed",
        UpgradeKind::BulletSize => "upgradeBullet",
        UpgradeKind::Repair => "upgradeRestoreHp",
    }
}

/// Backing store side in device pixels for a given `devicePixelRatio`.
/// Unusable ratios fall back to 1.
pub fn backing_store_side(device_pixel_ratio: f64) -> u32 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    (f64::from(PLAYFIELD_SIZE) * dpr).round() as u32
}

/// Convert a pointer offset within an element of `client_size` CSS pixels
/// into playfield units. Falls back to the raw offset for a collapsed element.
pub fn pointer_to_playfield(offset: Vec2, client_size: Vec2) -> Vec2 {
    if client_size.x <= 0.0 || client_size.y <= 0.0 {
        return offset;
    }
    offset * (Vec2::splat(PLAYFIELD_SIZE) / client_size)
}

/// Build settings from the optional start level attribute.
/// Missing or malformed values leave the default level.
pub fn settings_from_attribute(value: Option<&str>) -> Settings {
    match value.and_then(Settings::parse_start_level) {
        Some(level) => Settings::with_start_level(level),
        None => {
            if let Some(raw) = value {
                log::warn!("Ignoring {}=\"{}\"", START_LEVEL_ATTRIBUTE, raw);
            }
            Settings::default()
        }
    }
}
