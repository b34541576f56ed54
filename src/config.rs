//! World tuning parameters
//!
//! Everything the spawner and clock would otherwise read as a magic number
//! lives here, so tests can shrink the world and tuned thresholds stay
//! adjustable. Validation is fail-fast: a malformed config is a programmer
//! error caught at startup, never a runtime-recoverable condition.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Startup configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tile size must be positive, got {0}")]
    NonPositiveTileSize(f32),
    #[error("view ({width}x{height}) must fit at least one {tile}px tile")]
    ViewTooSmall { width: f32, height: f32, tile: f32 },
    #[error("player box {width}x{height} must be positive")]
    BadPlayerBox { width: f32, height: f32 },
    #[error("speed range [{start}, {max}] must satisfy 1 <= start <= max")]
    BadSpeedRange { start: f32, max: f32 },
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("jump velocity must be negative (upward), got {0}")]
    NonUpwardJump(f32),
}

/// Tunable world parameters
///
/// The enemy spacing thresholds encode a two-sided placement policy: a new
/// enemy is allowed only comfortably far from, or very close to, the previous
/// one. The policy is load-bearing; the literal pixel values are tuned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Square grid unit for all terrain sprites
    pub tile_size: f32,
    /// Camera window width
    pub view_width: f32,
    /// Camera window height
    pub view_height: f32,
    /// Top edge of a tier-0 platform tile
    pub platform_base: f32,
    /// Vertical pixel offset between adjacent tiers
    pub tier_spacing: f32,
    /// Player bounding box
    pub player_width: f32,
    pub player_height: f32,
    /// Fixed player spawn (top-left corner)
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Scroll rate at the start of a run
    pub start_speed: f32,
    /// Scroll rate cap for the long-run ramp
    pub max_speed: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Upward impulse while a jump is held (negative = up)
    pub jump_velocity: f32,
    /// Ticks the jump impulse may be re-applied
    pub jump_hold_ticks: u32,
    /// Minimum gap to the previous enemy for "comfortably far" placement
    pub enemy_spacing_far: f32,
    /// Maximum gap to the previous enemy for "still clustered" placement
    pub enemy_spacing_near: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            platform_base: PLATFORM_BASE,
            tier_spacing: TIER_SPACING,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            spawn_x: PLAYER_SPAWN_X,
            spawn_y: PLAYER_SPAWN_Y,
            start_speed: START_SPEED,
            max_speed: MAX_SPEED,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            jump_hold_ticks: JUMP_HOLD_TICKS,
            enemy_spacing_far: TILE_SIZE * 3.0,
            enemy_spacing_near: TILE_SIZE,
        }
    }
}

impl WorldConfig {
    /// Validate the configuration, failing fast on nonsense values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size <= 0.0 {
            return Err(ConfigError::NonPositiveTileSize(self.tile_size));
        }
        if self.view_width < self.tile_size || self.view_height < self.tile_size {
            return Err(ConfigError::ViewTooSmall {
                width: self.view_width,
                height: self.view_height,
                tile: self.tile_size,
            });
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            return Err(ConfigError::BadPlayerBox {
                width: self.player_width,
                height: self.player_height,
            });
        }
        if self.start_speed < 1.0 || self.start_speed > self.max_speed {
            return Err(ConfigError::BadSpeedRange {
                start: self.start_speed,
                max: self.max_speed,
            });
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::NonPositiveGravity(self.gravity));
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::NonUpwardJump(self.jump_velocity));
        }
        Ok(())
    }

    /// Top edge y for a platform tile at the given tier
    ///
    /// Single source of truth for vertical placement: tiers are discrete
    /// integers, this is the only tier-to-pixel mapping.
    #[inline]
    pub fn tier_y(&self, tier: u8) -> f32 {
        self.platform_base - tier as f32 * self.tier_spacing
    }

    /// X coordinate newly spawned sprites enter the world at
    #[inline]
    pub fn entry_x(&self, speed: f32) -> f32 {
        self.view_width + self.tile_size % speed
    }

    /// Ticks between spawner invocations at the given scroll speed
    #[inline]
    pub fn spawn_cadence(&self, speed: f32) -> u64 {
        ((self.tile_size / speed).floor() as u64).max(1)
    }

    /// Tick budget that must elapse before the next speed ramp
    #[inline]
    pub fn ramp_budget(&self, speed: f32) -> u64 {
        self.spawn_cadence(speed) * speed as u64 * 20
    }

    /// Number of tiles in the initial ground/water strips (view width plus
    /// a two-tile buffer so expiry never exposes the right edge)
    #[inline]
    pub fn strip_len(&self) -> usize {
        (self.view_width / self.tile_size).floor() as usize + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_tile() {
        let config = WorldConfig {
            tile_size: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveTileSize(0.0)));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let config = WorldConfig {
            jump_velocity: 4.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonUpwardJump(4.0)));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let config = WorldConfig {
            start_speed: 20.0,
            max_speed: 15.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tier_y_is_linear_in_tier() {
        let config = WorldConfig::default();
        assert_eq!(config.tier_y(0), config.platform_base);
        assert_eq!(config.tier_y(2), config.platform_base - 2.0 * config.tier_spacing);
        assert!(config.tier_y(4) > 0.0);
    }

    #[test]
    fn test_spawn_cadence_floors() {
        let config = WorldConfig::default();
        assert_eq!(config.spawn_cadence(6.0), 5); // floor(32/6)
        assert_eq!(config.spawn_cadence(15.0), 2);
        // never zero, even at absurd speeds
        assert_eq!(config.spawn_cadence(1000.0), 1);
    }
}
