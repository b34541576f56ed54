//! Gully Runner - a side-scrolling endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, swept collision, terrain spawner)
//! - `config`: World tuning parameters with fail-fast validation
//!
//! Rendering, asset loading, key capture and frame scheduling are external
//! collaborators: the core consumes one boolean "jump held" signal per tick
//! and emits a drawable [`sim::FrameSnapshot`] each tick.

pub mod config;
pub mod sim;

pub use config::{ConfigError, WorldConfig};

/// Game configuration constants
pub mod consts {
    /// Square grid unit used to size and position every terrain sprite
    pub const TILE_SIZE: f32 = 32.0;

    /// View width (the simulated camera window, in pixels)
    pub const VIEW_WIDTH: f32 = 720.0;
    /// View height
    pub const VIEW_HEIGHT: f32 = 480.0;

    /// Top edge of a tier-0 platform tile
    pub const PLATFORM_BASE: f32 = VIEW_HEIGHT - TILE_SIZE;
    /// Vertical pixel offset between adjacent platform tiers
    pub const TIER_SPACING: f32 = 64.0;
    /// Highest platform tier (tiers run 0..=MAX_TIER)
    pub const MAX_TIER: u8 = 4;

    /// Player bounding box width
    pub const PLAYER_WIDTH: f32 = 60.0;
    /// Player bounding box height
    pub const PLAYER_HEIGHT: f32 = 96.0;
    /// Fixed spawn x (top-left corner)
    pub const PLAYER_SPAWN_X: f32 = 64.0;
    /// Fixed spawn y
    pub const PLAYER_SPAWN_Y: f32 = 250.0;

    /// Horizontal scroll rate at the start of a run (pixels per tick)
    pub const START_SPEED: f32 = 6.0;
    /// Scroll rate cap reached by the long-run speed ramp
    pub const MAX_SPEED: f32 = 15.0;

    /// Downward acceleration applied while airborne (pixels per tick²)
    pub const GRAVITY: f32 = 1.0;
    /// Upward impulse applied while a jump is held (negative = up)
    pub const JUMP_VELOCITY: f32 = -10.0;
    /// Ticks the jump impulse may be re-applied while held
    pub const JUMP_HOLD_TICKS: u32 = 12;

    /// Pixels the player's feet sink into a platform tile when landing
    pub const LANDING_FOOT_SINK: f32 = 5.0;

    /// Starting walk-cycle cadence (ticks per animation frame)
    pub const WALK_FRAME_TICKS: u32 = 4;

    /// Maximum simultaneously live enemies
    pub const MAX_LIVE_ENEMIES: usize = 3;

    /// Parallax backdrop pan rates, far to near (pixels per tick)
    pub const BACKDROP_SPEEDS: [f32; 3] = [0.2, 0.4, 0.6];
}
