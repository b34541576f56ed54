//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-indexed only (no wall clock)
//! - Seeded RNG only
//! - Insertion-ordered entity collections (oldest/leftmost first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{SweptBox, approach_angle_deg, in_landing_window, swept_min_dist};
pub use motion::Motion;
pub use state::{
    Backdrop, CollisionClass, FrameSnapshot, Player, PlayerPose, Tile, TileKind, WorldState,
};
pub use tick::{TickInput, tick};
