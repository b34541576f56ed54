//! Shared motion model
//!
//! Every movable entity (player and terrain sprite alike) embeds a [`Motion`]
//! and advances position strictly through [`Motion::advance`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position/velocity pair for a movable entity
///
/// `pos` is the top-left corner of the entity's bounding box. `advance` is
/// the sole position mutator: pure translation, no bounds checking. Callers
/// set `vel` before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Motion {
    /// Create a stationary motion at the given position
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }

    /// Apply one tick of velocity to position
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}
