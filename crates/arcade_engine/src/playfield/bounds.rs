//! World extent shared by the playfield and every movable inside it

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Rectangle, Vec2};

/// Size of the playable area; positions are confined to `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl WorldBounds {
    /// Create new bounds
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Closed containment test matching the movement clamp
    pub fn contains(&self, point: &Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Bounds as a rectangle anchored at the origin
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.width, self.height)
    }
}
