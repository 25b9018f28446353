//! Game-specific components

use arcade_engine::prelude::*;

use crate::assets::SpriteKind;

/// Something the renderer draws at its entity's [`Movable`] position
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Sprite to draw
    pub sprite: SpriteKind,

    /// Normalized pivot within the sprite; rotation happens around it
    pub anchor: Vec2,
}

impl Component for Drawable {}

impl Drawable {
    /// Create a drawable centered on its entity
    pub fn new(sprite: SpriteKind) -> Self {
        Self {
            sprite,
            anchor: Vec2::new(0.5, 0.5),
        }
    }
}

/// Player ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Thrust applied while the up or down action is held
    pub thrust: f32,
}

impl Component for Ship {}

impl Default for Ship {
    fn default() -> Self {
        Self { thrust: 0.5 }
    }
}

/// Rock marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rock;

impl Component for Rock {}
