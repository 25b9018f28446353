//! # Arcade Engine
//!
//! Core of a 2D arcade game: component stores, a quadtree spatial index and
//! a kinematic integrator confined to rectangular world bounds.
//!
//! ## Features
//!
//! - **Component Registry**: one lazily created store per component type
//! - **Spatial Index**: bucketed quadtree with rectangle range queries
//! - **Kinematics**: per-tick integration with speed clamping, friction and wall-stop
//! - **Configuration**: TOML/RON loadable settings with serde defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_engine::prelude::*;
//!
//! let mut playfield = Playfield::new(&PlayfieldConfig::default());
//! let ship = playfield
//!     .movable_builder()
//!     .position(Vec2::new(400.0, 400.0))
//!     .build();
//! let id = playfield.spawn(ship).unwrap();
//!
//! playfield.movable_mut(id).unwrap().accelerate(Vec2::new(50.0, 0.0));
//! playfield.tick(1.0).unwrap();
//!
//! let nearby = playfield.query(&Rectangle::new(400.0, 350.0, 100.0, 100.0));
//! assert_eq!(nearby, vec![id]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod playfield;
pub mod spatial;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{Component, ComponentError, ComponentStore, ComponentView, Entity, World},
        foundation::{
            math::{constants::{PI, TAU}, wrap_angle, Rectangle, Vec2, Vec2Ext},
            time::GameClock,
        },
        physics::{Movable, MovableBuilder, MovableDefaults},
        playfield::{Playfield, PlayfieldConfig, PlayfieldError, WorldBounds},
        spatial::{Positioned, QuadTree, QuadTreeConfig, SpatialEntity, SpatialError},
    };
}
