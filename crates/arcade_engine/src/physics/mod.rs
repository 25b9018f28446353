//! Physics module
//!
//! Kinematic integration for entities moving inside the playfield.

pub mod movable;

pub use movable::{Movable, MovableBuilder, MovableDefaults};
