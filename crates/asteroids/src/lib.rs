//! # Asteroids
//!
//! Asteroids game built on `arcade_engine`: game configuration, components,
//! entity spawning, ship controls and render extraction. The binary drives a
//! headless session tick by tick.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

pub mod assets;
pub mod components;
pub mod config;
pub mod controls;
pub mod entities;
pub mod game;
pub mod render;

pub use config::GameConfig;
pub use game::Game;
