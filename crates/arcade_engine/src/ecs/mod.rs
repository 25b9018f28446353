//! Entity-Component-System implementation
//!
//! Entities are bare ids. Behaviour data lives in per-type component stores
//! owned by a [`World`] registry.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;

pub use world::World;
pub use entity::{Entity, EntityAllocator};
pub use component::Component;
pub use storage::{ComponentEntry, ComponentError, ComponentStore, ComponentView};
