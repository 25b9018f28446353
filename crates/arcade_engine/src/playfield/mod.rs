//! Playfield: the rectangular world region that owns the spatial index and
//! the component stores, and drives one integration step per tick.
//!
//! ## Tick order
//!
//! ```text
//! Movable::update for every entity
//!      ↓
//! QuadTree::relocate for every entity
//!      ↓
//! queries observe the new positions
//! ```

mod bounds;

pub use bounds::WorldBounds;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ecs::{ComponentError, ComponentView, Entity, EntityAllocator, World};
use crate::foundation::math::{Rectangle, Vec2};
use crate::physics::{Movable, MovableBuilder, MovableDefaults};
use crate::spatial::{QuadTree, QuadTreeConfig, SpatialEntity, SpatialError};

/// Extra room past the far edges of the index.
///
/// Movables clamp to the closed range `[0, width]` while the index uses
/// half-open containment, so the index root reaches slightly further.
pub const INDEX_EDGE_MARGIN: f32 = 1.0;

/// Playfield settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Screen-space X offset of the playfield (render translation only)
    pub x: f32,
    /// Screen-space Y offset of the playfield (render translation only)
    pub y: f32,
    /// Playable width
    pub width: f32,
    /// Playable height
    pub height: f32,
    /// Seed for entity ids; random when unset
    pub seed: Option<u64>,
    /// Spatial index tuning
    pub quadtree: QuadTreeConfig,
    /// Limits applied to movables built through [`Playfield::movable_builder`]
    pub movable: MovableDefaults,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 1000.0,
            height: 800.0,
            seed: None,
            quadtree: QuadTreeConfig::default(),
            movable: MovableDefaults::default(),
        }
    }
}

impl Config for PlayfieldConfig {}

/// Playfield errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlayfieldError {
    /// Component store failure
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Spatial index failure
    #[error("Spatial index error: {0}")]
    Spatial(#[from] SpatialError),
}

/// The world region: bounds, spatial index and component stores
pub struct Playfield {
    offset: Vec2,
    bounds: WorldBounds,
    entities: QuadTree<SpatialEntity>,
    world: World,
    allocator: EntityAllocator,
    movable_defaults: MovableDefaults,
}

impl Playfield {
    /// Create an empty playfield
    pub fn new(config: &PlayfieldConfig) -> Self {
        let bounds = WorldBounds::new(config.width, config.height);
        let index_bounds = Rectangle::new(
            0.0,
            0.0,
            config.width + INDEX_EDGE_MARGIN,
            config.height + INDEX_EDGE_MARGIN,
        );
        let allocator = config
            .seed
            .map_or_else(EntityAllocator::new, EntityAllocator::with_seed);

        log::info!(
            "Playfield {}x{} at ({}, {}), index capacity {}",
            config.width,
            config.height,
            config.x,
            config.y,
            config.quadtree.capacity
        );

        Self {
            offset: Vec2::new(config.x, config.y),
            bounds,
            entities: QuadTree::with_config(index_bounds, config.quadtree),
            world: World::new(),
            allocator,
            movable_defaults: config.movable,
        }
    }

    /// World extent
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Screen-space offset for renderers
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Spatial index
    pub fn index(&self) -> &QuadTree<SpatialEntity> {
        &self.entities
    }

    /// Component registry
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Component registry, mutably (for game-specific stores)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Builder preloaded with this playfield's bounds and movable limits
    pub fn movable_builder(&self) -> MovableBuilder {
        MovableBuilder::with_defaults(self.bounds, &self.movable_defaults)
    }

    /// Register a new entity with the given kinematic state and index it.
    ///
    /// The movable is re-bound to this playfield's bounds.
    pub fn spawn(&mut self, mut movable: Movable) -> Result<Entity, PlayfieldError> {
        movable.bounds = self.bounds;
        if !self.bounds.contains(&movable.position) {
            return Err(SpatialError::OutOfBounds {
                x: movable.position.x,
                y: movable.position.y,
            }
            .into());
        }

        let entity = self.allocator.allocate();
        let position = movable.position;
        self.world.add_component(entity, movable)?;
        self.entities.add(SpatialEntity::new(entity, position))?;

        log::debug!("Spawned {} at ({:.1}, {:.1})", entity, position.x, position.y);
        Ok(entity)
    }

    /// Remove an entity from every store and from the index
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let components = self.world.despawn(entity);
        let indexed = self.entities.remove(entity).is_some();
        let live = self.allocator.release(entity);
        log::debug!("Despawned {} ({} components)", entity, components);
        components > 0 || indexed || live
    }

    /// Kinematic state of `entity`
    pub fn movable(&self, entity: Entity) -> Result<&Movable, PlayfieldError> {
        Ok(self.world.get_component::<Movable>(entity)?)
    }

    /// Kinematic state of `entity`, mutably (input handlers use this)
    pub fn movable_mut(&mut self, entity: Entity) -> Result<&mut Movable, PlayfieldError> {
        Ok(self.world.get_component_mut::<Movable>(entity)?)
    }

    /// Read-only view of every movable
    pub fn movables(&self) -> Result<ComponentView<'_, Movable>, PlayfieldError> {
        Ok(self.world.store_ref::<Movable>()?.get_all())
    }

    /// Visit every movable mutably
    pub fn for_each_movable<F>(&mut self, callback: F) -> Result<(), PlayfieldError>
    where
        F: FnMut(Entity, &mut Movable),
    {
        self.world.store::<Movable>()?.for_each_mut(callback);
        Ok(())
    }

    /// Advance every movable by `delta_time`, then re-index them
    pub fn tick(&mut self, delta_time: f32) -> Result<(), PlayfieldError> {
        let movables = self.world.store::<Movable>()?;
        movables.for_each_mut(|_, movable| movable.update(delta_time));

        for (entity, movable) in movables.iter() {
            let moved = self
                .entities
                .find(entity)
                .map_or(true, |indexed| indexed.position != movable.position);
            if moved {
                log::trace!(
                    "Re-indexing {} at ({:.2}, {:.2})",
                    entity,
                    movable.position.x,
                    movable.position.y
                );
                self.entities.relocate(SpatialEntity::new(entity, movable.position))?;
            }
        }

        Ok(())
    }

    /// Ids of entities whose indexed position lies in `range`
    pub fn query(&self, range: &Rectangle) -> Vec<Entity> {
        self.entities.query(range).into_iter().map(|e| e.id).collect()
    }

    /// Number of indexed entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
