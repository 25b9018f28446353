//! Entity implementation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Entity identifier
///
/// Ids are assigned once by the creator and shared by every component store
/// that holds data for the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create an entity handle from a raw id
    pub const fn from_raw(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Hands out random entity ids that are never reused while an entity is live
pub struct EntityAllocator {
    live: HashSet<Entity>,
    rng: StdRng,
}

impl EntityAllocator {
    /// Create an allocator seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create an allocator with a fixed seed for reproducible ids
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            live: HashSet::new(),
            rng,
        }
    }

    /// Allocate a fresh id that is not currently live
    pub fn allocate(&mut self) -> Entity {
        loop {
            let candidate = Entity::from_raw(self.rng.gen());
            if self.live.insert(candidate) {
                log::trace!("Allocated {}", candidate);
                return candidate;
            }
        }
    }

    /// Return an id to the pool; returns false if it was not live
    pub fn release(&mut self, entity: Entity) -> bool {
        self.live.remove(&entity)
    }

    /// Check whether an id is currently live
    pub fn is_live(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    /// Number of live ids
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
