//! Spatial partitioning data structures
//!
//! Provides efficient spatial indexing for range queries over entities in
//! the 2D playfield.

mod quadtree;

pub use quadtree::{Iter, Positioned, QuadNode, QuadTree, QuadTreeConfig, SpatialEntity, SpatialError};
