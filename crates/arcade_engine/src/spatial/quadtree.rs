//! Quadtree spatial partitioning structure
//!
//! Divides the playfield into a hierarchy of rectangular regions for fast
//! range queries. A node stores up to `capacity` entities directly; once full,
//! it lazily splits into four quadrants and routes further insertions into the
//! single quadrant containing the entity's position. Entities already stored
//! at a node stay there after the split.

use serde::{Deserialize, Serialize};

use crate::ecs::Entity;
use crate::foundation::math::{Rectangle, Vec2};

/// Anything the quadtree can index: it needs a position and a stable identity
pub trait Positioned {
    /// Current position used for placement and queries
    fn position(&self) -> Vec2;

    /// Identity used for membership and deletion
    fn id(&self) -> Entity;
}

/// Entity stored in the quadtree: an id plus the position it was indexed at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntity {
    /// Entity id
    pub id: Entity,
    /// Indexed position
    pub position: Vec2,
}

impl SpatialEntity {
    /// Create a new spatial entry
    pub fn new(id: Entity, position: Vec2) -> Self {
        Self { id, position }
    }
}

impl Positioned for SpatialEntity {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn id(&self) -> Entity {
        self.id
    }
}

/// Configuration for quadtree behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// Maximum entities held directly by a node before it subdivides
    pub capacity: usize,

    /// Maximum subdivision depth; nodes at this depth accept entities past capacity
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            max_depth: 16,
        }
    }
}

/// Quadtree errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SpatialError {
    /// Insertion of a position outside the root bounds
    #[error("Position ({x}, {y}) lies outside the quadtree bounds")]
    OutOfBounds {
        /// X coordinate of the rejected position
        x: f32,
        /// Y coordinate of the rejected position
        y: f32,
    },
}

/// Single node in the quadtree hierarchy
#[derive(Debug, Clone)]
pub struct QuadNode<T> {
    bounds: Rectangle,
    entities: Vec<T>,
    children: Option<Box<[QuadNode<T>; 4]>>,
    depth: u32,
}

impl<T: Positioned> QuadNode<T> {
    fn new(bounds: Rectangle, depth: u32) -> Self {
        Self {
            bounds,
            entities: Vec::new(),
            children: None,
            depth,
        }
    }

    /// Region covered by this node
    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    /// Entities stored directly at this node
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// Child quadrants, ordered top-left, top-right, bottom-left, bottom-right
    pub fn children(&self) -> Option<&[QuadNode<T>; 4]> {
        self.children.as_deref()
    }

    /// Depth in the tree (0 = root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn insert(&mut self, entity: T, config: &QuadTreeConfig) {
        if self.entities.len() < config.capacity || self.depth >= config.max_depth {
            self.entities.push(entity);
            return;
        }

        let bounds = self.bounds;
        let depth = self.depth;
        let children = self.children.get_or_insert_with(|| {
            log::debug!(
                "Subdividing quadtree node at depth {} ({}, {}, {}x{})",
                depth,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height
            );
            Box::new(bounds.quadrants().map(|quadrant| QuadNode::new(quadrant, depth + 1)))
        });

        children[bounds.quadrant_index(&entity.position())].insert(entity, config);
    }

    fn query<'a>(&'a self, range: &Rectangle, results: &mut Vec<&'a T>) {
        if !self.bounds.intersects(range) {
            return;
        }

        results.extend(
            self.entities
                .iter()
                .filter(|entity| range.contains(&entity.position())),
        );

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(range, results);
            }
        }
    }

    fn remove(&mut self, id: Entity) -> Option<T> {
        if let Some(index) = self.entities.iter().position(|e| e.id() == id) {
            return Some(self.entities.swap_remove(index));
        }

        self.children
            .as_mut()?
            .iter_mut()
            .find_map(|child| child.remove(id))
    }

    fn find(&self, id: Entity) -> Option<&T> {
        if let Some(entity) = self.entities.iter().find(|e| e.id() == id) {
            return Some(entity);
        }

        self.children
            .as_ref()?
            .iter()
            .find_map(|child| child.find(id))
    }

    fn count_entities(&self) -> usize {
        let mut count = self.entities.len();

        if let Some(children) = &self.children {
            count += children.iter().map(QuadNode::count_entities).sum::<usize>();
        }

        count
    }

    fn max_depth(&self) -> u32 {
        self.children
            .as_ref()
            .map_or(self.depth, |children| {
                children.iter().map(QuadNode::max_depth).max().unwrap_or(self.depth)
            })
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Rectangle>) {
        match &self.children {
            None => leaves.push(&self.bounds),
            Some(children) => {
                for child in children.iter() {
                    child.collect_leaves(leaves);
                }
            }
        }
    }
}

/// Quadtree over entities with a position and identity
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    root: QuadNode<T>,
    config: QuadTreeConfig,
}

impl<T: Positioned> QuadTree<T> {
    /// Create a quadtree covering `bounds` with the default configuration
    pub fn new(bounds: Rectangle) -> Self {
        Self::with_config(bounds, QuadTreeConfig::default())
    }

    /// Create a quadtree covering `bounds`
    pub fn with_config(bounds: Rectangle, config: QuadTreeConfig) -> Self {
        Self {
            root: QuadNode::new(bounds, 0),
            config,
        }
    }

    /// Root bounds, fixed at construction
    pub fn bounds(&self) -> &Rectangle {
        &self.root.bounds
    }

    /// Configuration
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Root node, for walking the hierarchy
    pub fn root(&self) -> &QuadNode<T> {
        &self.root
    }

    /// Insert an entity.
    ///
    /// Fails with [`SpatialError::OutOfBounds`] if the entity's position is
    /// outside the root bounds.
    pub fn add(&mut self, entity: T) -> Result<(), SpatialError> {
        self.check_bounds(&entity)?;
        self.root.insert(entity, &self.config);
        Ok(())
    }

    /// All entities whose position lies in `range` (half-open)
    pub fn query(&self, range: &Rectangle) -> Vec<&T> {
        let mut results = Vec::new();
        self.root.query(range, &mut results);
        results
    }

    /// Remove `entity` (matched by id); returns whether anything was removed.
    ///
    /// Emptied nodes are left in place.
    pub fn delete(&mut self, entity: &T) -> bool {
        self.remove(entity.id()).is_some()
    }

    /// Remove the entry with `id` and return it
    pub fn remove(&mut self, id: Entity) -> Option<T> {
        self.root.remove(id)
    }

    /// Membership test by id
    pub fn has(&self, entity: &T) -> bool {
        self.contains_id(entity.id())
    }

    /// Membership test for a raw id
    pub fn contains_id(&self, id: Entity) -> bool {
        self.root.find(id).is_some()
    }

    /// Find the stored entry for `id`
    pub fn find(&self, id: Entity) -> Option<&T> {
        self.root.find(id)
    }

    /// Re-index an entity at its current position.
    ///
    /// Any existing entry with the same id is replaced. Returns whether an
    /// old entry was found. On error the tree is left untouched.
    pub fn relocate(&mut self, entity: T) -> Result<bool, SpatialError> {
        self.check_bounds(&entity)?;
        let existed = self.root.remove(entity.id()).is_some();
        self.root.insert(entity, &self.config);
        Ok(existed)
    }

    /// Total entity count, including all children
    pub fn len(&self) -> usize {
        self.root.count_entities()
    }

    /// True when no entity is stored anywhere in the tree
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest level reached by any node
    pub fn depth(&self) -> u32 {
        self.root.max_depth()
    }

    /// Bounds of every leaf node (for visualization)
    pub fn leaf_bounds(&self) -> Vec<&Rectangle> {
        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
    }

    /// Iterate all entities: each node's own entities first, then its children in order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: vec![&self.root],
            current: <&[T]>::default().iter(),
        }
    }

    /// Remove everything and drop all subdivisions
    pub fn clear(&mut self) {
        self.root = QuadNode::new(self.root.bounds, 0);
    }

    fn check_bounds(&self, entity: &T) -> Result<(), SpatialError> {
        let position = entity.position();
        if self.root.bounds.contains(&position) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds {
                x: position.x,
                y: position.y,
            })
        }
    }
}

/// Depth-first iterator over a [`QuadTree`]
pub struct Iter<'a, T> {
    stack: Vec<&'a QuadNode<T>>,
    current: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entity) = self.current.next() {
                return Some(entity);
            }

            let node = self.stack.pop()?;
            self.current = node.entities.iter();
            if let Some(children) = &node.children {
                self.stack.extend(children.iter().rev());
            }
        }
    }
}

impl<'a, T: Positioned> IntoIterator for &'a QuadTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn spatial(id: u32, x: f32, y: f32) -> SpatialEntity {
        SpatialEntity::new(Entity::from_raw(id), Vec2::new(x, y))
    }

    fn small_config(capacity: usize) -> QuadTreeConfig {
        QuadTreeConfig {
            capacity,
            ..QuadTreeConfig::default()
        }
    }

    #[test]
    fn test_quadtree_basic_insertion() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
        let entity = spatial(1, 10.0, 10.0);

        tree.add(entity).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.has(&entity));
        assert!(tree.root().is_leaf());
    }

    #[test]
    fn test_add_out_of_bounds_fails() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));

        assert_eq!(
            tree.add(spatial(1, 100.0, 50.0)),
            Err(SpatialError::OutOfBounds { x: 100.0, y: 50.0 })
        );
        assert!(tree.add(spatial(2, -1.0, 50.0)).is_err());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_default_capacity_is_fifty() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
        for id in 0..50 {
            tree.add(spatial(id, 1.0, 1.0)).unwrap();
        }
        assert!(tree.root().is_leaf());

        tree.add(spatial(50, 75.0, 75.0)).unwrap();
        let children = tree.root().children().unwrap();
        assert_eq!(tree.root().entities().len(), 50);
        assert_eq!(children[3].entities().len(), 1);
    }

    #[test]
    fn test_subdivision_keeps_existing_entities() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 100.0, 100.0), small_config(2));
        tree.add(spatial(1, 10.0, 10.0)).unwrap();
        tree.add(spatial(2, 90.0, 90.0)).unwrap();
        tree.add(spatial(3, 60.0, 10.0)).unwrap();

        let root = tree.root();
        assert_eq!(root.entities().len(), 2);
        let children = root.children().unwrap();
        assert_eq!(children[1].entities(), &[spatial(3, 60.0, 10.0)]);
        assert_eq!(*children[1].bounds(), Rectangle::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_half_open_split_boundary() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 20.0, 20.0), small_config(1));
        tree.add(spatial(1, 1.0, 1.0)).unwrap();
        tree.add(spatial(2, 10.0, 10.0)).unwrap();
        tree.add(spatial(3, 10.0, 0.0)).unwrap();

        let children = tree.root().children().unwrap();
        assert_eq!(children[1].entities(), &[spatial(3, 10.0, 0.0)]);
        assert_eq!(children[3].entities(), &[spatial(2, 10.0, 10.0)]);
        assert!(children[0].entities().is_empty());
        assert!(children[2].entities().is_empty());
        assert!(children[1].bounds().contains(&Vec2::new(10.0, 0.0)));
        assert!(!children[0].bounds().contains(&Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_query_whole_bounds_returns_everything_once() {
        let bounds = Rectangle::new(0.0, 0.0, 1000.0, 1000.0);
        let mut tree = QuadTree::new(bounds);
        let mut rng = StdRng::seed_from_u64(1234);

        for id in 0..2000 {
            let x = rng.gen_range(0.0..1000.0);
            let y = rng.gen_range(0.0..1000.0);
            tree.add(spatial(id, x, y)).unwrap();
        }
        // Stack some on split lines too
        for id in 2000..2100 {
            tree.add(spatial(id, 500.0, 250.0)).unwrap();
        }

        let found = tree.query(&bounds);
        assert_eq!(found.len(), 2100);
        let unique: HashSet<Entity> = found.iter().map(|e| e.id).collect();
        assert_eq!(unique.len(), 2100);
        assert!(tree.depth() >= 1);
    }

    #[test]
    fn test_query_matches_brute_force() {
        let bounds = Rectangle::new(0.0, 0.0, 512.0, 512.0);
        let mut tree = QuadTree::with_config(bounds, small_config(4));
        let mut rng = StdRng::seed_from_u64(99);
        let mut all = Vec::new();

        for id in 0..500 {
            let entity = spatial(id, rng.gen_range(0.0..512.0), rng.gen_range(0.0..512.0));
            all.push(entity);
            tree.add(entity).unwrap();
        }

        let ranges = [
            Rectangle::new(0.0, 0.0, 256.0, 256.0),
            Rectangle::new(100.0, 300.0, 50.0, 150.0),
            Rectangle::new(256.0, 0.0, 256.0, 512.0),
            Rectangle::new(-50.0, -50.0, 100.0, 100.0),
        ];
        for range in &ranges {
            let mut expected: Vec<u32> = all
                .iter()
                .filter(|e| range.contains(&e.position))
                .map(|e| e.id.id())
                .collect();
            let mut actual: Vec<u32> = tree.query(range).iter().map(|e| e.id.id()).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected, "range {range:?}");
        }
    }

    #[test]
    fn test_query_range_edges_are_half_open() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 20.0, 20.0), small_config(1));
        tree.add(spatial(1, 9.5, 5.0)).unwrap();
        tree.add(spatial(2, 10.0, 5.0)).unwrap();
        tree.add(spatial(3, 10.0, 15.0)).unwrap();

        let left: Vec<u32> = tree
            .query(&Rectangle::new(0.0, 0.0, 10.0, 20.0))
            .iter()
            .map(|e| e.id.id())
            .collect();
        assert_eq!(left, vec![1]);

        let mut right: Vec<u32> = tree
            .query(&Rectangle::new(10.0, 0.0, 10.0, 20.0))
            .iter()
            .map(|e| e.id.id())
            .collect();
        right.sort_unstable();
        assert_eq!(right, vec![2, 3]);
    }

    #[test]
    fn test_delete_leaves_empty_shells() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 100.0, 100.0), small_config(1));
        let a = spatial(1, 10.0, 10.0);
        let b = spatial(2, 80.0, 80.0);
        tree.add(a).unwrap();
        tree.add(b).unwrap();

        assert!(tree.delete(&b));
        assert!(!tree.has(&b));
        assert!(!tree.delete(&b));
        assert_eq!(tree.len(), 1);
        assert!(!tree.root().is_leaf());
        assert_eq!(tree.leaf_bounds().len(), 4);
    }

    #[test]
    fn test_delete_matches_by_id() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
        tree.add(spatial(7, 10.0, 10.0)).unwrap();

        // Same id, stale position
        assert!(tree.delete(&spatial(7, 99.0, 99.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_iteration_order_own_entities_first() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 100.0, 100.0), small_config(1));
        tree.add(spatial(1, 90.0, 90.0)).unwrap();
        tree.add(spatial(2, 80.0, 80.0)).unwrap();
        tree.add(spatial(3, 10.0, 10.0)).unwrap();
        tree.add(spatial(4, 60.0, 10.0)).unwrap();

        let order: Vec<u32> = tree.iter().map(|e| e.id.id()).collect();
        assert_eq!(order, vec![1, 3, 4, 2]);

        let via_into_iter: Vec<u32> = (&tree).into_iter().map(|e| e.id.id()).collect();
        assert_eq!(order, via_into_iter);
    }

    #[test]
    fn test_relocate_moves_entry() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 100.0, 100.0), small_config(1));
        tree.add(spatial(1, 10.0, 10.0)).unwrap();
        tree.add(spatial(2, 20.0, 20.0)).unwrap();

        assert_eq!(tree.relocate(spatial(2, 90.0, 90.0)), Ok(true));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find(Entity::from_raw(2)).map(|e| e.position), Some(Vec2::new(90.0, 90.0)));
        assert!(tree.query(&Rectangle::new(0.0, 0.0, 50.0, 50.0)).iter().all(|e| e.id.id() == 1));

        assert_eq!(tree.relocate(spatial(3, 5.0, 5.0)), Ok(false));
        assert!(tree.relocate(spatial(1, 150.0, 5.0)).is_err());
        assert!(tree.contains_id(Entity::from_raw(1)));
    }

    #[test]
    fn test_max_depth_stops_subdivision() {
        let config = QuadTreeConfig {
            capacity: 2,
            max_depth: 2,
        };
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 100.0, 100.0), config);
        for id in 0..20 {
            tree.add(spatial(id, 5.0, 5.0)).unwrap();
        }
        assert_eq!(tree.len(), 20);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_clear() {
        let mut tree = QuadTree::with_config(Rectangle::new(0.0, 0.0, 100.0, 100.0), small_config(1));
        tree.add(spatial(1, 5.0, 5.0)).unwrap();
        tree.add(spatial(2, 55.0, 5.0)).unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.root().is_leaf());
        assert_eq!(*tree.bounds(), Rectangle::new(0.0, 0.0, 100.0, 100.0));
    }
}
