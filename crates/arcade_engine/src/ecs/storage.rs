//! Component storage
//!
//! One [`ComponentStore`] per component type maps entity ids to component
//! values. Values live in a slot map; a side table resolves entity ids to slot
//! keys so lookups stay O(1) while iteration walks a dense slot array.

use std::collections::HashMap;

use slotmap::{DefaultKey, SlotMap};

use super::{Component, Entity};

/// Errors raised by component stores and the registry that owns them
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// `get` on an id that was never added (or has been removed)
    #[error("Component {component} does not exist for {entity}")]
    ComponentNotFound {
        /// Entity that was looked up
        entity: Entity,
        /// Component type name
        component: &'static str,
    },

    /// A registry slot holds a store of a different type than its key
    #[error("Store registered for {component} has the wrong type")]
    StoreTypeMismatch {
        /// Component type name
        component: &'static str,
    },

    /// Read-only access to a store that has not been created yet
    #[error("No store registered for {component}")]
    StoreNotRegistered {
        /// Component type name
        component: &'static str,
    },
}

/// A single `(entity, component)` pair handed to [`ComponentStore::for_each`]
#[derive(Debug)]
pub struct ComponentEntry<'a, T> {
    /// Entity id
    pub key: Entity,
    /// Component value
    pub value: &'a T,
}

/// Sparse registry from entity id to component value
pub struct ComponentStore<T: Component> {
    components: SlotMap<DefaultKey, (Entity, T)>,
    handle_map: HashMap<Entity, DefaultKey>,
}

impl<T: Component> ComponentStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            components: SlotMap::new(),
            handle_map: HashMap::new(),
        }
    }

    /// Insert a component, silently replacing any existing value for `entity`
    pub fn add(&mut self, entity: Entity, component: T) {
        if let Some(slot) = self
            .handle_map
            .get(&entity)
            .and_then(|&key| self.components.get_mut(key))
        {
            slot.1 = component;
            return;
        }

        let key = self.components.insert((entity, component));
        self.handle_map.insert(entity, key);
    }

    /// Get the component for `entity`
    pub fn get(&self, entity: Entity) -> Result<&T, ComponentError> {
        self.handle_map
            .get(&entity)
            .and_then(|&key| self.components.get(key))
            .map(|(_, component)| component)
            .ok_or_else(|| Self::not_found(entity))
    }

    /// Get the component for `entity` mutably
    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut T, ComponentError> {
        match self.handle_map.get(&entity) {
            Some(&key) => self
                .components
                .get_mut(key)
                .map(|(_, component)| component)
                .ok_or_else(|| Self::not_found(entity)),
            None => Err(Self::not_found(entity)),
        }
    }

    /// Remove the component for `entity`; a no-op when absent
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let key = self.handle_map.remove(&entity)?;
        self.components.remove(key).map(|(_, component)| component)
    }

    /// Check whether `entity` has a component in this store
    pub fn contains(&self, entity: Entity) -> bool {
        self.handle_map.contains_key(&entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Read-only view of the full id to component mapping
    pub fn get_all(&self) -> ComponentView<'_, T> {
        ComponentView { store: self }
    }

    /// Iterate `(entity, component)` pairs in store order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.values().map(|(entity, component)| (*entity, component))
    }

    /// Iterate the ids present in this store
    pub fn ids(&self) -> impl Iterator<Item = Entity> + '_ {
        self.components.values().map(|(entity, _)| *entity)
    }

    /// Visit every entry with its iteration index.
    ///
    /// Order is stable for a single pass but is not tied to insertion or id
    /// order.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(ComponentEntry<'_, T>, usize),
    {
        for (index, (entity, component)) in self.components.values().enumerate() {
            callback(ComponentEntry { key: *entity, value: component }, index);
        }
    }

    /// Visit every entry mutably
    pub fn for_each_mut<F>(&mut self, mut callback: F)
    where
        F: FnMut(Entity, &mut T),
    {
        for (entity, component) in self.components.values_mut() {
            callback(*entity, component);
        }
    }

    fn not_found(entity: Entity) -> ComponentError {
        ComponentError::ComponentNotFound {
            entity,
            component: std::any::type_name::<T>(),
        }
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed, read-only view over a [`ComponentStore`]
///
/// Hands out shared references only, so consumers (renderers, debug readers)
/// cannot mutate components through it.
pub struct ComponentView<'a, T: Component> {
    store: &'a ComponentStore<T>,
}

impl<'a, T: Component> ComponentView<'a, T> {
    /// Get the component for `entity`
    pub fn get(&self, entity: Entity) -> Result<&'a T, ComponentError> {
        self.store.get(entity)
    }

    /// Check whether `entity` is present
    pub fn contains(&self, entity: Entity) -> bool {
        self.store.contains(entity)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when the view is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterate `(entity, component)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &'a T)> {
        self.store.iter()
    }
}

impl<'a, T: Component> Clone for ComponentView<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: Component> Copy for ComponentView<'a, T> {}
