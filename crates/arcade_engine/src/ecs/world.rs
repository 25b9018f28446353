//! ECS World implementation
//!
//! The world is the registry that owns exactly one [`ComponentStore`] per
//! component type. Stores are created lazily on first request and live as
//! long as the world does.

use super::{Component, ComponentError, ComponentStore, Entity};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-erased store so the world can despawn across every component type
trait ErasedStore: Any {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing one component store per component type
#[derive(Default)]
pub struct World {
    component_storages: HashMap<TypeId, Box<dyn ErasedStore>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            component_storages: HashMap::new(),
        }
    }

    /// Get the store for `T`, creating it on first use.
    ///
    /// Every call for the same `T` returns the same store instance.
    pub fn store<T: Component>(&mut self) -> Result<&mut ComponentStore<T>, ComponentError> {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                log::debug!("Creating component store for {}", std::any::type_name::<T>());
                Box::new(ComponentStore::<T>::new())
            })
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .ok_or(ComponentError::StoreTypeMismatch {
                component: std::any::type_name::<T>(),
            })
    }

    /// Read-only access to an existing store for `T`
    pub fn store_ref<T: Component>(&self) -> Result<&ComponentStore<T>, ComponentError> {
        let component = std::any::type_name::<T>();
        self.component_storages
            .get(&TypeId::of::<T>())
            .ok_or(ComponentError::StoreNotRegistered { component })?
            .as_any()
            .downcast_ref::<ComponentStore<T>>()
            .ok_or(ComponentError::StoreTypeMismatch { component })
    }

    /// Add a component to an entity
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), ComponentError> {
        self.store::<T>()?.add(entity, component);
        Ok(())
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, ComponentError> {
        self.store_ref::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, ComponentError> {
        self.store::<T>()?.get_mut(entity)
    }

    /// Remove every component held for `entity`; returns how many were removed
    pub fn despawn(&mut self, entity: Entity) -> usize {
        self.component_storages
            .values_mut()
            .map(|store| store.remove_entity(entity))
            .filter(|removed| *removed)
            .count()
    }

    /// Check whether a store for `T` has been created
    pub fn has_store<T: Component>(&self) -> bool {
        self.component_storages.contains_key(&TypeId::of::<T>())
    }

    /// Number of component stores created so far
    pub fn store_count(&self) -> usize {
        self.component_storages.len()
    }

    /// Total number of components across all stores
    pub fn component_count(&self) -> usize {
        self.component_storages.values().map(|store| store.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Name(String);
    impl Component for Name {}

    #[test]
    fn test_same_type_returns_same_store() {
        let mut world = World::new();
        let first: *const ComponentStore<Health> = world.store::<Health>().unwrap();
        let second: *const ComponentStore<Health> = world.store::<Health>().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(world.store_count(), 1);
    }

    #[test]
    fn test_different_types_get_distinct_stores() {
        let mut world = World::new();
        let health: *const () = (world.store::<Health>().unwrap() as *const ComponentStore<Health>).cast();
        let name: *const () = (world.store::<Name>().unwrap() as *const ComponentStore<Name>).cast();
        assert!(!std::ptr::eq(health, name));
        assert_eq!(world.store_count(), 2);
    }

    #[test]
    fn test_store_persists_contents() {
        let mut world = World::new();
        let entity = Entity::from_raw(8);
        world.store::<Health>().unwrap().add(entity, Health(3));

        assert_eq!(world.store::<Health>().unwrap().get(entity), Ok(&Health(3)));
        assert_eq!(world.get_component::<Health>(entity), Ok(&Health(3)));
    }

    #[test]
    fn test_store_ref_before_creation() {
        let world = World::new();
        assert!(matches!(
            world.store_ref::<Health>(),
            Err(ComponentError::StoreNotRegistered { .. })
        ));
        assert!(!world.has_store::<Health>());
    }

    #[test]
    fn test_despawn_removes_from_all_stores() {
        let mut world = World::new();
        let entity = Entity::from_raw(1);
        let other = Entity::from_raw(2);
        world.add_component(entity, Health(1)).unwrap();
        world.add_component(entity, Name("ship".to_string())).unwrap();
        world.add_component(other, Health(2)).unwrap();

        assert_eq!(world.despawn(entity), 2);
        assert!(world.get_component::<Health>(entity).is_err());
        assert!(world.get_component::<Name>(entity).is_err());
        assert_eq!(world.get_component::<Health>(other), Ok(&Health(2)));
        assert_eq!(world.component_count(), 1);
    }

    #[test]
    fn test_get_component_mut() {
        let mut world = World::new();
        let entity = Entity::from_raw(4);
        world.add_component(entity, Health(10)).unwrap();
        world.get_component_mut::<Health>(entity).unwrap().0 = 4;
        assert_eq!(world.get_component::<Health>(entity), Ok(&Health(4)));
    }
}
