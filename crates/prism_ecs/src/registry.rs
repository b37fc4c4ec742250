//! The component registry.
//!
//! One typed store per component type, keyed by [`ComponentTypeId`]. The
//! registry owns every attached component; detaching (or dropping the
//! registry) releases them. There is no per-frame synchronisation here: the
//! engine sequences one mutation phase and one read phase per frame, so at
//! most one borrow path is live at a time.

use std::any::Any;
use std::collections::HashMap;

use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};

/// Errors from registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The entity was never created by this registry.
    #[error("entity {0} was never created by this registry")]
    UnknownEntity(Entity),
}

type Store<T> = HashMap<Entity, T>;

/// Entity allocation plus per-type component storage.
#[derive(Default)]
pub struct Registry {
    allocator: EntityAllocator,
    stores: HashMap<ComponentTypeId, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity.
    pub fn create(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Number of entities created so far.
    #[must_use]
    pub fn entity_count(&self) -> u64 {
        self.allocator.count()
    }

    /// Attach a component to an entity, replacing (and returning) any
    /// component of the same type already attached.
    ///
    /// Fails if the entity was not created by this registry.
    pub fn attach<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, RegistryError> {
        if !self.allocator.contains(entity) {
            return Err(RegistryError::UnknownEntity(entity));
        }
        Ok(self.store_mut::<T>().insert(entity, component))
    }

    /// Borrow the `T` component attached to `entity`, if any.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.store::<T>()?.get(&entity)
    }

    /// Mutably borrow the `T` component attached to `entity`, if any.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.stores
            .get_mut(&ComponentTypeId::of::<T>())?
            .downcast_mut::<Store<T>>()?
            .get_mut(&entity)
    }

    /// Detach and return the `T` component attached to `entity`, if any.
    pub fn detach<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.stores
            .get_mut(&ComponentTypeId::of::<T>())?
            .downcast_mut::<Store<T>>()?
            .remove(&entity)
    }

    /// Returns `true` if `entity` has a `T` component attached.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Iterate over all `(entity, component)` pairs of type `T`.
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.store::<T>()
            .into_iter()
            .flat_map(|store| store.iter().map(|(e, c)| (*e, c)))
    }

    fn store<T: Component>(&self) -> Option<&Store<T>> {
        self.stores
            .get(&ComponentTypeId::of::<T>())?
            .downcast_ref::<Store<T>>()
    }

    fn store_mut<T: Component>(&mut self) -> &mut Store<T> {
        self.stores
            .entry(ComponentTypeId::of::<T>())
            .or_insert_with(|| Box::new(Store::<T>::new()))
            .downcast_mut::<Store<T>>()
            // Stores are keyed by the component's type ID, so the boxed type
            // always matches unless two components share a type_name.
            .expect("component store type mismatch: duplicate Component::type_name?")
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entities", &self.allocator.count())
            .field("component_types", &self.stores.len())
            .finish()
    }
}
