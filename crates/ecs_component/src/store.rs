//! Type-erased per-entity component storage.
//!
//! A [`ComponentSet`] is one entity's kind-to-value map, kept in attach order
//! so removal notifications on destroy fire deterministically. The
//! [`ComponentStore`] maps entities to their sets. The store knows nothing
//! about listeners or events — the registry layers those on top.

use std::collections::HashMap;

use crate::component::{BoxedComponent, Component, ComponentKind};
use crate::entity::Entity;

/// One entity's components, keyed by kind.
///
/// An entity holds at most one component of each kind; inserting an existing
/// kind replaces the old value (last-write-wins). Entries stay in attach
/// order. Sets are small (a handful of kinds per entity), so a linear scan
/// beats a hash map here and keeps iteration deterministic.
#[derive(Default)]
pub struct ComponentSet {
    items: Vec<(ComponentKind, BoxedComponent)>,
}

impl std::fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Values are type-erased; show the kinds held.
        f.debug_list()
            .entries(self.items.iter().map(|(k, _)| k))
            .finish()
    }
}

impl ComponentSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert a component, replacing any existing value of the same kind.
    ///
    /// Returns the replaced value, if any. A replaced kind keeps its original
    /// position in attach order.
    pub fn insert(&mut self, kind: ComponentKind, value: BoxedComponent) -> Option<BoxedComponent> {
        for (k, v) in &mut self.items {
            if *k == kind {
                return Some(std::mem::replace(v, value));
            }
        }
        self.items.push((kind, value));
        None
    }

    /// Remove and return the component of the given kind, if present.
    pub fn remove(&mut self, kind: ComponentKind) -> Option<BoxedComponent> {
        let pos = self.items.iter().position(|(k, _)| *k == kind)?;
        Some(self.items.remove(pos).1)
    }

    /// Returns a reference to the component of the given kind.
    #[must_use]
    pub fn get(&self, kind: ComponentKind) -> Option<&(dyn std::any::Any + Send)> {
        self.items
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns a mutable reference to the component of the given kind.
    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut (dyn std::any::Any + Send)> {
        self.items
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_mut())
    }

    /// Returns `true` if a component of the given kind is present.
    #[must_use]
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.items.iter().any(|(k, _)| *k == kind)
    }

    /// The kinds held, in attach order.
    pub fn kinds(&self) -> impl Iterator<Item = &ComponentKind> {
        self.items.iter().map(|(k, _)| k)
    }

    /// The number of components held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no components are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Storage for all entities' component sets.
#[derive(Debug, Default)]
pub struct ComponentStore {
    sets: HashMap<Entity, ComponentSet>,
}

impl ComponentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Create an empty component set for a freshly allocated entity.
    pub fn register(&mut self, entity: Entity) {
        self.sets.entry(entity).or_default();
    }

    /// Remove an entity's set entirely, returning it for teardown.
    pub fn unregister(&mut self, entity: Entity) -> Option<ComponentSet> {
        self.sets.remove(&entity)
    }

    /// Returns `true` if the entity is known to the store.
    #[must_use]
    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.sets.contains_key(&entity)
    }

    /// Insert a component on an entity (replace-on-conflict).
    ///
    /// Returns the replaced value, if any, or `None` for an absent entity too;
    /// callers validate entity existence first.
    pub fn insert(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
        value: BoxedComponent,
    ) -> Option<BoxedComponent> {
        self.sets.get_mut(&entity)?.insert(kind, value)
    }

    /// Remove a component from an entity.
    pub fn remove(&mut self, entity: Entity, kind: ComponentKind) -> Option<BoxedComponent> {
        self.sets.get_mut(&entity)?.remove(kind)
    }

    /// Typed access to a component value.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.get_raw(entity, T::kind())?.downcast_ref::<T>()
    }

    /// Typed mutable access to a component value.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.get_raw_mut(entity, T::kind())?.downcast_mut::<T>()
    }

    /// Type-erased access by kind.
    #[must_use]
    pub fn get_raw(&self, entity: Entity, kind: ComponentKind) -> Option<&(dyn std::any::Any + Send)> {
        self.sets.get(&entity)?.get(kind)
    }

    /// Type-erased mutable access by kind.
    pub fn get_raw_mut(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
    ) -> Option<&mut (dyn std::any::Any + Send)> {
        self.sets.get_mut(&entity)?.get_mut(kind)
    }

    /// Returns `true` if the entity holds a component of the given kind.
    #[must_use]
    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.sets
            .get(&entity)
            .is_some_and(|set| set.contains(kind))
    }

    /// The kinds an entity holds, in attach order. Empty for unknown entities.
    pub fn kinds_of(&self, entity: Entity) -> Vec<ComponentKind> {
        self.sets
            .get(&entity)
            .map(|set| set.kinds().copied().collect())
            .unwrap_or_default()
    }
}
