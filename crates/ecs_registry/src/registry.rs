//! The entity registry.
//!
//! [`EntityRegistry`] owns entity identities, their component sets, and the
//! listener interests. It is the only mutation path for component membership:
//! `attach` and `detach` are the sole sources of listener notifications.
//!
//! Queries return entities in registry insertion order, so test output and
//! system iteration are reproducible run to run.
//!
//! ## Reentrancy
//!
//! Notifications fire synchronously while the registry is mid-mutation. The
//! strict model applies: any registry call (mutation or query) made from
//! inside a notification callback fails with [`RegistryError::Reentrancy`].
//! Reading a single component via `get`/`get_raw` is allowed — listeners
//! routinely inspect the entity they were notified about.

use std::rc::Rc;

use tracing::{debug, warn};

use ecs_component::{
    BoxedComponent, Component, ComponentKind, ComponentStore, Entity, EntityAllocator, Signature,
};

use crate::error::RegistryError;
use crate::listener::{Interest, SharedListener};

/// Owns entities, their components, and the listener bridge.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    allocator: EntityAllocator,
    /// Live entities in creation order. Queries iterate this, which is what
    /// makes query results deterministic.
    order: Vec<Entity>,
    store: ComponentStore,
    interests: Vec<Interest>,
    /// The entity currently being notified about, if a notification is in
    /// flight. Doubles as the reentrancy guard.
    notifying: Option<Entity>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            order: Vec::new(),
            store: ComponentStore::new(),
            interests: Vec::new(),
            notifying: None,
        }
    }

    // -- Entity lifecycle --

    /// Create a new entity with no components.
    ///
    /// # Errors
    ///
    /// Fails with [`RegistryError::Reentrancy`] inside a notification.
    pub fn create(&mut self) -> Result<Entity, RegistryError> {
        self.guard()?;
        let entity = self.allocator.allocate();
        self.store.register(entity);
        self.order.push(entity);
        debug!(%entity, "entity created");
        Ok(entity)
    }

    /// Destroy an entity, detaching all its components.
    ///
    /// Components are detached in attach order, and each detachment fires
    /// removal notifications for every interest that stops matching — so a
    /// single-kind interest sees exactly one removal per kind the entity
    /// held.
    ///
    /// # Errors
    ///
    /// Fails with [`RegistryError::EntityNotFound`] for unknown or already
    /// destroyed entities, and [`RegistryError::Reentrancy`] inside a
    /// notification.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), RegistryError> {
        self.guard()?;
        if !self.store.contains_entity(entity) {
            return Err(RegistryError::EntityNotFound(entity));
        }

        for kind in self.store.kinds_of(entity) {
            let before = self.match_vector(entity);
            self.store.remove(entity, kind);
            let after = self.match_vector(entity);
            self.fire_transitions(entity, &before, &after);
        }

        self.store.unregister(entity);
        self.order.retain(|e| *e != entity);
        debug!(%entity, "entity destroyed");
        Ok(())
    }

    /// Returns `true` if the entity exists and has not been destroyed.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.store.contains_entity(entity)
    }

    /// The number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    // -- Component operations --

    /// Attach a component, replacing any existing component of the same kind.
    ///
    /// Replacement is last-write-wins and is not an error; because the
    /// entity's kind set is unchanged by a replace, no notification fires
    /// for it. A genuinely new kind fires addition notifications for every
    /// interest the entity newly matches.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EntityNotFound`] or [`RegistryError::Reentrancy`].
    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), RegistryError> {
        self.attach_boxed(entity, T::kind(), Box::new(value))
    }

    /// Attach an already boxed component under an explicit kind tag.
    ///
    /// This is the path deferred component-add events take: the event carries
    /// the kind alongside the value, so no downcast is needed here.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EntityNotFound`] or [`RegistryError::Reentrancy`].
    pub fn attach_boxed(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
        value: BoxedComponent,
    ) -> Result<(), RegistryError> {
        self.guard()?;
        if !self.store.contains_entity(entity) {
            return Err(RegistryError::EntityNotFound(entity));
        }

        let before = self.match_vector(entity);
        let replaced = self.store.insert(entity, kind, value);
        if replaced.is_some() {
            debug!(%entity, kind = kind.0, "replaced existing component");
        }
        let after = self.match_vector(entity);
        self.fire_transitions(entity, &before, &after);
        Ok(())
    }

    /// Detach a component, returning its value.
    ///
    /// Detaching a kind the entity does not hold is a silent no-op: `Ok(None)`,
    /// no notification. Otherwise removal notifications fire for every
    /// interest the entity stops matching.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EntityNotFound`] or [`RegistryError::Reentrancy`].
    pub fn detach(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
    ) -> Result<Option<BoxedComponent>, RegistryError> {
        self.guard()?;
        if !self.store.contains_entity(entity) {
            return Err(RegistryError::EntityNotFound(entity));
        }
        if !self.store.has(entity, kind) {
            return Ok(None);
        }

        let before = self.match_vector(entity);
        let value = self.store.remove(entity, kind);
        let after = self.match_vector(entity);
        self.fire_transitions(entity, &before, &after);
        Ok(value)
    }

    /// Explicitly copy a component from one entity to another.
    ///
    /// Component values are exclusively owned, so crossing entities requires
    /// a duplication, never aliasing. Returns `Ok(false)` if `from` does not
    /// hold a `T`. Attach semantics (replace-on-conflict, notifications)
    /// apply on the target.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EntityNotFound`] for the target entity, or
    /// [`RegistryError::Reentrancy`].
    pub fn duplicate<T: Component + Clone>(
        &mut self,
        from: Entity,
        to: Entity,
    ) -> Result<bool, RegistryError> {
        self.guard()?;
        let Some(value) = self.store.get::<T>(from).cloned() else {
            return Ok(false);
        };
        self.attach(to, value)?;
        Ok(true)
    }

    /// Typed read access to a component.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.store.get::<T>(entity)
    }

    /// Typed mutable access to a component.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.store.get_mut::<T>(entity)
    }

    /// Type-erased read access by kind.
    #[must_use]
    pub fn get_raw(&self, entity: Entity, kind: ComponentKind) -> Option<&(dyn std::any::Any + Send)> {
        self.store.get_raw(entity, kind)
    }

    /// Type-erased mutable access by kind.
    pub fn get_raw_mut(
        &mut self,
        entity: Entity,
        kind: ComponentKind,
    ) -> Option<&mut (dyn std::any::Any + Send)> {
        self.store.get_raw_mut(entity, kind)
    }

    /// Returns `true` if the entity holds a component of the given kind.
    #[must_use]
    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.store.has(entity, kind)
    }

    // -- Query --

    /// All entities whose kind set is a superset of the signature, in
    /// creation order.
    ///
    /// A signature naming kinds that no entity holds simply matches nothing;
    /// that is an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Fails with [`RegistryError::Reentrancy`] inside a notification —
    /// iterating the registry while it is mid-mutation is forbidden.
    pub fn query(&self, signature: &Signature) -> Result<Vec<Entity>, RegistryError> {
        self.guard()?;
        Ok(self
            .order
            .iter()
            .copied()
            .filter(|e| {
                let kinds = self.store.kinds_of(*e);
                signature.matches(&kinds)
            })
            .collect())
    }

    // -- Listener bridge --

    /// Register a listener under an interest signature.
    ///
    /// The same listener object may be registered under several signatures;
    /// each registration fires independently. Notifications fire in interest
    /// registration order.
    ///
    /// # Errors
    ///
    /// Fails with [`RegistryError::Reentrancy`] inside a notification.
    pub fn add_listener(
        &mut self,
        signature: Signature,
        listener: SharedListener,
    ) -> Result<(), RegistryError> {
        self.guard()?;
        self.interests.push(Interest {
            signature,
            listener,
        });
        Ok(())
    }

    // -- Internals --

    fn guard(&self) -> Result<(), RegistryError> {
        match self.notifying {
            Some(entity) => Err(RegistryError::Reentrancy(entity)),
            None => Ok(()),
        }
    }

    /// Which interests the entity currently matches, indexed like `interests`.
    fn match_vector(&self, entity: Entity) -> Vec<bool> {
        let kinds = self.store.kinds_of(entity);
        self.interests
            .iter()
            .map(|i| i.signature.matches(&kinds))
            .collect()
    }

    /// Fire added/removed callbacks for interests whose match state flipped.
    fn fire_transitions(&mut self, entity: Entity, before: &[bool], after: &[bool]) {
        // Collect handles first; the listener list must not be borrowed while
        // callbacks run, since callbacks receive `&mut self`.
        let mut fired: Vec<(SharedListener, bool)> = Vec::new();
        for (idx, interest) in self.interests.iter().enumerate() {
            let was = before.get(idx).copied().unwrap_or(false);
            let is = after.get(idx).copied().unwrap_or(false);
            if was != is {
                fired.push((Rc::clone(&interest.listener), is));
            }
        }
        if fired.is_empty() {
            return;
        }

        let prev = self.notifying.replace(entity);
        for (listener, added) in fired {
            match listener.try_borrow_mut() {
                Ok(mut listener) => {
                    if added {
                        listener.on_entity_added(entity, self);
                    } else {
                        listener.on_entity_removed(entity, self);
                    }
                }
                Err(_) => {
                    // The listener cell is already borrowed — typically a
                    // system mutating membership during its own update.
                    warn!(%entity, "listener busy during notification, skipped");
                }
            }
        }
        self.notifying = prev;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::listener::EntityListener;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health {
        current: f32,
    }
    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Armor {
        rating: u32,
    }
    impl Component for Armor {
        fn type_name() -> &'static str {
            "Armor"
        }
    }

    /// Appends labelled added/removed markers to a shared log, so tests can
    /// assert global notification ordering across several recorders.
    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl EntityListener for Recorder {
        fn on_entity_added(&mut self, entity: Entity, _registry: &mut EntityRegistry) {
            self.log
                .borrow_mut()
                .push(format!("{}+{}", self.label, entity.id()));
        }

        fn on_entity_removed(&mut self, entity: Entity, _registry: &mut EntityRegistry) {
            self.log
                .borrow_mut()
                .push(format!("{}-{}", self.label, entity.id()));
        }
    }

    fn recorder(label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> SharedListener {
        Rc::new(RefCell::new(Recorder {
            label,
            log: Rc::clone(log),
        }))
    }

    #[test]
    fn test_attach_get_roundtrip() {
        let mut registry = EntityRegistry::new();
        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 10.0 }).unwrap();
        assert_eq!(registry.get::<Health>(e).unwrap().current, 10.0);
    }

    #[test]
    fn test_attach_to_destroyed_entity_fails() {
        let mut registry = EntityRegistry::new();
        let e = registry.create().unwrap();
        registry.destroy(e).unwrap();
        let err = registry.attach(e, Health { current: 1.0 }).unwrap_err();
        assert!(matches!(err, RegistryError::EntityNotFound(_)));
    }

    #[test]
    fn test_attach_replaces_without_duplicate_notification() {
        let mut registry = EntityRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        registry
            .add_listener(Signature::new().with::<Health>(), recorder("h", &log))
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 10.0 }).unwrap();
        registry.attach(e, Health { current: 5.0 }).unwrap();

        // Last write wins, but the entity matched already — one notification.
        assert_eq!(registry.get::<Health>(e).unwrap().current, 5.0);
        assert_eq!(*log.borrow(), vec![format!("h+{}", e.id())]);
    }

    #[test]
    fn test_destroy_fires_one_removal_per_kind() {
        let mut registry = EntityRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        registry
            .add_listener(Signature::new().with::<Health>(), recorder("h", &log))
            .unwrap();
        registry
            .add_listener(Signature::new().with::<Armor>(), recorder("a", &log))
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 1.0 }).unwrap();
        registry.attach(e, Armor { rating: 2 }).unwrap();
        log.borrow_mut().clear();

        registry.destroy(e).unwrap();

        // Removals in attach order, exactly one per kind held.
        assert_eq!(
            *log.borrow(),
            vec![format!("h-{}", e.id()), format!("a-{}", e.id())]
        );
        assert!(!registry.is_alive(e));
        let all = registry.query(&Signature::new()).unwrap();
        assert!(!all.contains(&e));
    }

    #[test]
    fn test_detach_absent_kind_is_silent_noop() {
        let mut registry = EntityRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        registry
            .add_listener(Signature::new().with::<Health>(), recorder("h", &log))
            .unwrap();

        let e = registry.create().unwrap();
        let detached = registry.detach(e, Health::kind()).unwrap();
        assert!(detached.is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_detach_returns_value_and_notifies() {
        let mut registry = EntityRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        registry
            .add_listener(Signature::new().with::<Health>(), recorder("h", &log))
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 7.0 }).unwrap();
        let detached = registry.detach(e, Health::kind()).unwrap().unwrap();
        let health = detached.downcast_ref::<Health>().unwrap();
        assert_eq!(health.current, 7.0);
        assert_eq!(
            *log.borrow(),
            vec![format!("h+{}", e.id()), format!("h-{}", e.id())]
        );
    }

    #[test]
    fn test_notification_ordering_follows_attach_order() {
        let mut registry = EntityRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        // One listener object, two declared interests.
        let shared = recorder("x", &log);
        registry
            .add_listener(Signature::new().with::<Health>(), Rc::clone(&shared))
            .unwrap();
        registry
            .add_listener(Signature::new().with::<Armor>(), shared)
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 1.0 }).unwrap();
        registry.attach(e, Armor { rating: 1 }).unwrap();

        // Health attached first, so its interest fires strictly first.
        assert_eq!(
            *log.borrow(),
            vec![format!("x+{}", e.id()), format!("x+{}", e.id())]
        );
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_pair_interest_fires_on_full_match_only() {
        let mut registry = EntityRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        registry
            .add_listener(
                Signature::new().with::<Health>().with::<Armor>(),
                recorder("p", &log),
            )
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 1.0 }).unwrap();
        assert!(log.borrow().is_empty());

        registry.attach(e, Armor { rating: 1 }).unwrap();
        assert_eq!(*log.borrow(), vec![format!("p+{}", e.id())]);

        registry.detach(e, Health::kind()).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![format!("p+{}", e.id()), format!("p-{}", e.id())]
        );
    }

    #[test]
    fn test_query_insertion_order_is_deterministic() {
        let mut registry = EntityRegistry::new();
        let e1 = registry.create().unwrap();
        let e2 = registry.create().unwrap();
        let e3 = registry.create().unwrap();
        for e in [e1, e2, e3] {
            registry.attach(e, Health { current: 1.0 }).unwrap();
        }

        let sig = Signature::new().with::<Health>();
        assert_eq!(registry.query(&sig).unwrap(), vec![e1, e2, e3]);
        // Stable across calls.
        assert_eq!(registry.query(&sig).unwrap(), vec![e1, e2, e3]);
    }

    #[test]
    fn test_query_unknown_kind_returns_empty() {
        let mut registry = EntityRegistry::new();
        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 1.0 }).unwrap();

        let sig = Signature::new().with_kind(ComponentKind::from_name("NeverRegistered"));
        assert!(registry.query(&sig).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_copies_value_not_alias() {
        let mut registry = EntityRegistry::new();
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        registry.attach(a, Health { current: 10.0 }).unwrap();

        assert!(registry.duplicate::<Health>(a, b).unwrap());
        registry.get_mut::<Health>(b).unwrap().current = 3.0;

        // Mutating the copy leaves the original untouched.
        assert_eq!(registry.get::<Health>(a).unwrap().current, 10.0);
        assert_eq!(registry.get::<Health>(b).unwrap().current, 3.0);
    }

    #[test]
    fn test_duplicate_missing_source_is_false() {
        let mut registry = EntityRegistry::new();
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        assert!(!registry.duplicate::<Health>(a, b).unwrap());
    }

    /// Attempts a mutation and a query from inside the callback and records
    /// what the registry answered.
    struct Reentrant {
        outcomes: Rc<RefCell<Vec<bool>>>,
    }

    impl EntityListener for Reentrant {
        fn on_entity_added(&mut self, _entity: Entity, registry: &mut EntityRegistry) {
            let create_blocked = matches!(registry.create(), Err(RegistryError::Reentrancy(_)));
            let query_blocked = matches!(
                registry.query(&Signature::new()),
                Err(RegistryError::Reentrancy(_))
            );
            self.outcomes
                .borrow_mut()
                .extend([create_blocked, query_blocked]);
        }

        fn on_entity_removed(&mut self, _entity: Entity, _registry: &mut EntityRegistry) {}
    }

    #[test]
    fn test_reentrant_mutation_and_query_are_rejected() {
        let mut registry = EntityRegistry::new();
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        registry
            .add_listener(
                Signature::new().with::<Health>(),
                Rc::new(RefCell::new(Reentrant {
                    outcomes: Rc::clone(&outcomes),
                })),
            )
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 1.0 }).unwrap();

        assert_eq!(*outcomes.borrow(), vec![true, true]);
        // The guard is released once the notification returns.
        assert!(registry.create().is_ok());
    }

    #[test]
    fn test_reads_allowed_inside_notification() {
        struct Reader {
            seen: Rc<RefCell<Option<f32>>>,
        }
        impl EntityListener for Reader {
            fn on_entity_added(&mut self, entity: Entity, registry: &mut EntityRegistry) {
                *self.seen.borrow_mut() = registry.get::<Health>(entity).map(|h| h.current);
            }
            fn on_entity_removed(&mut self, _entity: Entity, _registry: &mut EntityRegistry) {}
        }

        let mut registry = EntityRegistry::new();
        let seen = Rc::new(RefCell::new(None));
        registry
            .add_listener(
                Signature::new().with::<Health>(),
                Rc::new(RefCell::new(Reader {
                    seen: Rc::clone(&seen),
                })),
            )
            .unwrap();

        let e = registry.create().unwrap();
        registry.attach(e, Health { current: 4.0 }).unwrap();
        assert_eq!(*seen.borrow(), Some(4.0));
    }
}
