//! The event-processing system.
//!
//! [`EventSystem`] drains the designated entity's [`EventQueue`] once per
//! tick and applies each event in FIFO order, each to completion, before the
//! scheduler moves on. It registers **last** in the scheduler, so events
//! enqueued by earlier systems are applied at the end of the same tick;
//! events enqueued during the drain (by a mutator, or by anything the
//! processing touches) wait for the next tick.

use tracing::{debug, warn};

use ecs_component::Signature;
use ecs_registry::EntityRegistry;
use ecs_system::System;

use crate::error::EventError;
use crate::event::Event;
use crate::queue::EventQueue;

/// Drains and applies the world's pending events.
pub struct EventSystem {
    signature: Signature,
}

impl EventSystem {
    /// Create the event system. Its signature is the queue component alone.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: Signature::new().with::<EventQueue>(),
        }
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EventSystem {
    fn name(&self) -> &str {
        "events"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn update(&mut self, registry: &mut EntityRegistry, _dt: f32) -> anyhow::Result<()> {
        let owners = registry.query(&self.signature)?;
        let Some(&owner) = owners.first() else {
            return Ok(());
        };
        if owners.len() > 1 {
            // One designated queue entity per world; extras are ignored.
            warn!(count = owners.len(), "multiple event queue entities, draining the first");
        }

        let events = registry
            .get_mut::<EventQueue>(owner)
            .map(EventQueue::drain)
            .unwrap_or_default();
        if events.is_empty() {
            return Ok(());
        }

        let total = events.len();
        let mut skipped = 0usize;
        for event in events {
            if let Err(err) = apply(registry, event) {
                // Per-event faults are isolated; the drain continues.
                warn!(error = %err, "event skipped");
                skipped += 1;
            }
        }

        debug!(total, skipped, "event queue drained");
        Ok(())
    }
}

/// Apply a single event to the world.
fn apply(registry: &mut EntityRegistry, event: Event) -> Result<(), EventError> {
    match event {
        Event::ComponentChange {
            entity,
            kind,
            mutator,
        } => {
            let Some(value) = registry.get_raw_mut(entity, kind) else {
                return Err(EventError::StaleTarget { entity, kind });
            };
            if !mutator(value) {
                return Err(EventError::KindMismatch { entity, kind });
            }
            Ok(())
        }
        Event::ComponentAdd {
            entity,
            kind,
            component,
        } => registry
            .attach_boxed(entity, kind, component)
            .map_err(|source| EventError::Add {
                entity,
                kind,
                source,
            }),
    }
}

#[cfg(test)]
mod tests {
    use ecs_component::{Component, Entity};

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Log {
        entries: Vec<&'static str>,
    }
    impl Component for Log {
        fn type_name() -> &'static str {
            "Log"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Score {
        points: u32,
    }
    impl Component for Score {
        fn type_name() -> &'static str {
            "Score"
        }
    }

    /// World with a designated queue entity and a log entity.
    fn world() -> (EntityRegistry, Entity, Entity) {
        let mut registry = EntityRegistry::new();
        let queue_owner = registry.create().unwrap();
        registry.attach(queue_owner, EventQueue::new()).unwrap();
        let target = registry.create().unwrap();
        registry.attach(target, Log::default()).unwrap();
        (registry, queue_owner, target)
    }

    fn enqueue(registry: &mut EntityRegistry, owner: Entity, event: Event) {
        registry.get_mut::<EventQueue>(owner).unwrap().enqueue(event);
    }

    #[test]
    fn test_events_apply_in_fifo_order() {
        let (mut registry, owner, target) = world();
        for label in ["a", "b", "c"] {
            enqueue(
                &mut registry,
                owner,
                Event::change::<Log, _>(target, move |log| log.entries.push(label)),
            );
        }

        let mut system = EventSystem::new();
        system.update(&mut registry, 0.0).unwrap();

        assert_eq!(
            registry.get::<Log>(target).unwrap().entries,
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_event_enqueued_during_drain_waits_one_tick() {
        let (mut registry, owner, target) = world();

        // Event A's mutator targets the queue itself and enqueues event B.
        enqueue(
            &mut registry,
            owner,
            Event::change::<EventQueue, _>(owner, move |queue| {
                queue.enqueue(Event::change::<Log, _>(target, |log| {
                    log.entries.push("b");
                }));
            }),
        );

        let mut system = EventSystem::new();
        system.update(&mut registry, 0.0).unwrap();

        // B was not part of A's drain.
        assert!(registry.get::<Log>(target).unwrap().entries.is_empty());
        assert_eq!(registry.get::<EventQueue>(owner).unwrap().len(), 1);

        system.update(&mut registry, 0.0).unwrap();
        assert_eq!(registry.get::<Log>(target).unwrap().entries, vec!["b"]);
    }

    #[test]
    fn test_stale_target_is_skipped_not_fatal() {
        let (mut registry, owner, target) = world();

        // First event targets a kind the entity no longer holds.
        enqueue(
            &mut registry,
            owner,
            Event::change::<Score, _>(target, |s| s.points += 1),
        );
        enqueue(
            &mut registry,
            owner,
            Event::change::<Log, _>(target, |log| log.entries.push("after")),
        );

        let mut system = EventSystem::new();
        system.update(&mut registry, 0.0).unwrap();

        // The bad event was skipped; the one behind it still applied.
        assert_eq!(registry.get::<Log>(target).unwrap().entries, vec!["after"]);
    }

    #[test]
    fn test_component_add_event_attaches() {
        let (mut registry, owner, target) = world();
        enqueue(&mut registry, owner, Event::add(target, Score { points: 3 }));

        let mut system = EventSystem::new();
        system.update(&mut registry, 0.0).unwrap();

        assert_eq!(registry.get::<Score>(target).unwrap().points, 3);
    }

    #[test]
    fn test_component_add_replaces_on_conflict() {
        let (mut registry, owner, target) = world();
        registry.attach(target, Score { points: 1 }).unwrap();
        enqueue(&mut registry, owner, Event::add(target, Score { points: 9 }));

        let mut system = EventSystem::new();
        system.update(&mut registry, 0.0).unwrap();

        assert_eq!(registry.get::<Score>(target).unwrap().points, 9);
    }

    #[test]
    fn test_add_to_destroyed_entity_is_skipped() {
        let (mut registry, owner, target) = world();
        enqueue(&mut registry, owner, Event::add(target, Score { points: 3 }));
        registry.destroy(target).unwrap();

        let mut system = EventSystem::new();
        // Non-fatal: the drain completes.
        system.update(&mut registry, 0.0).unwrap();
        assert!(registry.get::<EventQueue>(owner).unwrap().is_empty());
    }

    #[test]
    fn test_no_queue_entity_is_a_noop() {
        let mut registry = EntityRegistry::new();
        let mut system = EventSystem::new();
        system.update(&mut registry, 0.0).unwrap();
    }
}
