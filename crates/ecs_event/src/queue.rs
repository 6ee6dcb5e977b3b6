//! The [`EventQueue`] component.
//!
//! The queue is itself a component, attached to exactly one designated
//! entity in the world. That makes it reachable through the same registry
//! primitives as everything else — a mutator may even target the queue to
//! enqueue follow-up events.

use std::collections::VecDeque;

use ecs_component::Component;

use crate::event::Event;

/// FIFO queue of pending events.
///
/// Only the event-processing system drains it, once per tick. [`drain`]
/// moves the entire pending batch out at once, so events enqueued while the
/// batch is being processed land in the emptied queue and wait for the next
/// drain — a same-tick enqueue can never cascade into the current drain.
///
/// [`drain`]: EventQueue::drain
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl Component for EventQueue {
    fn type_name() -> &'static str {
        "EventQueue"
    }
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Append an event at the tail.
    pub fn enqueue(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove and return all currently queued events, in enqueue order.
    ///
    /// The queue is left empty; later enqueues accumulate for the next drain.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// The number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
