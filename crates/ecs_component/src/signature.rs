//! Component signatures for systems and listeners.
//!
//! A [`Signature`] declares the set of component kinds an entity must hold
//! for a system to act on it or a listener interest to match it. Matching is
//! superset-based: an entity with more kinds than the signature names still
//! matches.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};

/// An ordered set of required component kinds.
///
/// Built once at system/listener registration time, then matched against
/// entity kind sets every tick. A kind that no entity ever holds simply
/// never matches — querying for it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    kinds: BTreeSet<ComponentKind>,
}

impl Signature {
    /// Create a new empty signature. An empty signature matches every entity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    /// Add a required component kind by type.
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        self.kinds.insert(T::kind());
        self
    }

    /// Add a required component kind by tag.
    #[must_use]
    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    /// Returns `true` if the signature names no kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns the number of required kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if this signature requires the given kind.
    #[must_use]
    pub fn requires(&self, kind: ComponentKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Returns `true` if `held` is a superset of the required kinds.
    ///
    /// `held` is the set of kinds an entity currently holds, in any order.
    #[must_use]
    pub fn matches<'a, I>(&self, held: I) -> bool
    where
        I: IntoIterator<Item = &'a ComponentKind>,
    {
        let held: BTreeSet<ComponentKind> = held.into_iter().copied().collect();
        self.kinds.iter().all(|k| held.contains(k))
    }

    /// Iterate over the required kinds in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentKind> {
        self.kinds.iter()
    }
}
