//! Core [`Component`] trait and kind tags.
//!
//! Every piece of data attached to an entity implements [`Component`]. The
//! trait requires `Any + Send` so components can be stored type-erased and
//! the whole world can be handed between threads at tick boundaries.
//!
//! ## Kind identity
//!
//! [`ComponentKind`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. Storage indexing and signature matching
//! operate on this explicit tag, never on runtime type introspection —
//! downcasting is only used as a checked access mechanism once the kind has
//! already selected the slot.

use std::any::Any;

use serde::{Deserialize, Serialize};

/// A unique identifier for a component kind, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
///
/// The tag is deterministic: the same name always yields the same kind, in
/// any build, on any platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentKind(pub u64);

impl ComponentKind {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentKind`] from a component's string name using
    /// the FNV-1a 64-bit hash algorithm.
    ///
    /// This is the **canonical** way to derive a kind tag.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentKind`] for a Rust component type `T`.
    ///
    /// Hashes `T::type_name()` with FNV-1a, producing the same result as
    /// [`ComponentKind::from_name`] with the same string.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kind({:#018x})", self.0)
    }
}

/// A type-erased component value.
///
/// The store keys these by [`ComponentKind`]; typed access downcasts through
/// `Any` after the kind has selected the slot.
pub type BoxedComponent = Box<dyn Any + Send>;

/// The core component trait.
///
/// All data attached to entities must implement this trait. An entity holds
/// at most one component of each kind; each component value is owned by
/// exactly one entity.
///
/// # Examples
///
/// ```rust
/// use ecs_component::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Any + Send {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Returns the [`ComponentKind`] for this component type.
    ///
    /// The default implementation hashes [`Component::type_name()`] with
    /// FNV-1a 64-bit, producing a deterministic tag.
    fn kind() -> ComponentKind
    where
        Self: Sized,
    {
        ComponentKind::from_name(Self::type_name())
    }
}
