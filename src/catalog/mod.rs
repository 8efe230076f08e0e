//! The instance cache the engine reconciles discovered containers into.
//!
//! The engine only talks to the cache through [`InstanceCache`]: a three-state
//! [`Lookup`] and an idempotent [`InstanceCache::store`] that marks an entry active.
//! Expiring containers that vanished from disk is the cache owner's job; [`Catalog`]
//! is an in-memory owner that does so with [`Catalog::expire_inactive`].
mod memory;
mod snapshot;

pub use memory::Catalog;
pub use snapshot::{ContainerSnapshot, Snapshot};

use crate::container::{ContainerID, ContainerRecord};

/// Result of looking up a container in an [`InstanceCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The container is unknown.
    NotFound,
    /// The container is known but not yet marked live in the current cycle.
    Inactive,
    /// The container is known and already live in the current cycle.
    Active,
}

/// What to store for a container in [`InstanceCache::store`].
#[derive(Debug)]
pub enum Store {
    /// A record for a container seen for the first time.
    New(ContainerRecord),
    /// Keep the record already held and mark it live again.
    Reactivate,
}

/// A cache of container records keyed by [`ContainerID`], owned by the caller.
pub trait InstanceCache {
    fn lookup(&self, id: &ContainerID) -> Lookup;

    /// Stores `entry` under `id` and marks it active. Storing an active entry is a no-op.
    fn store(&self, id: &ContainerID, entry: Store);
}
