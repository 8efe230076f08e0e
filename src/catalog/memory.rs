use dashmap::DashMap;

use crate::cgroup::CgroupLookup;
use crate::container::{ContainerID, ContainerRecord};
use crate::engine::{Engine, ValueError, ValueStatus};
use crate::matching::match_identity;

use super::{ContainerSnapshot, InstanceCache, Lookup, Snapshot, Store};

#[derive(Debug)]
struct Slot {
    record: ContainerRecord,
    active: bool,
}

/// In-memory catalog of discovered containers.
///
/// Entries are marked active when stored and inactive by [`Catalog::begin_cycle`];
/// [`Catalog::expire_inactive`] evicts whatever was not seen since.
#[derive(Debug, Default)]
pub struct Catalog {
    containers: DashMap<ContainerID, Slot>,
}

impl InstanceCache for Catalog {
    fn lookup(&self, id: &ContainerID) -> Lookup {
        match self.containers.get(id) {
            None => Lookup::NotFound,
            Some(slot) if slot.active => Lookup::Active,
            Some(_) => Lookup::Inactive,
        }
    }

    fn store(&self, id: &ContainerID, entry: Store) {
        match entry {
            Store::New(record) => {
                self.containers
                    .entry(id.clone())
                    .and_modify(|slot| slot.active = true)
                    .or_insert(Slot {
                        record,
                        active: true,
                    });
            }
            Store::Reactivate => match self.containers.get_mut(id) {
                Some(mut slot) => slot.active = true,
                None => log::warn!("cannot reactivate unknown container {}", id),
            },
        }
    }
}

impl Catalog {
    /// Marks every entry inactive, so that the next catalog refresh re-confirms them.
    pub fn begin_cycle(&self) {
        self.containers
            .iter_mut()
            .for_each(|mut slot| slot.active = false);
    }

    /// Removes every entry that is not active and returns the removed ids.
    pub fn expire_inactive(&self) -> Vec<ContainerID> {
        let mut expired = Vec::new();
        self.containers.retain(|container_id, slot| {
            if !slot.active {
                log::debug!(
                    target: "mesos catalog",
                    "expiring vanished container: container_id={}",
                    container_id
                );
                expired.push(container_id.clone());
            }
            slot.active
        });
        expired
    }

    /// Runs `f` on the record of `id`, if catalogued.
    pub fn with_record_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ContainerRecord) -> T,
    ) -> Option<T> {
        self.containers.get_mut(id).map(|mut slot| f(&mut slot.record))
    }

    /// Refreshes the values of every active record.
    ///
    /// Failures are logged and returned per container; they never stop the refresh of
    /// the remaining containers.
    pub fn refresh_values<L: CgroupLookup>(
        &self,
        engine: &Engine<L>,
    ) -> Vec<(ContainerID, Result<ValueStatus, ValueError>)> {
        let mut out = Vec::with_capacity(self.containers.len());
        for mut slot in self.containers.iter_mut() {
            if !slot.active {
                continue;
            }
            let result = engine.refresh_value(&mut slot.record);
            if let Err(err) = &result {
                log::debug!(
                    target: "mesos catalog",
                    "failed refreshing container values: container_id={}, error={}",
                    slot.key(),
                    err
                );
            }
            out.push((slot.key().clone(), result));
        }
        out
    }

    /// Resolves a user-supplied name to the best matching container.
    ///
    /// Returns `None` if no container scores above zero. Equal scores resolve to the
    /// smallest id.
    pub fn resolve(&self, query: &str) -> Option<(ContainerID, u8)> {
        self.containers
            .iter()
            .map(|slot| {
                let record = &slot.record;
                let score = match_identity(query, record.name().unwrap_or(""), record.id().as_ref());
                (slot.key().clone(), score)
            })
            .filter(|(_, score)| *score > 0)
            .max_by(|(a_id, a_score), (b_id, b_score)| {
                a_score.cmp(b_score).then_with(|| b_id.cmp(a_id))
            })
    }

    /// Returns the catalogued ids in ascending order.
    pub fn ids(&self) -> Vec<ContainerID> {
        let mut ids: Vec<ContainerID> = self.containers.iter().map(|slot| slot.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut containers: Vec<ContainerSnapshot> = self
            .containers
            .iter()
            .map(|slot| ContainerSnapshot::new(&slot.record, slot.active))
            .collect();
        containers.sort_by(|a, b| a.id.cmp(&b.id));
        Snapshot { containers }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
