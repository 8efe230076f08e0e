use std::path::Path;

use crate::catalog::{InstanceCache, Lookup, Store};
use crate::cgroup::CgroupLookup;
use crate::container::{ContainerID, ContainerRecord};
use crate::fsutil;

use super::Engine;
use super::value::parse_pid;

/// Outcome of one [`Engine::refresh_catalog`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Containers seen for the first time.
    pub added: usize,
    /// Known containers that were marked live again.
    pub reactivated: usize,
    /// Containers that were already live in this cycle.
    pub active: usize,
}

impl RefreshSummary {
    /// Number of containers currently listed on disk.
    pub fn listed(&self) -> usize {
        self.added + self.reactivated + self.active
    }
}

impl<L: CgroupLookup> Engine<L> {
    /// Reconciles `cache` with the containers currently listed on disk.
    ///
    /// New containers get a fresh record, known but inactive ones are marked live again,
    /// and live ones are skipped. Containers that vanished from disk are left to the cache
    /// owner. A missing container list is not an error and yields an empty summary.
    pub fn refresh_catalog(&self, cache: &impl InstanceCache) -> RefreshSummary {
        let mut summary = RefreshSummary::default();
        let Some(dir) = self.container_list.as_deref() else {
            log::debug!("no mesos container list located, skipping catalog refresh");
            return summary;
        };

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("skipping mesos path `{}`: {}", dir.display(), err);
                return summary;
            }
        };

        for entry in entries {
            let name = match entry {
                Ok(entry) => entry.file_name(),
                Err(err) => {
                    log::warn!("failed to read entry of `{}`: {}", dir.display(), err);
                    continue;
                }
            };
            if fsutil::is_dot_entry(&name) {
                continue;
            }
            let Some(id) = name
                .to_str()
                .and_then(|name| ContainerID::new(name).ok())
            else {
                log::warn!("ignoring invalid mesos executor entry {:?}", name);
                continue;
            };

            match cache.lookup(&id) {
                Lookup::Active => summary.active += 1,
                Lookup::Inactive => {
                    cache.store(&id, Store::Reactivate);
                    summary.reactivated += 1;
                }
                Lookup::NotFound => {
                    log::debug!("adding mesos container {}", id);
                    let record = self.discover(dir, id.clone());
                    cache.store(&id, Store::New(record));
                    summary.added += 1;
                }
            }
        }

        log::trace!("catalog refresh of `{}`: {:?}", dir.display(), summary);
        summary
    }

    /// Builds the record of a newly sighted container, with its cgroup path if the
    /// primary process is already known.
    fn discover(&self, dir: &Path, id: ContainerID) -> ContainerRecord {
        let mut record = ContainerRecord::new(id);
        let pid_file = Self::pid_file_path(dir, record.id().as_ref());
        match peek_pid(&pid_file) {
            Some(pid) => {
                record.set_pid(pid);
                self.enrich_cgroup(&mut record);
            }
            None => log::debug!(
                "no pid yet for mesos container {}, deferring cgroup lookup",
                record.id()
            ),
        }
        record
    }

    /// Looks up and stores the cgroup path of the record's primary process.
    pub(super) fn enrich_cgroup(&self, record: &mut ContainerRecord) {
        let Some(pid) = record.pid() else {
            return;
        };
        match self.cgroups.lookup_cgroup(pid) {
            Some(cgroup) => record.set_cgroup(cgroup),
            None => log::debug!(
                "no cgroup path for mesos container {} (pid {})",
                record.id(),
                pid
            ),
        }
    }
}

/// Reads the PID file without touching any staleness baseline.
fn peek_pid(path: &Path) -> Option<u32> {
    let reader = fsutil::open_file_reader(path).ok()?;
    let token = fsutil::read_first_token(reader).ok()??;
    parse_pid(&token)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::os::unix::ffi::OsStrExt;

    use super::super::testutil::*;
    use super::*;
    use crate::catalog::Catalog;

    const WORKER: &str = "a1-a2-worker7-a4-a5-a6-a7-a8";

    /// Minimal cache owner that records every store call.
    #[derive(Default)]
    struct RecordingCache {
        entries: RefCell<HashMap<ContainerID, (bool, Option<ContainerRecord>)>>,
        stores: RefCell<Vec<String>>,
    }

    impl InstanceCache for RecordingCache {
        fn lookup(&self, id: &ContainerID) -> Lookup {
            match self.entries.borrow().get(id) {
                None => Lookup::NotFound,
                Some((true, _)) => Lookup::Active,
                Some((false, _)) => Lookup::Inactive,
            }
        }

        fn store(&self, id: &ContainerID, entry: Store) {
            let mut entries = self.entries.borrow_mut();
            let slot = entries.entry(id.clone()).or_insert((false, None));
            slot.0 = true;
            match entry {
                Store::New(record) => {
                    slot.1 = Some(record);
                    self.stores.borrow_mut().push(format!("new:{id}"));
                }
                Store::Reactivate => self.stores.borrow_mut().push(format!("reactivate:{id}")),
            }
        }
    }

    #[test]
    fn test_refresh_adds_new_containers() {
        let root = tempfile::tempdir().unwrap();
        mesos_tree(root.path(), "fw", &[WORKER, "b1-b2-db-b4-b5-b6-b7-b8"]);
        let mut engine = Engine::new(root.path(), no_cgroups);
        engine.locate();

        let cache = RecordingCache::default();
        let summary = engine.refresh_catalog(&cache);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.listed(), 2);
        assert_eq!(cache.entries.borrow().len(), 2);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        mesos_tree(root.path(), "fw", &[WORKER]);
        let mut engine = Engine::new(root.path(), no_cgroups);
        engine.locate();

        let cache = RecordingCache::default();
        engine.refresh_catalog(&cache);
        let summary = engine.refresh_catalog(&cache);
        assert_eq!(
            summary,
            RefreshSummary {
                added: 0,
                reactivated: 0,
                active: 1
            }
        );
        assert_eq!(*cache.stores.borrow(), vec![format!("new:{WORKER}")]);
    }

    #[test]
    fn test_refresh_reactivates_inactive_records() {
        let root = tempfile::tempdir().unwrap();
        mesos_tree(root.path(), "fw", &[WORKER]);
        let mut engine = Engine::new(root.path(), no_cgroups);
        engine.locate();

        let cache = RecordingCache::default();
        engine.refresh_catalog(&cache);
        for slot in cache.entries.borrow_mut().values_mut() {
            slot.0 = false;
        }

        let summary = engine.refresh_catalog(&cache);
        assert_eq!(summary.reactivated, 1);
        assert_eq!(
            cache.stores.borrow().last().map(String::as_str),
            Some(format!("reactivate:{WORKER}").as_str())
        );
    }

    #[test]
    fn test_refresh_leaves_vanished_containers() {
        let root = tempfile::tempdir().unwrap();
        let executors = mesos_tree(root.path(), "fw", &[WORKER]);
        let mut engine = Engine::new(root.path(), no_cgroups);
        engine.locate();

        let catalog = Catalog::default();
        engine.refresh_catalog(&catalog);
        std::fs::remove_dir(executors.join(WORKER)).unwrap();

        catalog.begin_cycle();
        let summary = engine.refresh_catalog(&catalog);
        assert_eq!(summary.listed(), 0);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_refresh_skips_hidden_and_invalid_entries() {
        let root = tempfile::tempdir().unwrap();
        let executors = mesos_tree(root.path(), "fw", &[".tmp", WORKER]);
        std::fs::create_dir(executors.join(std::ffi::OsStr::from_bytes(b"bad\xff"))).unwrap();
        let mut engine = Engine::new(root.path(), no_cgroups);
        engine.locate();

        let cache = RecordingCache::default();
        let summary = engine.refresh_catalog(&cache);
        assert_eq!(summary.added, 1);
    }

    #[test]
    fn test_refresh_without_container_list() {
        let root = tempfile::tempdir().unwrap();
        let engine = Engine::new(root.path(), no_cgroups);
        let cache = RecordingCache::default();
        assert_eq!(engine.refresh_catalog(&cache), RefreshSummary::default());

        let mut engine = engine;
        mesos_tree(root.path(), "fw", &[]);
        engine.locate();
        std::fs::remove_dir_all(root.path().join("meta")).unwrap();
        assert_eq!(engine.refresh_catalog(&cache), RefreshSummary::default());
    }

    #[test]
    fn test_new_records_get_cgroup_when_pid_known() {
        let root = tempfile::tempdir().unwrap();
        let executors = mesos_tree(root.path(), "fw", &[WORKER]);
        write_pid(&executors, WORKER, "4821\n");
        let mut engine = Engine::new(root.path(), |pid: u32| Some(format!("mesos/{pid}")));
        engine.locate();

        let cache = RecordingCache::default();
        engine.refresh_catalog(&cache);

        let entries = cache.entries.borrow();
        let record = entries[WORKER].1.as_ref().unwrap();
        assert_eq!(record.pid(), Some(4821));
        assert_eq!(record.cgroup(), Some("mesos/4821"));
        assert_eq!(record.name(), None);
    }

    #[test]
    fn test_new_records_tolerate_failed_cgroup_lookup() {
        let root = tempfile::tempdir().unwrap();
        let executors = mesos_tree(root.path(), "fw", &[WORKER]);
        write_pid(&executors, WORKER, "4821\n");
        let mut engine = Engine::new(root.path(), no_cgroups);
        engine.locate();

        let cache = RecordingCache::default();
        assert_eq!(engine.refresh_catalog(&cache).added, 1);

        let entries = cache.entries.borrow();
        let record = entries[WORKER].1.as_ref().unwrap();
        assert_eq!(record.pid(), Some(4821));
        assert_eq!(record.cgroup(), None);
    }
}
