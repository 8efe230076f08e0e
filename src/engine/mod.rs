//! Discovery engine for the Mesos agent's on-disk state.
//!
//! An [`Engine`] owns the state root, the located container-list directory
//! (`<root>/meta/slaves/latest/frameworks/<framework>/executors`) and the staleness
//! baseline of that directory. The surrounding daemon drives it through:
//!
//! - [`Engine::locate`] once at startup,
//! - [`Engine::is_catalog_stale`] before every re-scan,
//! - [`Engine::refresh_catalog`] when the container set changed,
//! - [`Engine::refresh_value`] for each container whose attributes are needed.
//!
//! All operations block on filesystem I/O and must not run concurrently against the
//! same cache.
use std::path::{Path, PathBuf};

use crate::cgroup::{CgroupLookup, ProcCgroupLookup};
use crate::config::Config;
use crate::staleness::{Observation, Staleness, StalenessTracker};

mod catalog;
mod error;
mod locate;
mod value;

pub use catalog::RefreshSummary;
pub use error::ValueError;
pub use value::ValueStatus;

/// Directory holding one subdirectory per framework, relative to the state root.
const FRAMEWORKS_DIR: &str = "meta/slaves/latest/frameworks";
/// Directory holding one subdirectory per container, relative to a framework directory.
const EXECUTORS_DIR: &str = "executors";
/// PID file of a container's primary process, relative to its executor directory.
const PID_FILE: &str = "runs/latest/pids/forked.pid";

/// Engine context for the Mesos container backend.
#[derive(Debug)]
pub struct Engine<L = ProcCgroupLookup> {
    root: PathBuf,
    container_list: Option<PathBuf>,
    catalog_tracker: StalenessTracker,
    cgroups: L,
}

impl Engine<ProcCgroupLookup> {
    /// Creates an engine for the state root and process table named in `config`.
    ///
    /// The container list is not located yet; call [`Engine::locate`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.mesos_dir.clone(),
            ProcCgroupLookup::new(config.proc_root.clone()),
        )
    }
}

impl<L: CgroupLookup> Engine<L> {
    pub fn new(root: impl Into<PathBuf>, cgroups: L) -> Self {
        Self {
            root: root.into(),
            container_list: None,
            catalog_tracker: StalenessTracker::default(),
            cgroups,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The located container-list directory, if any.
    pub fn container_list(&self) -> Option<&Path> {
        self.container_list.as_deref()
    }

    /// Checks whether the container-list directory changed since the previous call.
    ///
    /// A directory that keeps failing the same way, or an engine that has not located
    /// anything, is reported as [`Staleness::Unchanged`] after the first call.
    pub fn is_catalog_stale(&mut self) -> Staleness {
        let observation = match self.container_list.as_deref() {
            Some(path) => Observation::of(path),
            None => Observation::Unlocated,
        };
        self.catalog_tracker.record(observation)
    }

    pub(crate) fn pid_file_path(container_list: &Path, id: &str) -> PathBuf {
        container_list.join(id).join(PID_FILE)
    }
}
