use std::ffi::OsString;
use std::path::Path;

use crate::cgroup::CgroupLookup;
use crate::fsutil;

use super::{EXECUTORS_DIR, Engine, FRAMEWORKS_DIR};

impl<L: CgroupLookup> Engine<L> {
    /// Locates the container-list directory below the state root.
    ///
    /// Takes the first visible framework directory in directory order. If the frameworks
    /// directory is missing, unreadable or empty, the container list is left unset, which
    /// simply means that no containers are observable right now.
    pub fn locate(&mut self) -> Option<&Path> {
        let frameworks = self.root.join(FRAMEWORKS_DIR);
        self.container_list = first_visible_entry(&frameworks)
            .map(|framework| frameworks.join(framework).join(EXECUTORS_DIR));

        match self.container_list.as_deref() {
            Some(path) => log::debug!("using mesos container list `{}`", path.display()),
            None => log::debug!("no mesos framework found below `{}`", frameworks.display()),
        }
        self.container_list.as_deref()
    }
}

fn first_visible_entry(dir: &Path) -> Option<OsString> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("skipping mesos path `{}`: {}", dir.display(), err);
            return None;
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.file_name()),
            Err(err) => {
                log::warn!("failed to read entry of `{}`: {}", dir.display(), err);
                None
            }
        })
        .find(|name| !fsutil::is_dot_entry(name))
}
