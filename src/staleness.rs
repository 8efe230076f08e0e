//! Cheap change detection based on filesystem metadata.
//!
//! A [`StalenessTracker`] remembers the last observation of a single path, either a
//! [`FileStamp`] or the error the metadata query failed with, and reports whether a new
//! observation differs from it. A path that keeps failing with the same error is stable;
//! a missing directory is an ordinary state, not an exceptional one.

use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::SystemTime;

/// Result of a staleness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// The path looks exactly as it did on the previous check.
    Unchanged,
    /// The path changed (or was observed for the first time).
    Changed,
}

impl Staleness {
    pub fn is_changed(self) -> bool {
        matches!(self, Staleness::Changed)
    }
}

/// The metadata signature of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    modified: Option<SystemTime>,
    ctime: (i64, i64),
    len: u64,
    dev: u64,
    ino: u64,
}

impl From<&std::fs::Metadata> for FileStamp {
    fn from(metadata: &std::fs::Metadata) -> Self {
        Self {
            modified: metadata.modified().ok(),
            ctime: (metadata.ctime(), metadata.ctime_nsec()),
            len: metadata.len(),
            dev: metadata.dev(),
            ino: metadata.ino(),
        }
    }
}

/// What a metadata query returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Present(FileStamp),
    Failed {
        kind: io::ErrorKind,
        raw_os_error: Option<i32>,
    },
    /// No path to observe.
    Unlocated,
}

impl Observation {
    /// Queries the metadata of `path`, following symlinks.
    pub fn of(path: impl AsRef<Path>) -> Self {
        match std::fs::metadata(path) {
            Ok(metadata) => Observation::Present(FileStamp::from(&metadata)),
            Err(err) => Observation::Failed {
                kind: err.kind(),
                raw_os_error: err.raw_os_error(),
            },
        }
    }
}

/// Remembers the last [`Observation`] of one path.
#[derive(Debug, Clone, Default)]
pub struct StalenessTracker {
    baseline: Option<Observation>,
}

impl StalenessTracker {
    /// Observes `path` and compares the result with the stored baseline.
    ///
    /// On [`Staleness::Changed`] the new observation becomes the baseline.
    pub fn check(&mut self, path: impl AsRef<Path>) -> Staleness {
        self.record(Observation::of(path))
    }

    /// Compares an already taken observation with the baseline.
    pub fn record(&mut self, observation: Observation) -> Staleness {
        if self.baseline == Some(observation) {
            return Staleness::Unchanged;
        }
        log::trace!("staleness baseline changed: {:?} -> {:?}", self.baseline, observation);
        self.baseline = Some(observation);
        Staleness::Changed
    }

    /// Forgets the baseline so that the next check reports [`Staleness::Changed`].
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    pub fn baseline(&self) -> Option<&Observation> {
        self.baseline.as_ref()
    }
}
