use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::ResultOkLogExt;
use crate::fsutil;

use super::parser::parse_cgroup_line;
use super::{Error, Result};

/// Resolves the cgroup path of a process.
///
/// Implemented by [`ProcCgroupLookup`] for a real process table and by any
/// `Fn(u32) -> Option<String>` closure.
pub trait CgroupLookup {
    /// Returns the cgroup path of `pid` relative to the cgroup root, or `None` when it
    /// cannot be determined.
    fn lookup_cgroup(&self, pid: u32) -> Option<String>;
}

impl<F> CgroupLookup for F
where
    F: Fn(u32) -> Option<String>,
{
    fn lookup_cgroup(&self, pid: u32) -> Option<String> {
        self(pid)
    }
}

/// Reads `<proc_root>/<pid>/cgroup`.
#[derive(Debug, Clone)]
pub struct ProcCgroupLookup {
    proc_root: PathBuf,
}

impl Default for ProcCgroupLookup {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcCgroupLookup {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Reads the first line of the process' cgroup file and returns the path after its first `/`.
    ///
    /// # Errors
    ///
    /// - [`Error::FileOpen`] if the file can't be opened, e.g. because the process exited.
    /// - [`Error::ReadLine`] if reading from the file fails.
    /// - [`Error::Empty`] if the file has no content.
    /// - [`Error::Parse`] if the first line is malformed.
    pub fn read_cgroup_path(&self, pid: u32) -> Result<String> {
        let path = self.proc_root.join(pid.to_string()).join("cgroup");
        let mut reader = fsutil::open_file_reader(&path)?;

        let mut line = String::with_capacity(256);
        let n = reader
            .read_line(&mut line)
            .map_err(|source| Error::ReadLine {
                path: path.clone(),
                source,
            })?;
        if n == 0 {
            return Err(Error::Empty { path });
        }

        let cgroup_line =
            parse_cgroup_line(line.as_str()).map_err(|source| Error::Parse {
                path: path.clone(),
                source,
            })?;
        log::trace!(
            "pid={} hierarchy_id={} cgroup_path={}",
            pid,
            cgroup_line.hierarchy_id,
            cgroup_line.cgroup_path
        );

        Ok(cgroup_line.cgroup_path.to_owned())
    }
}

impl CgroupLookup for ProcCgroupLookup {
    fn lookup_cgroup(&self, pid: u32) -> Option<String> {
        self.read_cgroup_path(pid).ok_log(log::Level::Debug)
    }
}
