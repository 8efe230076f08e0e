//! Best-effort cgroup enrichment for discovered containers.
//!
//! The cgroup path of a container is taken from the first line of
//! `/proc/<pid>/cgroup` of its primary process. Lookups go through the
//! [`CgroupLookup`] capability so they can be replaced without a real process table.
mod error;
mod lookup;
mod parser;

pub use error::{Error, Result};
pub use lookup::{CgroupLookup, ProcCgroupLookup};
pub use parser::{CgroupLine, ParseError, parse_cgroup_line};
