use crate::cgroup::CgroupLookup;
use crate::container::{ContainerRecord, Field, Freshness, extract_display_name};
use crate::fsutil;

use super::{Engine, ValueError};

/// Outcome of a successful [`Engine::refresh_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStatus {
    /// The PID file did not change since the previous refresh; nothing was read.
    Unchanged,
    /// Every attribute of the record is populated.
    Complete,
    /// Some attributes are still missing; try again later.
    Incomplete,
}

impl<L: CgroupLookup> Engine<L> {
    /// Brings the attributes of one container up to date.
    ///
    /// The PID file `<container-list>/<id>/runs/latest/pids/forked.pid` is only re-read
    /// when its metadata changed since the previous refresh of this record. A display name
    /// that cannot be parsed from the id, an unparsable PID or a failed cgroup lookup leave
    /// the respective attribute as it was and keep the record [`ValueStatus::Incomplete`].
    ///
    /// # Errors
    ///
    /// - [`ValueError::Unlocated`] if no container list has been located.
    /// - [`ValueError::Open`] if the PID file cannot be opened; the record is not touched.
    /// - [`ValueError::Read`] if reading the PID file fails.
    pub fn refresh_value(&self, record: &mut ContainerRecord) -> Result<ValueStatus, ValueError> {
        let container_list = self
            .container_list
            .as_deref()
            .ok_or(ValueError::Unlocated)?;
        let path = Self::pid_file_path(container_list, record.id().as_ref());
        if !record.pid_file_mut().check(&path).is_changed() {
            return Ok(ValueStatus::Unchanged);
        }

        log::debug!("refreshing mesos container values from `{}`", path.display());
        let reader = fsutil::open_file_reader(&path)?;

        match extract_display_name(record.id().as_ref()) {
            Some(name) => record.set_name(name),
            None => log::debug!("no display name in mesos container id {}", record.id()),
        }

        let previous_pid = record.pid();
        let token = fsutil::read_first_token(reader).map_err(|source| ValueError::Read {
            path: path.clone(),
            source,
        })?;
        match token.as_deref().and_then(parse_pid) {
            Some(pid) => record.set_pid(pid),
            None => log::warn!("invalid pid {:?} in `{}`", token, path.display()),
        }

        if !record.freshness().contains(Field::Cgroup) || record.pid() != previous_pid {
            self.enrich_cgroup(record);
        }

        let freshness = record.freshness();
        log::debug!(
            "mesos container {}: uptodate={} of {}",
            record.id(),
            freshness.count(),
            Freshness::TARGET
        );
        if freshness.is_complete() {
            Ok(ValueStatus::Complete)
        } else {
            Ok(ValueStatus::Incomplete)
        }
    }
}

/// Parses a PID file token; `0` is not a valid process id.
pub(super) fn parse_pid(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|&pid| pid > 0)
}
