use crate::staleness::StalenessTracker;

use super::ContainerID;

/// An attribute of a [`ContainerRecord`] that is populated from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Pid,
    Cgroup,
}

impl Field {
    const fn bit(self) -> u8 {
        match self {
            Field::Name => 1 << 0,
            Field::Pid => 1 << 1,
            Field::Cgroup => 1 << 2,
        }
    }
}

/// Tracks which fields of a record have been populated since creation or the last reset.
///
/// Marking the same field twice counts once, so a field that never populates keeps the
/// record below [`Freshness::TARGET`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Freshness(u8);

impl Freshness {
    /// Number of fields a complete record has.
    pub const TARGET: u32 = 3;

    pub fn mark(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_complete(&self) -> bool {
        self.count() == Self::TARGET
    }
}

/// The attributes derived for one discovered container.
#[derive(Debug, Clone)]
pub struct ContainerRecord {
    id: ContainerID,
    name: Option<String>,
    pid: Option<u32>,
    cgroup: Option<String>,
    pid_file: StalenessTracker,
    freshness: Freshness,
}

impl ContainerRecord {
    /// Creates an empty record for a newly sighted container.
    pub fn new(id: ContainerID) -> Self {
        Self {
            id,
            name: None,
            pid: None,
            cgroup: None,
            pid_file: StalenessTracker::default(),
            freshness: Freshness::default(),
        }
    }

    pub fn id(&self) -> &ContainerID {
        &self.id
    }

    /// The display name parsed out of the id, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// The cgroup path relative to the cgroup root, e.g. `system.slice/mesos-abc.scope`.
    pub fn cgroup(&self) -> Option<&str> {
        self.cgroup.as_deref()
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Forgets which fields were populated and the PID file baseline, forcing a full re-read.
    pub fn reset_freshness(&mut self) {
        self.freshness = Freshness::default();
        self.pid_file.reset();
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
        self.freshness.mark(Field::Name);
    }

    pub(crate) fn set_pid(&mut self, pid: u32) {
        self.pid = Some(pid);
        self.freshness.mark(Field::Pid);
    }

    pub(crate) fn set_cgroup(&mut self, cgroup: String) {
        self.cgroup = Some(cgroup);
        self.freshness.mark(Field::Cgroup);
    }

    pub(crate) fn pid_file_mut(&mut self) -> &mut StalenessTracker {
        &mut self.pid_file
    }
}
