use serde::Serialize;

use crate::container::{ContainerID, ContainerRecord};

/// Point-in-time view of one catalogued container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSnapshot {
    pub id: ContainerID,
    pub name: Option<String>,
    pub pid: Option<u32>,
    pub cgroup: Option<String>,
    pub active: bool,
    pub complete: bool,
}

impl ContainerSnapshot {
    pub(super) fn new(record: &ContainerRecord, active: bool) -> Self {
        Self {
            id: record.id().clone(),
            name: record.name().map(str::to_owned),
            pid: record.pid(),
            cgroup: record.cgroup().map(str::to_owned),
            active,
            complete: record.freshness().is_complete(),
        }
    }
}

/// Point-in-time view of a whole catalog, ordered by container id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub containers: Vec<ContainerSnapshot>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
