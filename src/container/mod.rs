//! Container identity and per-container state.
//!
//! - [`ContainerID`]: the executor directory name, used as the external cache key.
//! - [`ContainerRecord`]: the attributes derived for one container (PID, display name,
//!   cgroup path) together with its staleness baseline and [`Freshness`].
//! - [`extract_display_name`]: derives the human-assigned name from an id.
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

mod error;
mod name;
mod record;

pub use error::{Error, Result};
pub use name::extract_display_name;
pub use record::{ContainerRecord, Field, Freshness};

/// The maximum allowed length for a [`ContainerID`].
const CONTAINER_ID_MAX_LEN: usize = 255;

/// A validated container identifier, i.e. the name of an executor directory.
///
/// # Examples
///
/// ```
/// # use mesos_catalog::container::ContainerID;
/// let id = ContainerID::new("a1-a2-worker7-a4-a5-a6-a7-a8").unwrap();
/// assert_eq!(id.as_ref(), "a1-a2-worker7-a4-a5-a6-a7-a8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerID(Arc<str>);

impl ContainerID {
    /// Creates a new `ContainerID` from the given raw id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] if the input is empty, exceeds
    /// [`CONTAINER_ID_MAX_LEN`] bytes or contains a path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mesos_catalog::container::ContainerID;
    /// assert!(ContainerID::new("").is_err());
    /// assert!(ContainerID::new("runs/latest").is_err());
    /// ```
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.is_empty() || src.len() > CONTAINER_ID_MAX_LEN || src.contains('/') {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }

    pub fn to_arc(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for ContainerID {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
