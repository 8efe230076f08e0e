use std::io;
use std::path::PathBuf;

use crate::fsutil;

/// Errors returned by [`Engine::refresh_value`](super::Engine::refresh_value).
///
/// All of them are transient: the next refresh retries.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("no mesos container list located")]
    Unlocated,
    #[error(transparent)]
    Open(#[from] fsutil::FileOpenError),
    #[error("failed to read pid file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ValueError {
    /// The underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            ValueError::Unlocated => None,
            ValueError::Open(err) => Some(&err.source),
            ValueError::Read { source, .. } => Some(source),
        }
    }

    /// The negated OS error code, for callers that report errno-style statuses.
    pub fn status(&self) -> Option<i32> {
        self.io_error()
            .and_then(io::Error::raw_os_error)
            .map(|code| -code)
    }
}
