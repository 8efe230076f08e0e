//! Runtime configuration read from the environment.
//!
//! | Variable             | Default          | Meaning                                       |
//! |----------------------|------------------|-----------------------------------------------|
//! | `MESOS_DIR`          | `/var/lib/mesos` | Root of the Mesos agent's on-disk state.      |
//! | `PROC_ROOT`          | `/proc`          | Process table used for cgroup lookups.        |
//! | `POLL_INTERVAL_SECS` | `1`              | Period of the discovery loop, in seconds.     |
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

pub const MESOS_DIR_VAR: &str = "MESOS_DIR";
pub const PROC_ROOT_VAR: &str = "PROC_ROOT";
pub const POLL_INTERVAL_VAR: &str = "POLL_INTERVAL_SECS";

const DEFAULT_MESOS_DIR: &str = "/var/lib/mesos";
const DEFAULT_PROC_ROOT: &str = "/proc";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable `{var}` is not valid unicode")]
    NotUnicode { var: &'static str },
    #[error("invalid value `{value}` for `{var}`: {source}")]
    InvalidInterval {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("`{var}` must be greater than zero")]
    ZeroInterval { var: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mesos_dir: PathBuf,
    pub proc_root: PathBuf,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mesos_dir: PathBuf::from(DEFAULT_MESOS_DIR),
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if `POLL_INTERVAL_SECS` is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|var| std::env::var_os(var))
    }

    fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let mut config = Config::default();
        if let Some(dir) = var(MESOS_DIR_VAR) {
            config.mesos_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var(PROC_ROOT_VAR) {
            config.proc_root = PathBuf::from(dir);
        }
        if let Some(raw) = var(POLL_INTERVAL_VAR) {
            let raw = raw.into_string().map_err(|_| Error::NotUnicode {
                var: POLL_INTERVAL_VAR,
            })?;
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| Error::InvalidInterval {
                    var: POLL_INTERVAL_VAR,
                    value: raw.clone(),
                    source,
                })?;
            if secs == 0 {
                return Err(Error::ZeroInterval {
                    var: POLL_INTERVAL_VAR,
                });
            }
            config.poll_interval = Duration::from_secs(secs);
        }

        log::debug!("{config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(*v)))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mesos_dir, PathBuf::from("/var/lib/mesos"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            (MESOS_DIR_VAR, "/var/lib/orchestrator"),
            (PROC_ROOT_VAR, "/rootfs/proc"),
            (POLL_INTERVAL_VAR, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.mesos_dir, PathBuf::from("/var/lib/orchestrator"));
        assert_eq!(config.proc_root, PathBuf::from("/rootfs/proc"));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_interval() {
        let err = Config::from_vars(vars(&[(POLL_INTERVAL_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }));

        let err = Config::from_vars(vars(&[(POLL_INTERVAL_VAR, "0")])).unwrap_err();
        assert!(matches!(err, Error::ZeroInterval { .. }));
    }
}
