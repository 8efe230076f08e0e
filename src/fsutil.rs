use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Error that occurs when opening a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use mesos_catalog::fsutil;
/// let reader = fsutil::open_file_reader("/proc/self/cgroup")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Reads the first whitespace-delimited token from `reader`.
///
/// Leading blank lines are skipped. Returns `Ok(None)` when the input holds no token at all.
pub fn read_first_token<R: BufRead>(mut reader: R) -> io::Result<Option<String>> {
    let mut line = String::with_capacity(32);
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if let Some(token) = line.split_whitespace().next() {
            return Ok(Some(token.to_owned()));
        }
    }
}

/// Returns `true` for hidden directory entries such as `.`, `..` or `.dotfile`.
pub fn is_dot_entry(name: &std::ffi::OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_open_file_reader_success() {
        let tmp = tempfile::NamedTempFile::new().expect("failed to create temp file");
        let path = tmp.path();
        let reader = open_file_reader(path).expect("should open test file");
        let metadata = reader.get_ref().metadata().unwrap();
        assert!(metadata.is_file());
    }

    #[test]
    fn test_open_file_reader_error() {
        let result = open_file_reader("/definitely/does/not/exist");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.path, PathBuf::from("/definitely/does/not/exist"));
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_first_token() {
        let token = read_first_token("  4821  \n".as_bytes()).unwrap();
        assert_eq!(token.as_deref(), Some("4821"));

        let token = read_first_token("\n\n17 trailing\n".as_bytes()).unwrap();
        assert_eq!(token.as_deref(), Some("17"));
    }

    #[test]
    fn test_read_first_token_empty() {
        assert_eq!(read_first_token("".as_bytes()).unwrap(), None);
        assert_eq!(read_first_token(" \n\t\n".as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_is_dot_entry() {
        assert!(is_dot_entry(std::ffi::OsStr::new(".")));
        assert!(is_dot_entry(std::ffi::OsStr::new("..")));
        assert!(is_dot_entry(std::ffi::OsStr::new(".hidden")));
        assert!(!is_dot_entry(std::ffi::OsStr::new("executor")));
    }
}
