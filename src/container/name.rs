use std::sync::LazyLock;

use regex::Regex;

/// Two dash-delimited segments, the display name, then five more dash-delimited segments.
const DISPLAY_NAME_PATTERN: &str = r"^[^-]*-[^-]*-(.*)-.*-.*-.*-.*-.*$";

static DISPLAY_NAME_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DISPLAY_NAME_PATTERN));

/// Extracts the human-assigned display name embedded in an executor id.
///
/// Returns `None` if the id does not have the expected shape.
///
/// # Examples
///
/// ```
/// # use mesos_catalog::container::extract_display_name;
/// assert_eq!(extract_display_name("a1-a2-worker7-a4-a5-a6-a7-a8").as_deref(), Some("worker7"));
/// assert_eq!(extract_display_name("no-name-here"), None);
/// ```
pub fn extract_display_name(id: &str) -> Option<String> {
    let regex = match DISPLAY_NAME_REGEX.as_ref() {
        Ok(regex) => regex,
        Err(err) => {
            log::debug!("failed to compile display name pattern: {err}");
            return None;
        }
    };

    regex
        .captures(id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_compiles() {
        assert!(DISPLAY_NAME_REGEX.is_ok());
    }

    #[test]
    fn test_extract_simple_name() {
        assert_eq!(
            extract_display_name("a1-a2-worker7-a4-a5-a6-a7-a8").as_deref(),
            Some("worker7")
        );
    }

    #[test]
    fn test_extract_dashed_name() {
        assert_eq!(
            extract_display_name("fw-task-my-web-app-1-2-3-4-5").as_deref(),
            Some("my-web-app")
        );
    }

    #[test]
    fn test_extract_too_few_segments() {
        assert_eq!(extract_display_name("a1-a2-worker7-a4-a5-a6-a7"), None);
        assert_eq!(extract_display_name("plainid"), None);
        assert_eq!(extract_display_name(""), None);
    }

    #[test]
    fn test_extract_empty_segment() {
        assert_eq!(extract_display_name("a1-a2--a4-a5-a6-a7-a8"), None);
    }
}
