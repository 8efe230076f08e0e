//! Parser for `/proc/<pid>/cgroup` lines.
//!
//!  file format: `<hierarchy-id>:<controller-list>:<cgroup-path>`
//!      `<hierarchy-id>`:
//!          v1: arbitrary number
//!          v2: always '0'
//!      `<controller-list>`:
//!          v1: comma-separated list of controllers, e.g., cpu,memory
//!          v2: always empty, i.e., ''
//!      `<cgroup-path>`:
//!          v1: path of the controllers in the controller-list relative to the cgroup root
//!          v2: unified path of all controllers relative to the cgroup root

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid cgroup line format: {0:?}")]
    InvalidFormat(String),
    #[error("invalid hierarchy id in cgroup line: {0:?}")]
    InvalidHierarchyID(String),
    #[error("missing `/` in cgroup path: {0:?}")]
    MissingSlash(String),
}

/// A parsed cgroup line borrowing from the input.
#[derive(Debug, PartialEq, Eq)]
pub struct CgroupLine<'a> {
    pub hierarchy_id: u32,
    pub controller_list: Vec<&'a str>,
    /// Everything after the first `/` of the path field.
    pub cgroup_path: &'a str,
}

pub fn parse_cgroup_line(line: &str) -> Result<CgroupLine<'_>, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut it = line.splitn(3, ':');
    let hierarchy_id = it
        .next()
        .ok_or_else(|| ParseError::InvalidFormat(line.to_owned()))?
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidHierarchyID(line.to_owned()))?;
    let controller_list = it
        .next()
        .ok_or_else(|| ParseError::InvalidFormat(line.to_owned()))?;
    let controller_list: Vec<&str> = if controller_list.is_empty() {
        Vec::default()
    } else {
        controller_list.split(',').collect()
    };
    let path = it
        .next()
        .ok_or_else(|| ParseError::InvalidFormat(line.to_owned()))?;
    let (_, cgroup_path) = path
        .split_once('/')
        .ok_or_else(|| ParseError::MissingSlash(line.to_owned()))?;

    Ok(CgroupLine {
        hierarchy_id,
        controller_list,
        cgroup_path: cgroup_path.trim(),
    })
}
