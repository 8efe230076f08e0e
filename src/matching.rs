//! Scoring of user-supplied container names against catalogued containers.

/// Score of an exact match against the display name.
pub const DISPLAY_NAME_SCORE: u8 = 100;
/// Score of an exact match against the external id.
pub const INSTANCE_ID_SCORE: u8 = 99;
/// Score of a match against the display name with `/` flattened to `-`.
pub const FLATTENED_NAME_SCORE: u8 = 98;
/// Upper bound of a prefix match score.
pub const MAX_PREFIX_SCORE: u8 = 95;

/// Scores how well `query` identifies the container with display name `username` and
/// external id `instname`.
///
/// Higher is better and `0` means no match. Exact matches win over the flattened display
/// name, which wins over the number of leading characters `query` shares with
/// `instname`. Only `query` is matched against the other two.
///
/// # Examples
///
/// ```
/// # use mesos_catalog::matching::match_identity;
/// assert_eq!(match_identity("db-0", "db-0", "db-0-long-hash"), 100);
/// assert_eq!(match_identity("db_0", "", "db-0-long-hash"), 2);
/// ```
pub fn match_identity(query: &str, username: &str, instname: &str) -> u8 {
    if query == username {
        return DISPLAY_NAME_SCORE;
    }
    if query == instname {
        return INSTANCE_ID_SCORE;
    }
    if query.len() == username.len() && query.chars().eq(username.chars().map(flatten_slash)) {
        return FLATTENED_NAME_SCORE;
    }

    let common = query
        .chars()
        .zip(instname.chars())
        .take(usize::from(MAX_PREFIX_SCORE))
        .take_while(|(q, i)| q == i)
        .count();
    // bounded by MAX_PREFIX_SCORE above
    common as u8
}

fn flatten_slash(c: char) -> char {
    if c == '/' { '-' } else { c }
}
