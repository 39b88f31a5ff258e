//! Navigation path through the virtual hierarchy.

use serde::{Deserialize, Serialize};

/// An ordered sequence of path segments, length 0–4.
///
/// Semantically: `[]` = root (clients), `[client]` = years,
/// `[client, year]` = months, `[client, year, month]` = categories,
/// `[client, year, month, category]` = files. Segments that do not match
/// the expected pattern are treated as literal strings, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPath {
    segments: Vec<String>,
}

impl NavPath {
    /// The root path (client listing).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments. Empty segments are dropped.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    /// Parse a slash-delimited path string.
    pub fn parse(path: &str) -> Self {
        Self::new(path.split('/').map(str::to_string))
    }

    /// Number of segments (the navigation depth).
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The segment at the given index, if present.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// The client segment (index 0), if present.
    pub fn client_segment(&self) -> Option<&str> {
        self.segment(0)
    }

    /// Join the segments into a storage prefix.
    pub fn join(&self) -> String {
        self.segments.join("/")
    }

    /// A new path with one more segment appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }
}

impl std::fmt::Display for NavPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.join())
    }
}

/// Whether a segment is a four-digit year (`^\d{4}$`).
pub fn is_year_segment(segment: &str) -> bool {
    segment.len() == 4 && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a segment is a zero-padded month number `01`–`12`.
pub fn is_month_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return false;
    }
    matches!(segment.parse::<u8>(), Ok(1..=12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_empty_segments() {
        let path = NavPath::parse("c1/2023//01/");
        assert_eq!(path.segments(), ["c1", "2023", "01"]);
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_join_and_child() {
        let path = NavPath::new(["c1", "2023"]);
        assert_eq!(path.join(), "c1/2023");
        assert_eq!(path.child("01").join(), "c1/2023/01");
    }

    #[test]
    fn test_year_segment_pattern() {
        assert!(is_year_segment("2023"));
        assert!(is_year_segment("0001"));
        assert!(!is_year_segment("202"));
        assert!(!is_year_segment("20233"));
        assert!(!is_year_segment("20ab"));
    }

    #[test]
    fn test_month_segment_pattern() {
        assert!(is_month_segment("01"));
        assert!(is_month_segment("09"));
        assert!(is_month_segment("12"));
        assert!(!is_month_segment("00"));
        assert!(!is_month_segment("13"));
        assert!(!is_month_segment("1"));
        assert!(!is_month_segment("ab"));
    }
}
