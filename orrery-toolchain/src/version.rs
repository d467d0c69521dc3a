//! Ordering for toolchain version directory names.
//!
//! Names are split on `.`, `-`, `_` and spaces. Numeric segments compare as
//! numbers, so "10" sorts above "9" and "2022" above "2019". A numeric
//! segment outranks a textual one ("17.0" > "17.preview").

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Text(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainVersion {
    raw: String,
    segments: Vec<Segment>,
}

impl ToolchainVersion {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split(['.', '-', '_', ' '])
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<u64>() {
                Ok(n) => Segment::Number(n),
                Err(_) => Segment::Text(s.to_ascii_lowercase()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Ord for ToolchainVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ToolchainVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ToolchainVersion {
        ToolchainVersion::parse(s)
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert!(v("10") > v("9"));
        assert!(v("2022") > v("2019"));
        assert!(v("17.10.1") > v("17.9.4"));
    }

    #[test]
    fn test_longer_version_wins_on_shared_prefix() {
        assert!(v("17.4.1") > v("17.4"));
    }

    #[test]
    fn test_numbers_outrank_text() {
        assert!(v("17.0") > v("17.preview"));
        assert!(v("2019") > v("Shared"));
    }

    #[test]
    fn test_max_picks_newest() {
        let versions = ["9", "2017", "10", "2022", "2019", "Installer"];
        let newest = versions.iter().map(|s| v(s)).max().unwrap();
        assert_eq!(newest.as_str(), "2022");
    }

    #[test]
    fn test_equal_numbers_with_padding_still_total() {
        assert_ne!(v("07").cmp(&v("7")), Ordering::Equal);
        assert_eq!(v("7").cmp(&v("7")), Ordering::Equal);
    }
}
