//! Version string ordering
//!
//! General numeric version comparison used to enforce runtime version floors
//! and to pick the greatest of a set of SDK package identifiers. Handles the
//! messy strings real tools print, e.g. `ruby 2.6.10p210 (2022-04-12 ...)`.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// A parsed version, ordered by numeric dot-separated components.
///
/// Missing components compare as zero, so `3.1` equals `3.1.0`.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
    raw: String,
}

impl Version {
    /// Parse a version from a raw string or a tool's `--version` output.
    ///
    /// Scans for the first whitespace-separated token that starts with a
    /// digit, then reads numeric dot components, ignoring any non-numeric
    /// suffix within a component (`10p210` reads as `10`).
    pub fn parse(input: &str) -> Result<Self> {
        let token = input
            .split_whitespace()
            .find(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .ok_or_else(|| Error::version_parse(input))?;

        let mut components = Vec::new();
        for part in token.split('.') {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                break;
            }
            components.push(
                digits
                    .parse::<u64>()
                    .map_err(|_| Error::version_parse(input))?,
            );
        }

        if components.is_empty() {
            return Err(Error::version_parse(input));
        }

        Ok(Self {
            components,
            raw: token.to_string(),
        })
    }

    /// Whether this version meets the given floor
    pub fn at_least(&self, floor: &Version) -> bool {
        self >= floor
    }

    /// The numeric components
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                other => return other,
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(v("3.1").components(), &[3, 1]);
        assert_eq!(v("34.0.0").components(), &[34, 0, 0]);
    }

    #[test]
    fn test_parse_ruby_output() {
        let version = v("ruby 2.6.10p210 (2022-04-12 revision 67958) [universal.arm64e-darwin23]");
        assert_eq!(version.components(), &[2, 6, 10]);
    }

    #[test]
    fn test_parse_no_number_fails() {
        assert!(Version::parse("no version here").is_err());
    }

    #[test]
    fn test_floor_comparison() {
        let floor = v("3.1");
        assert!(!v("3.0").at_least(&floor));
        assert!(v("3.1").at_least(&floor));
        assert!(v("3.2").at_least(&floor));
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(v("3.1"), v("3.1.0"));
        assert!(v("3.1.1") > v("3.1"));
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert!(v("10.0") > v("9.9"));
        assert!(v("2.10") > v("2.9"));
    }
}
