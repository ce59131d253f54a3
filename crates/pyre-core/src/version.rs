//! Host version tuples

use crate::error::{PyreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor` host version, ordered lexicographically
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse `"3.36"`, `"3.36.1"` or a bare major like `"40"`.
    /// A patch component is checked and then dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.trim().splitn(3, '.');
        let major = parts.next().unwrap_or_default();
        let minor = parts.next().unwrap_or("0");
        if let Some(patch) = parts.next() {
            patch
                .parse::<u32>()
                .map_err(|_| PyreError::VersionParse(input.to_string()))?;
        }
        let major = major
            .parse()
            .map_err(|_| PyreError::VersionParse(input.to_string()))?;
        let minor = minor
            .parse()
            .map_err(|_| PyreError::VersionParse(input.to_string()))?;
        Ok(Self { major, minor })
    }

    /// Whether a host running `self` can run something requiring `required`
    pub fn satisfies(&self, required: Version) -> bool {
        *self >= required
    }
}

impl FromStr for Version {
    type Err = PyreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let v = Version::parse("3.36").unwrap();
        assert_eq!(v, Version::new(3, 36));
        assert_eq!(v.to_string(), "3.36");
        assert_eq!(Version::parse("40").unwrap(), Version::new(40, 0));
        assert!(Version::parse("three").is_err());
        assert!(Version::parse("3.x").is_err());
    }

    #[test]
    fn test_parse_ignores_patch() {
        assert_eq!(Version::parse("3.36.1").unwrap(), Version::new(3, 36));
        assert_eq!(Version::parse("45.2.0").unwrap(), Version::new(45, 2));
        assert!(Version::parse("3.36.x").is_err());
        assert!(Version::parse("3.36.1.4").is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(Version::new(3, 38) > Version::new(3, 36));
        assert!(Version::new(40, 0) > Version::new(3, 38));
        assert!(Version::new(3, 4) < Version::new(3, 36));
        assert!(Version::new(3, 36).satisfies(Version::new(3, 36)));
        assert!(!Version::new(3, 34).satisfies(Version::new(3, 36)));
    }
}
