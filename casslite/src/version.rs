//! Cassandra release version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{CassliteError, CassliteResult};

const EXPECTED_FORMAT: &str = "major[.minor[.patch]][-qualifier]";

/// An immutable Cassandra version such as `3.11.3`, `3.11`, `3` or
/// `1.1.0-beta1`.
///
/// Ordering compares major, then minor, then patch numerically. A component
/// absent on both sides is equal at that position; a component absent on one
/// side orders below a present one, so `3 < 3.12 < 4`. The qualifier is
/// excluded from ordering but participates in equality and hashing, which
/// means two versions differing only in their qualifier compare as `Equal`
/// without being `==`. Callers gating behavior on a version should compare,
/// not test equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    major: u32,
    minor: Option<u32>,
    patch: Option<u32>,
    qualifier: Option<String>,
}

impl Version {
    /// Create a full `major.minor.patch` version with no qualifier.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            patch: Some(patch),
            qualifier: None,
        }
    }

    /// Parse version text of the form `major[.minor[.patch]][-qualifier]`.
    pub fn parse(text: &str) -> CassliteResult<Self> {
        let trimmed = text.trim();
        let (release, qualifier) = match trimmed.split_once('-') {
            Some((release, qualifier)) if !qualifier.is_empty() => {
                (release, Some(qualifier.to_string()))
            }
            Some(_) => return Err(invalid(text)),
            None => (trimmed, None),
        };

        let components: Vec<&str> = release.split('.').collect();
        if components.is_empty() || components.len() > 3 {
            return Err(invalid(text));
        }
        let mut numbers = Vec::with_capacity(3);
        for component in components {
            numbers.push(component.parse::<u32>().map_err(|_| invalid(text))?);
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers.get(1).copied(),
            patch: numbers.get(2).copied(),
            qualifier,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> Option<u32> {
        self.minor
    }

    pub fn patch(&self) -> Option<u32> {
        self.patch
    }

    /// Free-text pre-release tag following the hyphen, verbatim.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

fn invalid(text: &str) -> CassliteError {
    CassliteError::Version(format!(
        "cannot parse {text:?}, expected format is {EXPECTED_FORMAT}"
    ))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{qualifier}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = CassliteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Version::parse(&text).map_err(de::Error::custom)
    }
}
