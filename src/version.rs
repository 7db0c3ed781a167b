// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Version parsing and comparison module

use crate::error::{GatekeeperError, Result};
use std::fmt;
use std::str::FromStr;

/// A major/minor/patch version triple.
///
/// Constructed either from the structured fields the server API returns or
/// from a release tag such as "v1.118.0".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a release tag, stripping at most one leading non-digit prefix
    /// character (e.g., "v1.2.3" or "V1.2.3"). A bare "1.2.3" parses the same.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let stripped = match tag.chars().next() {
            Some(c) if !c.is_ascii_digit() => &tag[c.len_utf8()..],
            _ => tag,
        };
        stripped.parse()
    }
}

impl FromStr for SemVersion {
    type Err = GatekeeperError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();

        if parts.len() != 3 {
            return Err(GatekeeperError::VersionParse(format!(
                "invalid version format: {s}, expected X.Y.Z"
            )));
        }

        let component = |idx: usize, name: &str| {
            parts[idx].parse::<u32>().map_err(|_| {
                GatekeeperError::VersionParse(format!(
                    "invalid {name} version: {}",
                    parts[idx]
                ))
            })
        };

        Ok(Self {
            major: component(0, "major")?,
            minor: component(1, "minor")?,
            patch: component(2, "patch")?,
        })
    }
}

impl fmt::Display for SemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
