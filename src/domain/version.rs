use crate::error::{BumpError, Result};
use std::fmt;

/// Strict semantic version: `major.minor.patch`, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict version string.
    ///
    /// Accepts exactly `N.N.N` where every component is `0` or has no leading
    /// zero and fits in a `u64`. Prefixes such as `v`, surrounding whitespace,
    /// pre-release and build metadata are all rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let parsed =
            semver::Version::parse(text).map_err(|e| BumpError::parse(text, e.to_string()))?;

        if !parsed.pre.is_empty() {
            return Err(BumpError::parse(
                text,
                format!("pre-release segment '{}' is not allowed", parsed.pre),
            ));
        }
        if !parsed.build.is_empty() {
            return Err(BumpError::parse(
                text,
                format!("build metadata '{}' is not allowed", parsed.build),
            ));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump one component by `count` steps.
    ///
    /// Same result as `count` single-step bumps. Fails with
    /// [BumpError::Overflow] when the component would exceed `u64::MAX`.
    pub fn increment(&self, component: VersionBump, count: u64) -> Result<Self> {
        let overflow = || BumpError::Overflow {
            component,
            version: self.to_string(),
        };

        let bumped = match component {
            VersionBump::Major => Version {
                major: self.major.checked_add(count).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(count).ok_or_else(overflow)?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(count).ok_or_else(overflow)?,
            },
        };
        Ok(bumped)
    }

    /// Single-step bump
    pub fn bump(&self, component: VersionBump) -> Result<Self> {
        self.increment(component, 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version component to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
