use regex::Regex;
use std::sync::LazyLock;

use crate::domain::version::{Version, VersionBump};
use crate::error::{BumpError, Result};

/// Identifier pattern used when a policy does not set one.
pub const DEFAULT_NAME_PATTERN: &str = r"^(?i)version$";

/// Current version assumed for declarations without a value.
pub const DEFAULT_VERSION: &str = "0.0.0";

static DEFAULT_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_NAME_PATTERN).expect("default name pattern is a valid regex")
});

/// Per-component increment counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deltas {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Deltas {
    /// A single step of one component, as picked interactively.
    pub fn single(component: VersionBump) -> Self {
        let mut deltas = Deltas::default();
        match component {
            VersionBump::Major => deltas.major = 1,
            VersionBump::Minor => deltas.minor = 1,
            VersionBump::Patch => deltas.patch = 1,
        }
        deltas
    }

    /// The delta that actually applies: major, else minor, else patch.
    /// Lower deltas are ignored once a higher one is non-zero.
    pub fn effective(&self) -> Option<(VersionBump, u64)> {
        if self.major > 0 {
            Some((VersionBump::Major, self.major))
        } else if self.minor > 0 {
            Some((VersionBump::Minor, self.minor))
        } else if self.patch > 0 {
            Some((VersionBump::Patch, self.patch))
        } else {
            None
        }
    }
}

/// How a run computes new versions.
///
/// `exact` takes precedence over every delta. `check_version_up` only has an
/// effect together with `exact`, since delta bumps always increase.
#[derive(Debug, Clone, Default)]
pub struct BumpPolicy {
    pub major_delta: u64,
    pub minor_delta: u64,
    pub patch_delta: u64,
    pub exact: Option<String>,
    /// Matched against bare identifier names. Defaults to `^(?i)version$`.
    pub name_pattern: Option<Regex>,
    /// Defaults to `0.0.0`.
    pub default_version: Option<String>,
    pub check_version_up: bool,
    pub prompt: bool,
}

impl BumpPolicy {
    pub fn deltas(&self) -> Deltas {
        Deltas {
            major: self.major_delta,
            minor: self.minor_delta,
            patch: self.patch_delta,
        }
    }

    pub fn name_pattern(&self) -> &Regex {
        self.name_pattern.as_ref().unwrap_or(&*DEFAULT_NAME_REGEX)
    }

    pub fn default_version(&self) -> &str {
        self.default_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
    }

    /// Whether each match asks the user for its delta. Exact mode never prompts.
    pub fn prompts(&self) -> bool {
        self.prompt && self.exact.is_none()
    }

    /// Compute the next version from `current` with the configured deltas.
    pub fn resolve(&self, current: &str) -> Result<String> {
        self.resolve_with(current, self.deltas())
    }

    /// Compute the next version from `current`, using `deltas` in place of
    /// the configured ones. Exact mode still wins.
    pub fn resolve_with(&self, current: &str, deltas: Deltas) -> Result<String> {
        if let Some(exact) = &self.exact {
            return self.resolve_exact(exact, current);
        }

        let version = Version::parse(current)?;
        match deltas.effective() {
            Some((component, count)) => Ok(version.increment(component, count)?.to_string()),
            None => Ok(version.to_string()),
        }
    }

    fn resolve_exact(&self, exact: &str, current: &str) -> Result<String> {
        let target = Version::parse(exact).map_err(|e| match e {
            BumpError::Parse { input, reason } => BumpError::invalid_exact(input, reason),
            other => other,
        })?;

        if self.check_version_up {
            // An unparsable current value has nothing to compare against.
            if let Ok(current_version) = Version::parse(current) {
                if target <= current_version {
                    return Err(BumpError::NotGreater {
                        exact: target.to_string(),
                        current: current_version.to_string(),
                    });
                }
            }
        }

        Ok(target.to_string())
    }
}
