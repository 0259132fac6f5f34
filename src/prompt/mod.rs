//! Interactive choice of the bump component
//!
//! [choose] builds the three candidate outcomes for a version and hands them
//! to a [Chooser]. The terminal implementation lives in [crate::ui]; tests use
//! [mock::ScriptedChooser].

pub mod mock;

pub use mock::ScriptedChooser;

use crate::domain::{Version, VersionBump};
use crate::error::{BumpError, Result};

/// Presents labeled items and returns the index of the one picked.
///
/// Implementations fail with [BumpError::NoInteractiveTerminal] when no
/// terminal is attached, and with [BumpError::SelectionCancelled] when the
/// user aborts.
pub trait Chooser {
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize>;
}

/// Candidate order as presented to the user
pub const CANDIDATE_ORDER: [VersionBump; 3] =
    [VersionBump::Patch, VersionBump::Minor, VersionBump::Major];

/// Single-step outcomes for each component, in [CANDIDATE_ORDER]
pub fn candidates(current: &Version) -> Result<Vec<(VersionBump, Version)>> {
    CANDIDATE_ORDER
        .iter()
        .map(|&component| Ok((component, current.bump(component)?)))
        .collect()
}

/// Ask which component of `current` to bump.
///
/// Items read `"<component> (<current> -> <candidate>)"`.
pub fn choose(current: &Version, label: &str, chooser: &mut dyn Chooser) -> Result<VersionBump> {
    let candidates = candidates(current)?;
    let items: Vec<String> = candidates
        .iter()
        .map(|(component, next)| format!("{} ({} -> {})", component, current, next))
        .collect();

    let index = chooser.select(label, &items)?;
    candidates
        .get(index)
        .map(|(component, _)| *component)
        .ok_or_else(|| BumpError::cancelled(format!("no candidate at position {}", index + 1)))
}
