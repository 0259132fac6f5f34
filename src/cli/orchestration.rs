//! Main workflow orchestration logic
//!
//! Loads the compilation units named on the command line, runs each through
//! an [Executor] and decides where the result goes. Keeping this out of
//! `main.rs` lets the workflow run programmatically without clap.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::bump::Executor;
use crate::domain::Versions;
use crate::error::{BumpError, Result};
use crate::source::{loader::write_unit, unit_paths, CompilationUnit, GoFile};
use crate::ui::write_versions;

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments that affect where output goes. The policy
/// itself travels inside the [Executor].
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// File or directory to process
    pub target: PathBuf,

    /// Rewrite files in place instead of printing them
    pub write: bool,

    /// Print the resulting versions of each unit
    pub verbose: bool,

    /// Versions as plain lines instead of JSON
    pub raw: bool,

    /// Only report versions; never emit or write source
    pub show: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        RunArgs {
            target: PathBuf::from("."),
            write: false,
            verbose: false,
            raw: false,
            show: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// New versions per processed file, for files with at least one match
    pub files: BTreeMap<PathBuf, Versions>,
}

impl RunSummary {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &std::path::Path) -> Option<&Versions> {
        self.files.get(path)
    }
}

/// Main bump workflow
///
/// Orchestrates the whole run:
/// 1. Find the Go files named by `args.target`
/// 2. Parse and process each one in turn
/// 3. Report versions, then write or print the rewritten source
///
/// A unit that fails is skipped entirely (nothing printed, nothing written)
/// and the remaining units still run. The first such failure is returned
/// once every unit has been tried.
///
/// # Arguments
///
/// * `args` - Target and output switches
/// * `executor` - Executor carrying the bump policy
/// * `out` - Destination for versions and printed source
///
/// # Returns
///
/// The versions of every matched file. Otherwise the first unit error, or
/// `BumpError::NoMatchFound` when no file contained a matching declaration.
pub fn run<W: Write>(
    args: &RunArgs,
    executor: &mut Executor,
    out: &mut W,
) -> Result<RunSummary> {
    let paths = unit_paths(&args.target)?;
    debug!(units = paths.len(), "processing compilation units");

    let mut summary = RunSummary::default();
    let mut first_error: Option<BumpError> = None;

    for path in &paths {
        let processed = GoFile::read(path).and_then(|mut unit| {
            let versions = executor.process(&mut unit)?;
            Ok((unit, versions))
        });

        let (unit, versions) = match processed {
            Ok(processed) => processed,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unit");
                first_error.get_or_insert(e);
                continue;
            }
        };

        if versions.is_empty() {
            debug!(file = %path.display(), "no matching declaration");
            continue;
        }

        if args.verbose || args.show {
            write_versions(out, &versions, args.raw)?;
        }

        if !args.show {
            let rendered = unit.render();
            if !args.write {
                out.write_all(rendered.as_bytes())?;
            } else if rendered == unit.source() {
                debug!(file = %path.display(), "versions unchanged, not rewriting");
            } else {
                write_unit(&unit)?;
                info!(
                    file = %path.display(),
                    versions = versions.len(),
                    "updated versions"
                );
            }
        }

        summary.files.insert(unit.path().to_path_buf(), versions);
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    if summary.is_empty() {
        return Err(BumpError::NoMatchFound);
    }

    Ok(summary)
}
