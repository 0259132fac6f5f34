//! Pure formatting functions for UI output.
//!
//! Status and errors go to stderr so that stdout only ever carries rewritten
//! source or version values.

use std::io::{self, Write};

use console::style;

use crate::domain::Versions;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Render the versions of one unit.
///
/// JSON prints a single object with sorted keys on one line. Raw prints one
/// value per line in discovery order.
///
/// # Arguments
/// * `out` - Destination writer
/// * `versions` - Identifier to new version mapping of one unit
/// * `raw` - Plain values instead of JSON
pub fn write_versions<W: Write + ?Sized>(
    out: &mut W,
    versions: &Versions,
    raw: bool,
) -> io::Result<()> {
    if raw {
        for value in versions.values() {
            writeln!(out, "{}", value)?;
        }
        return Ok(());
    }

    let json = serde_json::to_string(versions).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

/// Format a one-line summary of a rewritten file.
///
/// # Arguments
/// * `file` - Display form of the file path
/// * `versions` - Versions written into it
pub fn format_rewrite_summary(file: &str, versions: &Versions) -> String {
    let changes: Vec<String> = versions
        .iter()
        .map(|(name, version)| format!("{}={}", name, version))
        .collect();
    format!("Updated {} ({})", file, changes.join(", "))
}
