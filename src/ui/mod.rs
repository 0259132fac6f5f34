//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use console::{style, Term};

use crate::error::{BumpError, Result};
use crate::prompt::Chooser;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{display_error, display_success, format_rewrite_summary, write_versions};

/// Chooser drawing a numbered list on stderr and reading the answer from the
/// controlling terminal.
///
/// Only stderr has to be a terminal. Stdin and stdout may be redirected, so
/// `srcbump prompt < main.go > out.go`-style pipelines still prompt; console
/// falls back to `/dev/tty` when stdin is not a terminal.
pub struct TerminalChooser {
    term: Term,
}

impl TerminalChooser {
    pub fn new() -> Self {
        TerminalChooser {
            term: Term::stderr(),
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

impl Default for TerminalChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl Chooser for TerminalChooser {
    /// Prompts user to select one of `items`.
    ///
    /// Default selection is the first item if user presses Enter.
    /// `q` or anything that is not a listed number cancels.
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        if !self.is_interactive() {
            return Err(BumpError::NoInteractiveTerminal);
        }

        self.term.write_line("")?;
        self.term.write_line(&style(label).bold().to_string())?;
        for (i, item) in items.iter().enumerate() {
            self.term.write_line(&format!("  {}. {}", i + 1, item))?;
        }
        self.term
            .write_str(&format!("\nSelect (1-{}) [default: 1]: ", items.len()))?;
        self.term.flush()?;

        let input = self.term.read_line()?;
        parse_selection(&input, items.len())
    }
}

/// Turn a typed answer into a 0-based index.
///
/// # Arguments
/// * `input` - The raw line the user entered
/// * `count` - Number of items that were listed
///
/// # Returns
/// * `Ok(usize)` - Index of the picked item; empty input picks the first
/// * `Err(BumpError::SelectionCancelled)` - For `q` or an invalid entry
pub fn parse_selection(input: &str, count: usize) -> Result<usize> {
    let selection = input.trim();

    if selection.is_empty() {
        return Ok(0);
    }
    if selection.eq_ignore_ascii_case("q") {
        return Err(BumpError::cancelled("aborted by user"));
    }

    match selection.parse::<usize>() {
        Ok(index) if index > 0 && index <= count => Ok(index - 1),
        _ => Err(BumpError::cancelled(format!(
            "invalid selection {:?}",
            selection
        ))),
    }
}
