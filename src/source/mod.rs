//! Source abstraction layer
//!
//! The bump engine never walks a full syntax tree. It only needs a narrow view
//! of a compilation unit: its top-level named declarations, each with an
//! optional initializer and one assignable value slot. The traits here define
//! that view.
//!
//! Implementations:
//!
//! - [go::GoFile]: Go source files, rewritten losslessly
//! - [mock::MemoryUnit]: an in-memory unit for testing

pub mod go;
pub mod loader;
pub mod mock;
pub mod scanner;

pub use go::GoFile;
pub use loader::unit_paths;
pub use mock::MemoryUnit;

use std::fmt;
use std::path::Path;

/// Position inside a source file, 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Location {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// What currently initializes a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer<'a> {
    /// No initializer; assigning creates one
    Absent,
    /// A plain string literal. `value` is `None` when the literal cannot be unescaped.
    StringLiteral {
        raw: &'a str,
        value: Option<String>,
        location: &'a Location,
    },
    /// Any other expression
    Other { location: &'a Location },
}

/// A named top-level value or constant declaration
pub trait Declaration {
    fn name(&self) -> &str;

    fn location(&self) -> &Location;

    fn initializer(&self) -> Initializer<'_>;

    /// Store `value` as this declaration's string literal.
    fn assign(&mut self, value: &str);
}

/// One parsed source file
///
/// Only top-level declarations are exposed; nested and local bindings are
/// never visible through this trait.
pub trait CompilationUnit {
    fn path(&self) -> &Path;

    fn declarations_mut(&mut self) -> Vec<&mut dyn Declaration>;

    /// Serialize the unit, including every assignment made so far.
    fn render(&self) -> String;
}
