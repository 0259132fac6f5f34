use thiserror::Error;

use crate::domain::VersionBump;
use crate::source::Location;

/// Unified error type for srcbump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("invalid version {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("invalid exact version {input:?}: {reason}")]
    InvalidExact { input: String, reason: String },

    #[error("version {exact} is not greater than the current version {current}")]
    NotGreater { exact: String, current: String },

    #[error("{component} component of {version} overflows")]
    Overflow {
        component: VersionBump,
        version: String,
    },

    #[error("expected string literal")]
    NotAStringLiteral,

    #[error("could not parse: {0}")]
    LiteralDecode(String),

    #[error("no interactive terminal available")]
    NoInteractiveTerminal,

    #[error("selection cancelled: {0}")]
    SelectionCancelled(String),

    #[error("{location}: {source}")]
    Located {
        location: Location,
        #[source]
        source: Box<BumpError>,
    },

    #[error("version not found")]
    NoMatchFound,

    #[error("Source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in srcbump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BumpError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_exact(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BumpError::InvalidExact {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn cancelled(reason: impl Into<String>) -> Self {
        BumpError::SelectionCancelled(reason.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        BumpError::Source(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Attach a source position to this error.
    pub fn at(self, location: Location) -> Self {
        BumpError::Located {
            location,
            source: Box::new(self),
        }
    }

    /// The underlying error with any positional wrappers removed.
    pub fn root(&self) -> &BumpError {
        match self {
            BumpError::Located { source, .. } => source.root(),
            other => other,
        }
    }

    /// Position of the error, if one was attached.
    pub fn location(&self) -> Option<&Location> {
        match self {
            BumpError::Located { location, .. } => Some(location),
            _ => None,
        }
    }
}
