pub mod bump;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod prompt;
pub mod source;
pub mod ui;

pub use bump::Executor;
pub use domain::{BumpPolicy, Version, VersionBump, Versions};
pub use error::{BumpError, Result};
