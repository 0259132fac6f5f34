//! Version bumping over compilation units
//!
//! [locator] finds the declarations to rewrite, [executor] computes and
//! assigns their new versions.

pub mod executor;
pub mod locator;

pub use executor::Executor;
pub use locator::{find_matches, DeclarationMatch, Locator};
