//! Domain logic - version values and bump rules, independent of any source language

pub mod policy;
pub mod version;
pub mod versions;

pub use policy::{BumpPolicy, Deltas, DEFAULT_NAME_PATTERN, DEFAULT_VERSION};
pub use version::{Version, VersionBump};
pub use versions::Versions;
