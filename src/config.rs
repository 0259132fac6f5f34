use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{BumpPolicy, DEFAULT_NAME_PATTERN, DEFAULT_VERSION};
use crate::error::{BumpError, Result};

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "srcbump.toml";

/// Represents the complete configuration for srcbump.
///
/// Contains the identifier pattern, the version assumed for declarations
/// without a value, the exact-mode guard and output options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,

    #[serde(default = "default_version")]
    pub default_version: String,

    #[serde(default)]
    pub check_version_up: bool,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_name_pattern() -> String {
    DEFAULT_NAME_PATTERN.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Configuration for how resulting versions are printed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    /// One value per line instead of a JSON object
    #[serde(default)]
    pub raw: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name_pattern: default_name_pattern(),
            default_version: default_version(),
            check_version_up: false,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Build the policy these settings describe, with no deltas set.
    ///
    /// # Returns
    /// * `Ok(BumpPolicy)` - Policy carrying the compiled name pattern
    /// * `Err(BumpError::Pattern)` - If `name_pattern` is not a valid regex
    pub fn to_policy(&self) -> Result<BumpPolicy> {
        Ok(BumpPolicy {
            name_pattern: Some(Regex::new(&self.name_pattern)?),
            default_version: Some(self.default_version.clone()),
            check_version_up: self.check_version_up,
            ..BumpPolicy::default()
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `srcbump.toml` in current directory
/// 3. `srcbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config(Path::new(path))?
    } else if local.exists() {
        read_config(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            read_config(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| BumpError::config(e.to_string()))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| BumpError::config(format!("cannot read {}: {}", path.display(), e)))
}
