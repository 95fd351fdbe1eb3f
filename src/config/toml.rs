//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Collector configuration section
    #[serde(default)]
    pub collector: CollectorSection,

    /// Version manifest configuration section
    #[serde(default)]
    pub version: VersionSection,
}

/// Collector configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorSection {
    /// Fact source mechanism: "powershell" or "native"
    pub source: Option<String>,

    /// Timeout for OS queries, in seconds
    pub timeout_secs: Option<u64>,
}

/// Version manifest configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionSection {
    /// Path to the version-manifest JSON file
    pub manifest: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netdeck Configuration File

[collector]
# Fact source mechanism (default: "powershell")
# Accepted values: "powershell" (one hidden PowerShell query) or
# "native" (GetAdaptersAddresses; Windows builds only)
# source = "powershell"

# Timeout for OS queries in seconds (default: 10)
# timeout_secs = 10

[version]
# Path to the version-manifest JSON file (default: "manifest.json")
# The manifest shape is {"info": {"productVersion": "1.2.3"}}
# manifest = "manifest.json"
"#
    .to_string()
}
