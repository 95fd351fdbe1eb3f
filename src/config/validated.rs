//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Upper bound on the query timeout. Anything longer than this would hang
/// an interactive caller for no benefit.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Which mechanism supplies the raw network facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// One hidden PowerShell query over the OS network cmdlets.
    PowerShell,
    /// Native `GetAdaptersAddresses` call.
    Native,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerShell => write!(f, "powershell"),
            Self::Native => write!(f, "native"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// This is the explicit context value passed into backend construction;
/// there is no process-global configuration state.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional
/// TOML config, or [`ValidatedConfig::load`] to also read the config file
/// named on the CLI.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Fact source mechanism.
    pub source: SourceKind,

    /// Timeout for each external OS query.
    pub timeout: Duration,

    /// Path to the version-manifest JSON file.
    pub manifest: PathBuf,

    /// Verbose logging enabled.
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ source: {}, timeout: {}s, manifest: {} }}",
            self.source,
            self.timeout.as_secs(),
            self.manifest.display(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional
    /// TOML config.
    ///
    /// CLI arguments take precedence over TOML config values; both fall
    /// back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or above the upper bound,
    /// or the source mechanism name is unrecognized.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let source = Self::resolve_source(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let manifest = Self::resolve_manifest(cli, toml);

        Ok(Self {
            source,
            timeout,
            manifest,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_source(cli: &Cli, toml: Option<&TomlConfig>) -> Result<SourceKind, ConfigError> {
        // CLI takes precedence
        if let Some(source) = cli.source {
            return Ok(source.into());
        }

        // Fall back to TOML
        if let Some(toml) = toml {
            if let Some(ref value) = toml.collector.source {
                return parse_source(value);
            }
        }

        parse_source(defaults::SOURCE)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.collector.timeout_secs))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidTimeout {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        if seconds > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                reason: format!("timeout must be at most {MAX_TIMEOUT_SECS}s"),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_manifest(cli: &Cli, toml: Option<&TomlConfig>) -> PathBuf {
        cli.manifest.clone().unwrap_or_else(|| {
            toml.and_then(|t| t.version.manifest.clone())
                .unwrap_or_else(|| PathBuf::from(defaults::MANIFEST))
        })
    }
}

/// Parses a fact source mechanism name.
fn parse_source(value: &str) -> Result<SourceKind, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "powershell" | "ps" => Ok(SourceKind::PowerShell),
        "native" | "api" => Ok(SourceKind::Native),
        _ => Err(ConfigError::InvalidSource {
            value: value.to_string(),
        }),
    }
}

/// Writes the default configuration template to the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, super::toml::default_config_template()).map_err(|e| {
        ConfigError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
