//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// netdeck: network adapter dashboard backend
///
/// Enumerates the machine's network adapters (addresses, gateway, DNS,
/// link speed) and restarts a named adapter on request.
#[derive(Debug, Parser)]
#[command(name = "netdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Timeout for OS queries, in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Fact source mechanism
    #[arg(long, value_enum, global = true)]
    pub source: Option<SourceArg>,

    /// Path to the version-manifest file
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for netdeck
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enumerate network adapters
    List {
        /// Emit the adapter records as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Restart a named adapter (disable/enable cycle)
    Restart {
        /// Exact adapter name, as reported by `list`
        name: String,
    },

    /// Print the product version from the manifest
    Version,

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netdeck.toml")]
        output: PathBuf,
    },
}

/// Fact source argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// One hidden PowerShell query over the OS network cmdlets
    #[value(name = "powershell")]
    PowerShell,
    /// Native `GetAdaptersAddresses` call (Windows builds)
    #[value(name = "native")]
    Native,
}

impl From<SourceArg> for super::SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::PowerShell => Self::PowerShell,
            SourceArg::Native => Self::Native,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
