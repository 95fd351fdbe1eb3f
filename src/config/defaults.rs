//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default timeout for external OS queries, in seconds.
pub const TIMEOUT_SECS: u64 = 10;

/// Default version-manifest path, resolved relative to the working directory.
pub const MANIFEST: &str = "manifest.json";

/// Default fact source mechanism name.
pub const SOURCE: &str = "powershell";

/// Default query timeout as a Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
