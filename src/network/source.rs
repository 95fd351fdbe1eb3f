//! Fact source trait and error types.

use thiserror::Error;

use super::NetworkFacts;

/// Error type for raw fact gathering.
///
/// Describes what went wrong without dictating recovery strategy. The
/// collector recovers every variant into an empty result; other callers
/// may choose differently.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The external query tool could not be launched.
    #[error("Failed to launch query tool: {0}")]
    Spawn(#[source] std::io::Error),

    /// The external query tool exited with a failure status.
    #[error("Query tool exited with {status}: {detail}")]
    ToolFailed {
        /// Exit status description.
        status: String,
        /// Captured stderr, trimmed.
        detail: String,
    },

    /// The external query tool produced no output.
    #[error("Query tool produced no output")]
    EmptyOutput,

    /// The external query tool's output could not be parsed.
    #[error("Malformed query output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    /// The query did not complete within the configured timeout.
    #[error("Query timed out after {seconds}s")]
    Timeout {
        /// Configured timeout in seconds.
        seconds: u64,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for gathering raw network facts from the operating system.
///
/// # Design
///
/// The query mechanism (external tool, native API) is an implementation
/// choice, not a contract: every implementation produces the same
/// [`NetworkFacts`] tables, keyed by interface index, so the collector's
/// merge logic is testable with an injected fake.
///
/// # Example
///
/// ```ignore
/// use netdeck::network::{FactSource, NetworkFacts, SourceError};
///
/// struct FakeSource(NetworkFacts);
///
/// impl FactSource for FakeSource {
///     fn gather(&self) -> Result<NetworkFacts, SourceError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait FactSource: Send + Sync {
    /// Gathers the four raw OS tables in one blocking query.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the OS facility is unreachable, the
    /// query tool fails or times out, or its output cannot be parsed.
    ///
    /// # Implementation Notes
    ///
    /// - Adapter rows must preserve OS-reported order; the collector does
    ///   not re-sort.
    /// - Implementations return ALL adapters; no filtering here.
    fn gather(&self) -> Result<NetworkFacts, SourceError>;
}
