//! Adapter control: best-effort restart of a named adapter.
//!
//! A restart is a disable/enable cycle performed by the OS. There is no
//! retry and no rollback; a failed restart leaves the adapter in whatever
//! state the OS left it, and the caller decides what to surface.

use std::time::Duration;

use thiserror::Error;

use crate::powershell::{InvokeError, PowerShell};

/// Environment variable carrying the target adapter name into the restart
/// command. The command string references `$env:NETDECK_ADAPTER`; the name
/// itself is never spliced into command text, so shell-significant
/// characters in an adapter name cannot become command syntax.
const ADAPTER_NAME_VAR: &str = "NETDECK_ADAPTER";

/// The restart command. `-ErrorAction Stop` turns an unknown name or an OS
/// refusal into a terminating error, which surfaces as a non-zero exit.
const RESTART_COMMAND: &str = "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; \
     Restart-NetAdapter -Name $env:NETDECK_ADAPTER -Confirm:$false -ErrorAction Stop";

/// Error type for adapter restart operations.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The restart tool could not be launched.
    #[error("Failed to launch restart tool: {0}")]
    Spawn(#[source] std::io::Error),

    /// The OS reported the restart did not complete (unknown adapter name,
    /// permission denied, OS-level refusal).
    #[error("Restart of adapter '{name}' failed: {detail}")]
    Refused {
        /// The adapter name the restart targeted.
        name: String,
        /// OS-reported detail, trimmed.
        detail: String,
    },

    /// The restart did not complete within the configured timeout.
    #[error("Restart of adapter '{name}' timed out after {seconds}s")]
    Timeout {
        /// The adapter name the restart targeted.
        name: String,
        /// Configured timeout in seconds.
        seconds: u64,
    },
}

/// Trait for restarting a named adapter.
///
/// Mirrors the fact source seam: the mechanism is injectable so callers and
/// tests can substitute a fake.
pub trait AdapterControl: Send + Sync {
    /// Restarts the adapter matching `name` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] when the OS reports the operation did not
    /// complete. Success means the OS accepted the restart, not that the
    /// link is back up.
    fn restart(&self, name: &str) -> Result<(), ControlError>;
}

/// [`AdapterControl`] backed by a hidden `Restart-NetAdapter` invocation.
#[derive(Debug, Clone)]
pub struct PowerShellControl {
    shell: PowerShell,
}

impl PowerShellControl {
    /// Creates a control whose restart is bounded by `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            shell: PowerShell::new(timeout),
        }
    }
}

impl AdapterControl for PowerShellControl {
    #[cfg(not(tarpaulin_include))]
    fn restart(&self, name: &str) -> Result<(), ControlError> {
        tracing::debug!("Restarting adapter '{name}'");

        self.shell
            .run_with_env(RESTART_COMMAND, &[(ADAPTER_NAME_VAR, name)])
            .map(drop)
            .map_err(|error| map_invoke_error(error, name))
    }
}

fn map_invoke_error(error: InvokeError, name: &str) -> ControlError {
    match error {
        InvokeError::Spawn(source) | InvokeError::Wait(source) => ControlError::Spawn(source),
        InvokeError::Failed { detail, status } => ControlError::Refused {
            name: name.to_string(),
            detail: if detail.is_empty() { status } else { detail },
        },
        InvokeError::Timeout { seconds } => ControlError::Timeout {
            name: name.to_string(),
            seconds,
        },
    }
}
