//! Backend facade: the method-call boundary exposed to a GUI or CLI caller.

use crate::config::{SourceKind, ValidatedConfig};
use crate::control::{AdapterControl, ControlError, PowerShellControl};
use crate::network::platform::PowerShellSource;
use crate::network::{AdapterRecord, FactSource, collect};
use crate::version::load_version;

/// The backend behind the dashboard's three operations.
///
/// Owns its fact source, adapter control, and the version string loaded
/// once at construction. Built from an explicit [`ValidatedConfig`] value;
/// no process-global state. Operations are synchronous and blocking, with
/// no internal locking: callers are expected to be naturally serialized
/// (one interactive action at a time).
pub struct Backend {
    source: Box<dyn FactSource>,
    control: Box<dyn AdapterControl>,
    version: String,
}

impl Backend {
    /// Builds a backend from explicit parts. Useful for tests and callers
    /// that supply their own mechanisms.
    #[must_use]
    pub fn new(
        source: Box<dyn FactSource>,
        control: Box<dyn AdapterControl>,
        version: String,
    ) -> Self {
        Self {
            source,
            control,
            version,
        }
    }

    /// Builds a backend from configuration: the configured fact source, a
    /// PowerShell adapter control, and the version manifest read once.
    #[must_use]
    pub fn from_config(config: &ValidatedConfig) -> Self {
        Self::new(
            make_source(config),
            Box::new(PowerShellControl::new(config.timeout)),
            load_version(&config.manifest),
        )
    }

    /// Collects a fresh snapshot of every network adapter.
    ///
    /// Never raises; an empty vector signals "no data available", covering
    /// both a machine without adapters and a failed enumeration.
    #[must_use]
    pub fn collect(&self) -> Vec<AdapterRecord> {
        collect(self.source.as_ref())
    }

    /// Restarts the adapter matching `name` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] when the OS reports the restart did not
    /// complete. The caller may re-run [`Self::collect`] afterward to
    /// reflect actual post-attempt state.
    pub fn restart(&self, name: &str) -> Result<(), ControlError> {
        self.control.restart(name)
    }

    /// Returns the product version loaded at construction, or `""` when
    /// the manifest was missing or malformed.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Constructs the configured fact source.
///
/// The native source only exists on Windows builds; elsewhere a `native`
/// selection degrades to the PowerShell source with a warning.
fn make_source(config: &ValidatedConfig) -> Box<dyn FactSource> {
    match config.source {
        SourceKind::PowerShell => Box::new(PowerShellSource::new(config.timeout)),
        #[cfg(windows)]
        SourceKind::Native => Box::new(crate::network::platform::WindowsApiSource::new()),
        #[cfg(not(windows))]
        SourceKind::Native => {
            tracing::warn!("Native source is Windows-only; falling back to powershell");
            Box::new(PowerShellSource::new(config.timeout))
        }
    }
}
