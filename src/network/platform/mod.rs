//! Platform-specific fact source implementations.
//!
//! # Mechanisms
//!
//! - **PowerShell** ([`PowerShellSource`]): one hidden `powershell`
//!   invocation emitting the four raw tables as JSON. Works wherever the
//!   shell exists; this is the default mechanism.
//! - **Native** ([`WindowsApiSource`]): `GetAdaptersAddresses` via the
//!   `windows` crate. Windows builds only.

mod powershell;

#[cfg(windows)]
mod windows;

pub use powershell::{PowerShellSource, parse_facts};

#[cfg(windows)]
pub use windows::WindowsApiSource;
