//! External-tool fact source: one PowerShell query over the four OS tables.

use std::time::Duration;

use crate::network::{FactSource, NetworkFacts, SourceError};
use crate::powershell::{InvokeError, PowerShell};

/// The full facts query. Emits one JSON document with the four raw tables
/// (`adapters`, `addresses`, `dns`, `routes`), each row tagged with its
/// interface index so the collector can join them. Errors inside the query
/// are silenced; missing tables simply come back empty.
const FACTS_QUERY: &str = r"
$ErrorActionPreference = 'SilentlyContinue'
[Console]::OutputEncoding = [System.Text.Encoding]::UTF8

$facts = [PSCustomObject]@{
    adapters = @(Get-NetAdapter | ForEach-Object {
        [PSCustomObject]@{
            index = $_.InterfaceIndex
            name = $_.Name
            description = $_.InterfaceDescription
            status = [string]$_.Status
            macAddress = [string]$_.MacAddress
            linkSpeed = [string]$_.LinkSpeed
            speedBits = $_.Speed
        }
    })
    addresses = @(Get-NetIPAddress | ForEach-Object {
        [PSCustomObject]@{
            index = $_.InterfaceIndex
            family = [string]$_.AddressFamily
            address = $_.IPAddress
        }
    })
    dns = @(Get-DnsClientServerAddress -AddressFamily IPv4 | ForEach-Object {
        [PSCustomObject]@{
            index = $_.InterfaceIndex
            servers = @($_.ServerAddresses)
        }
    })
    routes = @(Get-NetRoute -DestinationPrefix '0.0.0.0/0' -AddressFamily IPv4 | ForEach-Object {
        [PSCustomObject]@{
            index = $_.InterfaceIndex
            nextHop = $_.NextHop
        }
    })
}

$facts | ConvertTo-Json -Depth 4 -Compress
";

/// [`FactSource`] backed by a single hidden PowerShell invocation.
///
/// The query string is a compile-time constant; nothing caller-supplied is
/// ever interpolated into it.
#[derive(Debug, Clone)]
pub struct PowerShellSource {
    shell: PowerShell,
}

impl PowerShellSource {
    /// Creates a source whose query is bounded by `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            shell: PowerShell::new(timeout),
        }
    }
}

impl FactSource for PowerShellSource {
    #[cfg(not(tarpaulin_include))]
    fn gather(&self) -> Result<NetworkFacts, SourceError> {
        let output = self.shell.run(FACTS_QUERY).map_err(map_invoke_error)?;
        parse_facts(&output)
    }
}

/// Parses the query's JSON document into [`NetworkFacts`].
///
/// # Errors
///
/// Returns [`SourceError::EmptyOutput`] for blank output and
/// [`SourceError::MalformedOutput`] when the JSON does not parse.
pub fn parse_facts(output: &str) -> Result<NetworkFacts, SourceError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Err(SourceError::EmptyOutput);
    }

    Ok(serde_json::from_str(trimmed)?)
}

fn map_invoke_error(error: InvokeError) -> SourceError {
    match error {
        InvokeError::Spawn(source) | InvokeError::Wait(source) => SourceError::Spawn(source),
        InvokeError::Failed { status, detail } => SourceError::ToolFailed { status, detail },
        InvokeError::Timeout { seconds } => SourceError::Timeout { seconds },
    }
}
