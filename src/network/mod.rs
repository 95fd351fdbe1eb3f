//! Network layer: raw OS facts, fact sources, and the snapshot collector.
//!
//! This module provides:
//! - Normalized adapter records ([`AdapterRecord`])
//! - Raw per-table OS facts keyed by interface index ([`NetworkFacts`])
//! - The fact gathering seam ([`FactSource`])
//! - The merge-by-interface-index collector ([`collect`], [`merge`])
//! - Platform-specific fact sources ([`platform`])

mod adapter;
mod collector;
mod facts;
pub mod platform;
mod source;

pub use adapter::{AdapterRecord, resolve_speed};
pub use collector::{collect, merge};
pub use facts::{AddressFamily, NetworkFacts, RawAdapter, RawAddress, RawDnsServers, RawRoute};
pub use source::{FactSource, SourceError};
