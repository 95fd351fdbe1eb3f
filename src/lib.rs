//! netdeck: network adapter dashboard backend
//!
//! A library for enumerating a machine's network adapters into normalized
//! per-adapter records and restarting a named adapter on request.

pub mod backend;
pub mod config;
pub mod control;
pub mod network;
pub mod powershell;
pub mod version;
