//! netdeck: network adapter dashboard backend
//!
//! Entry point for the netdeck command-line interface. Each subcommand is
//! one backend operation: `list` collects adapter records, `restart`
//! bounces a named adapter, `version` prints the manifest version.

use std::process::ExitCode;

use netdeck::backend::Backend;
use netdeck::config::{Cli, Command, ValidatedConfig, write_default_config};
use netdeck::network::AdapterRecord;

mod app;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let backend = Backend::from_config(&config);

    match cli.command {
        None | Some(Command::List { json: false }) => run_list(&backend, false),
        Some(Command::List { json: true }) => run_list(&backend, true),
        Some(Command::Restart { ref name }) => run_restart(&backend, name),
        Some(Command::Version) => {
            println!("{}", backend.version());
            exit_code::SUCCESS
        }
        Some(Command::Init { .. }) => unreachable!("handled before config loading"),
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Collects and prints the adapter snapshot.
///
/// An empty snapshot prints as "no adapters" and still exits successfully;
/// a failed enumeration is deliberately indistinguishable from it.
#[cfg(not(tarpaulin_include))]
fn run_list(backend: &Backend, json: bool) -> ExitCode {
    let records = backend.collect();

    if json {
        match serde_json::to_string_pretty(&records) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                tracing::error!("Failed to serialize adapter records: {e}");
                return exit_code::runtime_error();
            }
        }
    } else if records.is_empty() {
        println!("No adapters found.");
    } else {
        for record in &records {
            print_record(record);
        }
    }

    exit_code::SUCCESS
}

/// Prints one adapter record as a labelled block.
fn print_record(record: &AdapterRecord) {
    println!("{}  [{}]", record.name, record.status);
    println!("    Description: {}", record.interface_description);
    println!("    MAC:         {}", record.mac_address);
    println!("    Speed:       {}", record.speed);
    println!("    IPv4:        {}", join_or_dash(&record.ipv4));
    println!("    IPv6:        {}", join_or_dash(&record.ipv6));
    println!("    Gateway:     {}", join_or_dash(&record.gateway));
    println!("    DNS:         {}", join_or_dash(&record.dns));
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

/// Runs a restart and reports the outcome.
#[cfg(not(tarpaulin_include))]
fn run_restart(backend: &Backend, name: &str) -> ExitCode {
    match backend.restart(name) {
        Ok(()) => {
            println!("Adapter '{name}' restarted.");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
    }
}
