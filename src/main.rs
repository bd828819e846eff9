//! icinga2-netbox: regenerates Icinga2 host and zone objects from NetBox.
//!
//! One invocation is one synchronization, meant to be run from cron or a
//! systemd timer on the Icinga2 master. `init` writes a config template.

use icinga2_netbox::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Validates the configuration before logging starts, then synchronizes once.
///
/// Configuration errors go to stderr so they show up even when the log
/// subscriber would filter them.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::info!("{config}");

    run_application(config)
}

/// Writes the commented TOML template for `init`.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            println!(
                "Fill in netbox.url and both satellite zones, then run with -c {}",
                output.display()
            );
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Drives one synchronization on a current-thread runtime.
///
/// The run issues its NetBox requests one after another, so a single
/// thread is enough.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(report) if report.dry_run => {
            tracing::info!("Dry run finished, nothing below zones.d was changed");
            exit_code::SUCCESS
        }
        Ok(_) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("NetBox synchronization failed: {e}");
            exit_code::runtime_error()
        }
    }
}
