//! Process-level glue for the binary.
//!
//! Maps outcomes of a NetBox to Icinga2 run onto exit codes, turns common
//! configuration mistakes into a one-line hint and installs the log
//! subscriber.

use icinga2_netbox::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Exit codes seen by cron or a systemd timer.
pub mod exit_code {
    use std::process::ExitCode;

    /// The output tree matches the inventory, or `init` wrote its template.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Nothing was fetched or written: arguments or config file are unusable.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// NetBox, a template, the blacklist or the output tree failed.
    ///
    /// `ExitCode::from` is not `const`, hence the function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Suggests a next step for a configuration error, if one applies.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. }
            if [field::URL, field::ICINGA_SATELLITE, field::NRPE_SATELLITE].contains(f) =>
        {
            Some("Run 'icinga2-netbox init' to generate a configuration template.")
        }
        ConfigError::MissingRequired { field: f, .. } if *f == field::TOKEN => {
            Some("Create an API token under your NetBox user profile and export it as NETBOX_TOKEN.")
        }
        ConfigError::FileRead { .. } => {
            Some("Run 'icinga2-netbox init' to generate a configuration template.")
        }
        ConfigError::InvalidUrl { .. } => {
            Some("Point --url at the NetBox base URL, e.g. https://netbox.example.com.")
        }
        _ => None,
    }
}

/// Prints the hint for `error` to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the INFO/DEBUG default.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
