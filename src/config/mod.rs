//! Configuration layer for icinga2-netbox.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//!    (the token may also come from `NETBOX_TOKEN`)
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Required fields without defaults: `netbox.url`, `netbox.token`,
//! `satellites.icinga`, `satellites.nrpe`.
//!
//! # TOML-Only Options
//!
//! The generated directory names are TOML-only (not available via CLI):
//! - `output.hosts_dir` (default: `hosts.dynamic`)
//! - `output.zones_dir` (default: `zones.dynamic`)
//!
//! Everything inside those directories is deleted on every run.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
