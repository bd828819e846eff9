//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// icinga2-netbox: Icinga2 configuration generator
///
/// Fetches tagged devices and virtual machines from NetBox and regenerates
/// the dynamic host and zone configuration of an Icinga2 master.
#[derive(Debug, Parser)]
#[command(name = "icinga2-netbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// NetBox base URL (required for run mode)
    #[arg(long)]
    pub url: Option<String>,

    /// NetBox API token (required for run mode)
    #[arg(long, env = "NETBOX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Tag marking monitored devices and virtual machines
    #[arg(long)]
    pub tag: Option<String>,

    /// Number of NetBox results per page
    #[arg(long = "page-size")]
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Zone name of the satellite serving native icinga2 agents (required for run mode)
    #[arg(long = "icinga-satellite")]
    pub icinga_satellite: Option<String>,

    /// Zone name of the satellite polling NRPE hosts (required for run mode)
    #[arg(long = "nrpe-satellite")]
    pub nrpe_satellite: Option<String>,

    /// Icinga2 zones.d directory
    #[arg(long = "zones-root")]
    pub zones_root: Option<PathBuf>,

    /// Host object template
    #[arg(long = "host-template")]
    pub host_template: Option<PathBuf>,

    /// Endpoint/zone template
    #[arg(long = "zone-template")]
    pub zone_template: Option<PathBuf>,

    /// File with node names to exclude, one per line
    #[arg(long)]
    pub blacklist: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Render everything but only log the filesystem changes
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for icinga2-netbox
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
