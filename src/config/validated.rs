//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::inventory::NetboxSettings;
use crate::resync::{OutputLayout, SatelliteNames};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// NetBox connection settings (URL and token required)
    pub netbox: NetboxSettings,

    /// Output tree layout (both satellite names required)
    pub layout: OutputLayout,

    /// Host object template file
    pub host_template: PathBuf,

    /// Endpoint/zone template file
    pub zone_template: PathBuf,

    /// Blacklist file (may not exist)
    pub blacklist: PathBuf,

    /// Dry-run mode (render without touching the output tree)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ url: {}, tag: {}, page_size: {}, timeout: {}s, icinga: {}, nrpe: {}, \
             zones_root: {}, host_template: {}, zone_template: {}, blacklist: {}, dry_run: {} }}",
            self.netbox.url,
            self.netbox.tag,
            self.netbox.page_size,
            self.netbox.timeout.as_secs(),
            self.layout.satellites.icinga,
            self.layout.satellites.nrpe,
            self.layout.zones_root.display(),
            self.host_template.display(),
            self.zone_template.display(),
            self.blacklist.display(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`url`, `token`, both satellite names)
    /// - URL is invalid
    /// - Page size or timeout is zero
    /// - A satellite or directory name is empty or contains a path separator
    /// - The hosts and zones directories share a name
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let netbox = Self::resolve_netbox(cli, toml)?;
        let layout = Self::resolve_layout(cli, toml)?;

        let host_template = resolve_path(
            cli.host_template.as_deref(),
            toml.and_then(|t| t.templates.host.as_deref()),
            defaults::HOST_TEMPLATE,
        );
        let zone_template = resolve_path(
            cli.zone_template.as_deref(),
            toml.and_then(|t| t.templates.zone.as_deref()),
            defaults::ZONE_TEMPLATE,
        );
        let blacklist = resolve_path(
            cli.blacklist.as_deref(),
            toml.and_then(|t| t.blacklist.path.as_deref()),
            defaults::BLACKLIST,
        );

        Ok(Self {
            netbox,
            layout,
            host_template,
            zone_template,
            blacklist,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_tilde(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_netbox(cli: &Cli, toml: Option<&TomlConfig>) -> Result<NetboxSettings, ConfigError> {
        let section = toml.map(|t| &t.netbox);

        let url = Self::resolve_url(cli, toml)?;

        // CLI (or NETBOX_TOKEN) takes precedence
        let token = cli
            .token
            .as_deref()
            .or_else(|| section.and_then(|s| s.token.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::TOKEN,
                    "Use --token, set NETBOX_TOKEN or set netbox.token in config file",
                )
            })?;
        if token.trim().is_empty() {
            return Err(ConfigError::invalid(field::TOKEN, "must not be empty"));
        }

        // Priority: CLI explicit > TOML > default
        let tag = cli
            .tag
            .as_deref()
            .or_else(|| section.and_then(|s| s.tag.as_deref()))
            .unwrap_or(defaults::TAG);
        if tag.is_empty() {
            return Err(ConfigError::invalid(field::TAG, "must not be empty"));
        }

        let page_size = cli
            .page_size
            .or_else(|| section.and_then(|s| s.page_size))
            .unwrap_or(defaults::PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::invalid(
                field::PAGE_SIZE,
                "must be greater than 0",
            ));
        }

        let timeout = cli
            .timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .map_or_else(defaults::timeout, Duration::from_secs);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(NetboxSettings {
            url,
            token: token.to_string(),
            tag: tag.to_string(),
            page_size,
            timeout,
        })
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.netbox.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set netbox.url in config file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_layout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputLayout, ConfigError> {
        let satellites = toml.map(|t| &t.satellites);
        let output = toml.map(|t| &t.output);

        let icinga = cli
            .icinga_satellite
            .as_deref()
            .or_else(|| satellites.and_then(|s| s.icinga.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::ICINGA_SATELLITE,
                    "Use --icinga-satellite or set satellites.icinga in config file",
                )
            })?;
        let nrpe = cli
            .nrpe_satellite
            .as_deref()
            .or_else(|| satellites.and_then(|s| s.nrpe.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::NRPE_SATELLITE,
                    "Use --nrpe-satellite or set satellites.nrpe in config file",
                )
            })?;
        validate_dir_name(field::ICINGA_SATELLITE, icinga)?;
        validate_dir_name(field::NRPE_SATELLITE, nrpe)?;

        // TOML-only settings
        let hosts_dir = output
            .and_then(|o| o.hosts_dir.as_deref())
            .unwrap_or(defaults::HOSTS_DIR);
        let zones_dir = output
            .and_then(|o| o.zones_dir.as_deref())
            .unwrap_or(defaults::ZONES_DIR);
        validate_dir_name(field::HOSTS_DIR, hosts_dir)?;
        validate_dir_name(field::ZONES_DIR, zones_dir)?;
        // The zones directory is reset after host files are written into the icinga2 satellite
        if hosts_dir == zones_dir {
            return Err(ConfigError::invalid(
                field::ZONES_DIR,
                format!("'{zones_dir}' must differ from output.hosts_dir"),
            ));
        }

        let zones_root = resolve_path(
            cli.zones_root.as_deref(),
            output.and_then(|o| o.zones_root.as_deref()),
            defaults::ZONES_ROOT,
        );

        Ok(OutputLayout {
            zones_root,
            satellites: SatelliteNames::new(icinga, nrpe),
            hosts_dir: hosts_dir.to_string(),
            zones_dir: zones_dir.to_string(),
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Picks CLI, then TOML, then the default, and expands a leading `~`.
fn resolve_path(cli: Option<&Path>, toml: Option<&Path>, default: &str) -> PathBuf {
    let path = cli.or(toml).unwrap_or_else(|| Path::new(default));
    expand_tilde(path)
}

/// Replaces a leading `~` component with the home directory.
///
/// The path is returned unchanged when there is no home directory.
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}

/// Satellite and directory names become single path components.
fn validate_dir_name(field: &'static str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConfigError::invalid(
            field,
            format!("'{name}' must be a single directory name"),
        ));
    }
    Ok(())
}
