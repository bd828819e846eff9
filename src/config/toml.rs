//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// NetBox connection section
    #[serde(default)]
    pub netbox: NetboxSection,

    /// Satellite zone names
    #[serde(default)]
    pub satellites: SatellitesSection,

    /// Output tree layout
    #[serde(default)]
    pub output: OutputSection,

    /// Template file locations
    #[serde(default)]
    pub templates: TemplatesSection,

    /// Blacklist file location
    #[serde(default)]
    pub blacklist: BlacklistSection,
}

/// NetBox connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetboxSection {
    /// NetBox base URL
    pub url: Option<String>,

    /// API token
    pub token: Option<String>,

    /// Marker tag (default: icinga2)
    pub tag: Option<String>,

    /// Results per page (default: 1000)
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds (default: 30)
    pub timeout: Option<u64>,
}

/// Satellite zone names section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SatellitesSection {
    /// Satellite serving native icinga2 agents
    pub icinga: Option<String>,

    /// Satellite polling NRPE hosts
    pub nrpe: Option<String>,
}

/// Output tree section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Icinga2 zones.d directory
    pub zones_root: Option<PathBuf>,

    /// Generated hosts directory name (default: hosts.dynamic)
    pub hosts_dir: Option<String>,

    /// Generated zones directory name (default: zones.dynamic)
    pub zones_dir: Option<String>,
}

/// Template file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesSection {
    /// Host object template
    pub host: Option<PathBuf>,

    /// Endpoint/zone template
    pub zone: Option<PathBuf>,
}

/// Blacklist section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlacklistSection {
    /// File with one excluded node name per line
    pub path: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# icinga2-netbox Configuration File

[netbox]
# NetBox base URL (required)
# url = "https://netbox.example.com"

# API token (required, or set NETBOX_TOKEN)
# token = "0123456789abcdef0123456789abcdef01234567"

# Tag marking monitored devices and virtual machines (default: icinga2)
# tag = "icinga2"

# Results per page (default: 1000)
# page_size = 1000

# Per-request timeout in seconds (default: 30)
# timeout = 30

[satellites]
# Zone name of the satellite serving native icinga2 agents (required)
# icinga = "satellite-icinga.example.com"

# Zone name of the satellite polling NRPE hosts (required)
# nrpe = "satellite-nrpe.example.com"

[output]
# Icinga2 zones.d directory (default: /etc/icinga2/zones.d)
# zones_root = "/etc/icinga2/zones.d"

# Generated directories; their content is deleted on every run
# hosts_dir = "hosts.dynamic"
# zones_dir = "zones.dynamic"

[templates]
# Handlebars templates
# Host placeholders: {{name}}, {{template}}, {{address}}, {{variables}}
# Zone placeholders: {{name}}, {{satellite}}
# host = "templates/icingahost.hbs"
# zone = "templates/hostzonefile.hbs"

[blacklist]
# One node name per line; a missing file means no exclusions
# path = "blacklist"
"#
    .to_string()
}
