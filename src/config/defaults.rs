//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

use std::time::Duration;

/// Default NetBox tag marking monitored devices and virtual machines.
pub const TAG: &str = "icinga2";

/// Default number of results per NetBox page.
pub const PAGE_SIZE: u32 = 1000;

/// Default per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default Icinga2 `zones.d` directory.
pub const ZONES_ROOT: &str = "/etc/icinga2/zones.d";

/// Default name of the generated hosts directory inside each satellite.
pub const HOSTS_DIR: &str = "hosts.dynamic";

/// Default name of the generated zones directory inside the icinga2 satellite.
pub const ZONES_DIR: &str = "zones.dynamic";

/// Default host template path.
pub const HOST_TEMPLATE: &str = "templates/icingahost.hbs";

/// Default zone template path.
pub const ZONE_TEMPLATE: &str = "templates/hostzonefile.hbs";

/// Default blacklist path.
pub const BLACKLIST: &str = "blacklist";

/// Default output path of `init`.
pub const CONFIG_FILE: &str = "icinga2-netbox.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
