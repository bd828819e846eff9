//! Output tree layout.

use std::path::PathBuf;

use crate::classify::Satellite;

/// Zone names of the two satellites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteNames {
    /// Zone of the satellite serving native icinga2 agents
    pub icinga: String,
    /// Zone of the satellite polling NRPE hosts
    pub nrpe: String,
}

impl SatelliteNames {
    /// Creates the satellite name pair.
    #[must_use]
    pub fn new(icinga: impl Into<String>, nrpe: impl Into<String>) -> Self {
        Self {
            icinga: icinga.into(),
            nrpe: nrpe.into(),
        }
    }

    /// Returns the zone name of a satellite role.
    #[must_use]
    pub fn name(&self, satellite: Satellite) -> &str {
        match satellite {
            Satellite::Icinga => &self.icinga,
            Satellite::Nrpe => &self.nrpe,
        }
    }
}

/// Where generated files go.
///
/// ```text
/// <zones_root>/<satellite>/<hosts_dir>/<label>.conf
/// <zones_root>/<icinga satellite>/<zones_dir>/<label>-zone.conf
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Icinga2 `zones.d` directory
    pub zones_root: PathBuf,
    /// Satellite zone names
    pub satellites: SatelliteNames,
    /// Name of the generated hosts directory inside each satellite
    pub hosts_dir: String,
    /// Name of the generated zones directory inside the icinga2 satellite
    pub zones_dir: String,
}

impl OutputLayout {
    /// Returns the directory of a satellite zone.
    #[must_use]
    pub fn satellite_path(&self, satellite: Satellite) -> PathBuf {
        self.zones_root.join(self.satellites.name(satellite))
    }

    /// Returns the generated hosts directory of a satellite.
    #[must_use]
    pub fn hosts_path(&self, satellite: Satellite) -> PathBuf {
        self.satellite_path(satellite).join(&self.hosts_dir)
    }

    /// Returns the generated zones directory of a satellite.
    #[must_use]
    pub fn zones_path(&self, satellite: Satellite) -> PathBuf {
        self.satellite_path(satellite).join(&self.zones_dir)
    }
}
