//! In-memory rendering of every generated file.

use std::collections::HashMap;
use std::fmt;

use crate::classify::{Lane, Lanes, Satellite, select_template};
use crate::inventory::InventoryNode;
use crate::render::{
    HostContext, TemplateError, TemplateSet, ZoneContext, address_string, variables_string,
};

use super::SatelliteNames;

/// Order in which lanes are rendered into host files.
///
/// Matters only when two nodes share a file name; the later one wins.
pub const HOST_LANE_ORDER: [Lane; 5] = [
    Lane::IcingaClient,
    Lane::IcingaWindows,
    Lane::NrpeClient,
    Lane::NrpeWindows,
    Lane::UndefinedDefault,
];

/// Kind of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `Host` object in a satellite's hosts directory.
    Host,
    /// `Endpoint` + `Zone` objects in the icinga2 satellite's zones directory.
    Zone,
}

impl FileKind {
    /// Returns the file name for a node.
    #[must_use]
    pub fn file_name(self, node: &InventoryNode) -> String {
        match self {
            Self::Host => format!("{}.conf", node.short_name()),
            Self::Zone => format!("{}-zone.conf", node.short_name()),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Zone => write!(f, "zone"),
        }
    }
}

/// One rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Satellite whose tree receives the file
    pub satellite: Satellite,
    /// Host or zone file
    pub kind: FileKind,
    /// Full name of the node the file describes
    pub node: String,
    /// File name inside the target directory
    pub file_name: String,
    /// Rendered content
    pub contents: String,
}

/// Everything one run is going to write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResyncPlan {
    host_files: Vec<PlannedFile>,
    zone_files: Vec<PlannedFile>,
    skipped_hosts: Vec<String>,
}

impl ResyncPlan {
    /// Renders host and zone files for classified nodes.
    ///
    /// Host files are planned for every lane, zone files only for lanes
    /// with [`Lane::has_zone_file`]. A node without any primary address gets
    /// no host file but keeps its zone file.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if a template fails to render.
    pub fn build(
        lanes: &Lanes,
        templates: &TemplateSet,
        satellites: &SatelliteNames,
    ) -> Result<Self, TemplateError> {
        let mut plan = Self::default();
        let mut seen = HashMap::new();

        for lane in HOST_LANE_ORDER {
            for node in lanes.get(lane) {
                if !node.has_address() {
                    tracing::warn!(
                        node = %node.name,
                        "Host has no primary IP address, skipping host file"
                    );
                    plan.skipped_hosts.push(node.name.clone());
                    continue;
                }

                let address = address_string(node);
                let variables = variables_string(node);
                let contents = templates.render_host(&HostContext {
                    name: &node.name,
                    template: select_template(node),
                    address: &address,
                    variables: &variables,
                })?;

                let file = planned(lane.satellite(), FileKind::Host, node, contents);
                note_collision(&mut seen, &file);
                plan.host_files.push(file);
            }
        }

        for lane in Lane::ALL.into_iter().filter(|lane| lane.has_zone_file()) {
            let satellite = lane.satellite();
            for node in lanes.get(lane) {
                let contents = templates.render_zone(&ZoneContext {
                    name: &node.name,
                    satellite: satellites.name(satellite),
                })?;

                let file = planned(satellite, FileKind::Zone, node, contents);
                note_collision(&mut seen, &file);
                plan.zone_files.push(file);
            }
        }

        Ok(plan)
    }

    /// Host files, in write order.
    #[must_use]
    pub fn host_files(&self) -> &[PlannedFile] {
        &self.host_files
    }

    /// Zone files, in write order.
    #[must_use]
    pub fn zone_files(&self) -> &[PlannedFile] {
        &self.zone_files
    }

    /// Names of nodes that got no host file for lack of an address.
    #[must_use]
    pub fn skipped_hosts(&self) -> &[String] {
        &self.skipped_hosts
    }

    /// Iterates over all planned files, hosts first.
    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.host_files.iter().chain(&self.zone_files)
    }
}

fn planned(
    satellite: Satellite,
    kind: FileKind,
    node: &InventoryNode,
    contents: String,
) -> PlannedFile {
    PlannedFile {
        satellite,
        kind,
        node: node.name.clone(),
        file_name: kind.file_name(node),
        contents,
    }
}

/// Warns when two nodes map to the same file; the later write wins.
fn note_collision(seen: &mut HashMap<(Satellite, FileKind, String), String>, file: &PlannedFile) {
    let key = (file.satellite, file.kind, file.file_name.clone());
    if let Some(previous) = seen.insert(key, file.node.clone()) {
        tracing::warn!(
            node = %file.node,
            "{} file {} of {previous} is overwritten by {} (same leading label)",
            file.kind,
            file.file_name,
            file.node
        );
    }
}
