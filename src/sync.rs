//! One full synchronization run.
//!
//! Fetches devices and virtual machines, drops blacklisted nodes,
//! classifies the rest into lanes, renders every file and rewrites the
//! dynamic output tree. Any failure aborts the run.

use std::fmt;

use thiserror::Error;

use crate::blacklist::Blacklist;
use crate::classify::{Lane, Lanes};
use crate::inventory::{InventoryError, InventorySource};
use crate::render::{TemplateError, TemplateSet};
use crate::resync::{ResyncError, ResyncPlan, ResyncWriter};

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;

/// Errors that abort a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The inventory could not be fetched.
    #[error("Inventory fetch failed: {0}")]
    Inventory(#[from] InventoryError),

    /// A host or zone template failed to render.
    #[error("Rendering failed: {0}")]
    Template(#[from] TemplateError),

    /// The output tree could not be rewritten.
    #[error("Writing output failed: {0}")]
    Resync(#[from] ResyncError),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Nodes returned by the inventory (devices and virtual machines)
    pub fetched: usize,
    /// Nodes removed by the blacklist
    pub blacklisted: usize,
    /// Node count per lane
    pub lane_counts: [(Lane, usize); 5],
    /// Host files written (or planned, in dry-run mode)
    pub host_files: usize,
    /// Zone files written (or planned, in dry-run mode)
    pub zone_files: usize,
    /// Nodes that got no host file for lack of an address
    pub skipped_hosts: Vec<String>,
    /// Whether the filesystem was left untouched
    pub dry_run: bool,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.dry_run { "Dry-run: " } else { "" };
        write!(
            f,
            "{prefix}{} nodes fetched, {} blacklisted, {} host files, {} zone files",
            self.fetched, self.blacklisted, self.host_files, self.zone_files
        )?;
        for (lane, count) in &self.lane_counts {
            write!(f, ", {lane}: {count}")?;
        }
        if !self.skipped_hosts.is_empty() {
            write!(f, ", {} without address", self.skipped_hosts.len())?;
        }
        Ok(())
    }
}

/// Drives one inventory-to-filesystem run.
///
/// # Type Parameters
///
/// - `S`: Inventory backend
#[derive(Debug)]
pub struct Synchronizer<S> {
    source: S,
    templates: TemplateSet,
    writer: ResyncWriter,
    blacklist: Blacklist,
    dry_run: bool,
}

impl<S: InventorySource> Synchronizer<S> {
    /// Creates a synchronizer with an empty blacklist.
    #[must_use]
    pub fn new(source: S, templates: TemplateSet, writer: ResyncWriter) -> Self {
        Self {
            source,
            templates,
            writer,
            blacklist: Blacklist::default(),
            dry_run: false,
        }
    }

    /// Sets the node names to exclude.
    #[must_use]
    pub fn with_blacklist(mut self, blacklist: Blacklist) -> Self {
        self.blacklist = blacklist;
        self
    }

    /// Renders everything but only logs the filesystem changes.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs a full synchronization.
    ///
    /// Devices are fetched before virtual machines and their order is kept
    /// through classification. The output tree is only touched once both
    /// fetches succeeded and every file rendered.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on the first failure; nothing is retried.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let mut nodes = self.source.list_devices().await?;
        let devices = nodes.len();
        nodes.extend(self.source.list_virtual_machines().await?);
        let fetched = nodes.len();
        tracing::info!(
            "Fetched {devices} devices and {} virtual machines",
            fetched - devices
        );

        let nodes = self.blacklist.filter(nodes);
        let blacklisted = fetched - nodes.len();
        if blacklisted > 0 {
            tracing::info!("Skipped {blacklisted} blacklisted nodes");
        }

        let lanes = Lanes::partition(nodes);
        for (lane, count) in lanes.counts() {
            tracing::debug!("Lane {lane}: {count} nodes");
        }

        let plan = ResyncPlan::build(&lanes, &self.templates, &self.writer.layout().satellites)?;

        if self.dry_run {
            self.writer.preview(&plan);
        } else {
            self.writer.apply(&plan)?;
        }

        Ok(SyncReport {
            fetched,
            blacklisted,
            lane_counts: lanes.counts(),
            host_files: plan.host_files().len(),
            zone_files: plan.zone_files().len(),
            skipped_hosts: plan.skipped_hosts().to_vec(),
            dry_run: self.dry_run,
        })
    }
}
