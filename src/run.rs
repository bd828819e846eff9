//! Application execution logic.
//!
//! Wires the validated configuration into one synchronization run:
//! templates and blacklist are loaded first, then NetBox is queried and
//! the output tree is rewritten.

use thiserror::Error;

use icinga2_netbox::blacklist::{Blacklist, BlacklistError};
use icinga2_netbox::config::ValidatedConfig;
use icinga2_netbox::inventory::{InventoryError, InventorySource, NetboxInventory, ReqwestClient};
use icinga2_netbox::render::{TemplateError, TemplateSet};
use icinga2_netbox::resync::ResyncWriter;
use icinga2_netbox::sync::{SyncError, SyncReport, Synchronizer};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Failed to set up the NetBox client.
    #[error("Failed to set up NetBox client: {0}")]
    Inventory(#[source] InventoryError),

    /// Failed to read the blacklist.
    #[error("Failed to load blacklist: {0}")]
    Blacklist(#[source] BlacklistError),

    /// Failed to load a template.
    #[error("Failed to load templates: {0}")]
    Template(#[source] TemplateError),

    /// The synchronization run failed.
    #[error("Synchronization failed: {0}")]
    Sync(#[source] SyncError),
}

/// Templates and exclusions needed before touching the network.
#[derive(Debug)]
struct Resources {
    templates: TemplateSet,
    blacklist: Blacklist,
}

/// Executes one full synchronization.
///
/// This function:
/// 1. Loads and compiles both templates
/// 2. Loads the blacklist (a missing file means no exclusions)
/// 3. Creates the NetBox client
/// 4. Fetches, classifies, renders and rewrites the output tree
///
/// # Errors
///
/// Returns an error if any step fails. Steps 1-3 never touch the output tree.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires a live NetBox.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<SyncReport, RunError> {
    let resources = load_resources(&config)?;

    let client = ReqwestClient::with_timeout(config.netbox.timeout).map_err(RunError::HttpClient)?;
    let source = NetboxInventory::new(client, &config.netbox).map_err(RunError::Inventory)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - the output tree will not be modified");
    }

    let report = synchronizer(source, resources, &config)
        .run()
        .await
        .map_err(RunError::Sync)?;

    tracing::info!("{report}");
    for name in &report.skipped_hosts {
        tracing::debug!("No host file for {name} (no primary address)");
    }

    Ok(report)
}

/// Loads the templates, then the blacklist.
fn load_resources(config: &ValidatedConfig) -> Result<Resources, RunError> {
    let templates = TemplateSet::load(&config.host_template, &config.zone_template)
        .map_err(RunError::Template)?;
    tracing::debug!(
        "Loaded templates {} and {}",
        config.host_template.display(),
        config.zone_template.display()
    );

    let blacklist = Blacklist::load(&config.blacklist).map_err(RunError::Blacklist)?;
    if !blacklist.is_empty() {
        tracing::info!(
            "Blacklist {} excludes {} nodes",
            config.blacklist.display(),
            blacklist.len()
        );
    }

    Ok(Resources {
        templates,
        blacklist,
    })
}

/// Assembles the synchronizer for a source.
fn synchronizer<S: InventorySource>(
    source: S,
    resources: Resources,
    config: &ValidatedConfig,
) -> Synchronizer<S> {
    Synchronizer::new(
        source,
        resources.templates,
        ResyncWriter::new(config.layout.clone()),
    )
    .with_blacklist(resources.blacklist)
    .with_dry_run(config.dry_run)
}
