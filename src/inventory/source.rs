//! Inventory source trait.

use super::{InventoryError, InventoryNode};

/// Read-only access to the monitored part of the inventory.
///
/// Both operations return only nodes carrying the monitoring marker tag;
/// the filtering happens on the inventory side.
///
/// # Design
///
/// - The synchronizer depends on this trait, not on NetBox
/// - Enables dependency injection for testing with in-memory sources
pub trait InventorySource: Send + Sync {
    /// Lists tagged physical devices.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if the inventory cannot be queried or decoded.
    fn list_devices(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<InventoryNode>, InventoryError>> + Send;

    /// Lists tagged virtual machines.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if the inventory cannot be queried or decoded.
    fn list_virtual_machines(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<InventoryNode>, InventoryError>> + Send;
}
