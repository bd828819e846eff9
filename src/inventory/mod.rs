//! Inventory layer for fetching monitored nodes from NetBox.
//!
//! This module provides types and traits for:
//! - Representing a monitored device or virtual machine ([`InventoryNode`])
//! - Abstracting the inventory backend ([`InventorySource`])
//! - Building HTTP requests and handling responses ([`HttpRequest`], [`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) with a reqwest implementation ([`ReqwestClient`])
//! - The NetBox REST implementation ([`NetboxInventory`], [`NetboxSettings`])

mod client;
mod error;
mod http;
mod netbox;
mod node;
mod source;


pub use client::ReqwestClient;
pub use error::{HttpError, InventoryError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use netbox::{Endpoint, NetboxInventory, NetboxSettings};
pub use node::InventoryNode;
pub use source::InventorySource;
