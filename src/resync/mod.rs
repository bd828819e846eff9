//! Full-resync regeneration of the dynamic output tree.
//!
//! A run is split in two halves:
//! - [`ResyncPlan::build`] renders every host and zone file in memory
//!   (pure, no filesystem access)
//! - [`ResyncWriter::apply`] wipes the dynamic directories and writes the plan
//!
//! The writer has no rollback: an I/O failure leaves the tree as far as it got.

mod error;
mod layout;
mod plan;
mod writer;

#[cfg(test)]
mod writer_tests;

pub use error::ResyncError;
pub use layout::{OutputLayout, SatelliteNames};
pub use plan::{FileKind, HOST_LANE_ORDER, PlannedFile, ResyncPlan};
pub use writer::{DIR_MODE, ResyncStage, ResyncWriter};
