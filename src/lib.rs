//! icinga2-netbox: Icinga2 configuration generator
//!
//! A library for classifying NetBox inventory items into monitoring lanes
//! and regenerating the dynamic part of an Icinga2 zones tree from them.

pub mod blacklist;
pub mod classify;
pub mod config;
pub mod inventory;
pub mod render;
pub mod resync;
pub mod sync;
