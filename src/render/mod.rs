//! Rendering of host and zone configuration text.
//!
//! This module provides:
//! - The address fragment builder ([`address_string`])
//! - The host variables fragment builder ([`variables_string`])
//! - The compiled host/zone templates ([`TemplateSet`])
//!
//! Everything here is pure string work; nothing touches the output tree.

mod address;
mod error;
mod templates;
mod variables;

pub use address::{address_string, bare_address};
pub use error::TemplateError;
pub use templates::{HostContext, TemplateSet, ZoneContext};
pub use variables::{CAPABILITY_RULES, EMPTY_VARIABLES, variables_string};

/// Indentation of continuation lines inside a host object.
pub(crate) const CONTINUATION: &str = "\n  ";
