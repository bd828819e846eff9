//! Host template precedence table.

use crate::inventory::InventoryNode;

use super::{TagRule, first_match};

/// Template for nodes without any template tag; carries no special checks.
pub const GENERIC_HOST_TEMPLATE: &str = "generic-host";

/// Host template precedence, highest first.
///
/// Deliberately not aligned with [`super::LANE_RULES`].
pub const TEMPLATE_RULES: [TagRule<&str>; 5] = [
    TagRule::new("ispconfig", "ispconfig31-host"),
    TagRule::new("lhc-www", "php-lhc-server"),
    TagRule::new("kvm", "kvm-host"),
    TagRule::new("nrpe-windows", "windows-host-nrpe"),
    TagRule::new("icinga2-windows", "windows-host-icinga"),
];

/// Chooses the Icinga2 host template for a node.
///
/// Falls back to [`GENERIC_HOST_TEMPLATE`] with a warning.
#[must_use]
pub fn select_template(node: &InventoryNode) -> &'static str {
    first_match(&TEMPLATE_RULES, node).unwrap_or_else(|| {
        tracing::warn!(
            node = %node.name,
            "No host template tag (ispconfig, lhc-www, kvm, windows), using {GENERIC_HOST_TEMPLATE} without service specific checks"
        );
        GENERIC_HOST_TEMPLATE
    })
}
