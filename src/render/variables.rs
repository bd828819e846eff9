//! Host variables fragment.

use crate::classify::TagRule;
use crate::inventory::InventoryNode;

use super::CONTINUATION;

/// Placeholder for nodes without capability tags; the host template needs a non-empty slot.
pub const EMPTY_VARIABLES: &str = " ";

/// Capability tags and the host variable each one enables, in output order.
pub const CAPABILITY_RULES: [TagRule<&str>; 3] = [
    TagRule::new("aacraid", "vars.aac_raid = true"),
    TagRule::new("mdadm", "vars.mdadm = true"),
    TagRule::new("hpraid", "vars.hpacucli = true"),
];

/// Builds the custom variable lines enabling hardware checks.
///
/// Unlike lane and template selection every matching rule contributes.
#[must_use]
pub fn variables_string(node: &InventoryNode) -> String {
    let variables: Vec<&str> = CAPABILITY_RULES
        .iter()
        .filter(|rule| node.has_tag(rule.tag))
        .map(|rule| rule.outcome)
        .collect();

    if variables.is_empty() {
        EMPTY_VARIABLES.to_string()
    } else {
        variables.join(CONTINUATION)
    }
}
