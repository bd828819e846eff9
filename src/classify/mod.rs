//! Tag-precedence classification of inventory nodes.
//!
//! Two independent tables are evaluated against a node's tags:
//! - [`LANE_RULES`] decides the monitoring [`Lane`] (and with it the satellite)
//! - [`TEMPLATE_RULES`] decides the Icinga2 host template
//!
//! Both are first-match-wins over a fixed order. The tables share only the
//! Windows tags, and service tags such as `kvm` outrank them in the template
//! table alone, so a node's lane says nothing about its template and vice versa.

mod lane;
mod template;

#[cfg(test)]
mod lane_tests;

pub use lane::{LANE_RULES, Lane, Lanes, Satellite, classify};
pub use template::{GENERIC_HOST_TEMPLATE, TEMPLATE_RULES, select_template};

use crate::inventory::InventoryNode;

/// One entry of an ordered tag-precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule<T> {
    /// Tag that triggers the rule
    pub tag: &'static str,
    /// Result when the rule matches
    pub outcome: T,
}

impl<T> TagRule<T> {
    /// Creates a rule mapping `tag` to `outcome`.
    #[must_use]
    pub const fn new(tag: &'static str, outcome: T) -> Self {
        Self { tag, outcome }
    }
}

/// Returns the outcome of the first rule whose tag the node carries.
#[must_use]
pub fn first_match<T: Copy>(rules: &[TagRule<T>], node: &InventoryNode) -> Option<T> {
    rules
        .iter()
        .find(|rule| node.has_tag(rule.tag))
        .map(|rule| rule.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: [TagRule<u8>; 3] = [
        TagRule::new("first", 1),
        TagRule::new("second", 2),
        TagRule::new("third", 3),
    ];

    #[test]
    fn earliest_rule_wins_regardless_of_tag_order() {
        let node = InventoryNode::new("n").with_tags(["third", "first"]);
        assert_eq!(first_match(&RULES, &node), Some(1));
    }

    #[test]
    fn no_matching_tag_is_none() {
        let node = InventoryNode::new("n").with_tags(["unrelated"]);
        assert_eq!(first_match(&RULES, &node), None);
    }

    #[test]
    fn lane_and_template_are_independent() {
        let node = InventoryNode::new("kvm01.example.com").with_tags(["icinga2-client", "kvm"]);

        assert_eq!(classify(&node), Lane::IcingaClient);
        assert_eq!(select_template(&node), "kvm-host");
    }

    #[test]
    fn service_tags_outrank_windows_tags_only_for_templates() {
        let node = InventoryNode::new("win01").with_tags(["icinga2-windows", "lhc-www"]);

        assert_eq!(classify(&node), Lane::IcingaWindows);
        assert_eq!(select_template(&node), "php-lhc-server");
    }
}
