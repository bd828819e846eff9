//! Normalized inventory node representation.

use std::collections::BTreeSet;

/// A single monitored entity (device or virtual machine) as seen by the inventory.
///
/// Addresses are kept in the inventory's address-with-prefix notation
/// (e.g. `10.0.0.1/24`); rendering strips the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryNode {
    /// Fully qualified node name (e.g. `host01.domain.tld`).
    pub name: String,
    /// Tag slugs attached to the node.
    pub tags: BTreeSet<String>,
    /// Primary IPv4 address with prefix, if assigned.
    pub primary_ipv4: Option<String>,
    /// Primary IPv6 address with prefix, if assigned.
    pub primary_ipv6: Option<String>,
}

impl InventoryNode {
    /// Creates a node with no tags and no addresses.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            primary_ipv4: None,
            primary_ipv6: None,
        }
    }

    /// Adds tags to the node.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets the primary IPv4 address (address-with-prefix notation).
    #[must_use]
    pub fn with_ipv4(mut self, address: impl Into<String>) -> Self {
        self.primary_ipv4 = Some(address.into());
        self
    }

    /// Sets the primary IPv6 address (address-with-prefix notation).
    #[must_use]
    pub fn with_ipv6(mut self, address: impl Into<String>) -> Self {
        self.primary_ipv6 = Some(address.into());
        self
    }

    /// Returns true if the node carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns true if the node has at least one primary address.
    #[must_use]
    pub const fn has_address(&self) -> bool {
        self.primary_ipv4.is_some() || self.primary_ipv6.is_some()
    }

    /// Returns the leading label of the name, up to the first dot.
    ///
    /// `host01.domain.tld` becomes `host01`; a name without dots is returned whole.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('.')
            .map_or(self.name.as_str(), |(head, _)| head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_is_label_before_first_dot() {
        let node = InventoryNode::new("host01.domain.tld");
        assert_eq!(node.short_name(), "host01");
    }

    #[test]
    fn short_name_without_dot_is_whole_name() {
        let node = InventoryNode::new("standalone");
        assert_eq!(node.short_name(), "standalone");
    }

    #[test]
    fn short_name_of_leading_dot_is_empty() {
        let node = InventoryNode::new(".hidden");
        assert_eq!(node.short_name(), "");
    }

    #[test]
    fn has_address_checks_both_families() {
        let bare = InventoryNode::new("a");
        let v4 = InventoryNode::new("b").with_ipv4("10.0.0.1/24");
        let v6 = InventoryNode::new("c").with_ipv6("2001:db8::1/64");

        assert!(!bare.has_address());
        assert!(v4.has_address());
        assert!(v6.has_address());
    }

    #[test]
    fn with_tags_deduplicates() {
        let node = InventoryNode::new("a").with_tags(["kvm", "kvm", "mdadm"]);

        assert_eq!(node.tags.len(), 2);
        assert!(node.has_tag("kvm"));
        assert!(node.has_tag("mdadm"));
        assert!(!node.has_tag("hpraid"));
    }
}
