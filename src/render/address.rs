//! Address fragment of a host object.

use crate::inventory::InventoryNode;

use super::CONTINUATION;

/// Strips the `/prefix` suffix from an address-with-prefix.
///
/// ```
/// use icinga2_netbox::render::bare_address;
///
/// assert_eq!(bare_address("10.0.0.1/24"), "10.0.0.1");
/// assert_eq!(bare_address("2001:db8::1/64"), "2001:db8::1");
/// assert_eq!(bare_address("192.0.2.7"), "192.0.2.7");
/// ```
#[must_use]
pub fn bare_address(with_prefix: &str) -> &str {
    with_prefix
        .split_once('/')
        .map_or(with_prefix, |(address, _)| address)
        .trim()
}

/// Builds the `address` / `address6` attribute lines for a node.
///
/// IPv4 comes first when both families are present. A node without any
/// primary address yields an empty string and a warning.
#[must_use]
pub fn address_string(node: &InventoryNode) -> String {
    let v4 = node.primary_ipv4.as_deref().map(bare_address);
    let v6 = node.primary_ipv6.as_deref().map(bare_address);

    match (v4, v6) {
        (Some(v4), Some(v6)) => format!("address = \"{v4}\"{CONTINUATION}address6 = \"{v6}\""),
        (None, Some(v6)) => format!("address6 = \"{v6}\""),
        (Some(v4), None) => format!("address = \"{v4}\""),
        (None, None) => {
            tracing::warn!(node = %node.name, "Host has no primary IP address assigned");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv6_only_is_one_line_without_prefix() {
        let node = InventoryNode::new("v6.example.com").with_ipv6("2001:db8::1/64");

        let address = address_string(&node);

        assert_eq!(address, "address6 = \"2001:db8::1\"");
        assert_eq!(address.lines().count(), 1);
        assert!(!address.contains("/64"));
    }

    #[test]
    fn ipv4_only_is_one_line_without_prefix() {
        let node = InventoryNode::new("v4.example.com").with_ipv4("10.0.0.1/24");

        assert_eq!(address_string(&node), "address = \"10.0.0.1\"");
    }

    #[test]
    fn dual_stack_is_ipv4_then_ipv6() {
        let node = InventoryNode::new("dual.example.com")
            .with_ipv6("2001:db8::1/64")
            .with_ipv4("10.0.0.1/24");

        let address = address_string(&node);
        let lines: Vec<_> = address.lines().collect();

        assert_eq!(
            lines,
            vec!["address = \"10.0.0.1\"", "  address6 = \"2001:db8::1\""]
        );
    }

    #[test]
    fn no_address_is_empty_string() {
        let node = InventoryNode::new("dark.example.com");

        assert_eq!(address_string(&node), "");
    }

    #[test]
    fn address_without_prefix_is_kept() {
        let node = InventoryNode::new("plain").with_ipv4("192.0.2.10");

        assert_eq!(address_string(&node), "address = \"192.0.2.10\"");
    }
}
