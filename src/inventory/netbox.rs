//! NetBox REST API implementation of [`InventorySource`].

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use http::HeaderMap;
use http::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::Deserialize;
use url::Url;

use super::{HttpClient, HttpRequest, InventoryError, InventoryNode, InventorySource};

#[cfg(test)]
#[path = "netbox_tests.rs"]
mod tests;

/// Connection settings for the NetBox API.
///
/// The `Debug` implementation never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct NetboxSettings {
    /// Base URL of the NetBox instance (e.g. `https://netbox.example.com`)
    pub url: Url,
    /// API token sent as `Authorization: Token <token>`
    pub token: String,
    /// Marker tag selecting the monitored devices and virtual machines
    pub tag: String,
    /// Number of results requested per page
    pub page_size: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for NetboxSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetboxSettings")
            .field("url", &self.url.as_str())
            .field("token", &"<REDACTED>")
            .field("tag", &self.tag)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// NetBox list endpoints queried by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `dcim/devices`
    Devices,
    /// `virtualization/virtual-machines`
    VirtualMachines,
}

impl Endpoint {
    /// Path of the endpoint relative to the NetBox base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Devices => "api/dcim/devices/",
            Self::VirtualMachines => "api/virtualization/virtual-machines/",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Devices => write!(f, "devices"),
            Self::VirtualMachines => write!(f, "virtual machines"),
        }
    }
}

/// One page of a NetBox list response.
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    next: Option<String>,
    results: Vec<RawNode>,
}

/// The subset of a device / virtual machine object the generator needs.
#[derive(Debug, Deserialize)]
struct RawNode {
    name: Option<String>,
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(default)]
    primary_ip4: Option<RawAddress>,
    #[serde(default)]
    primary_ip6: Option<RawAddress>,
}

/// NetBox < 2.10 lists tags as plain strings, later versions as nested objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTag {
    Plain(String),
    Nested { slug: String },
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    address: String,
}

impl RawNode {
    fn into_node(self, endpoint: Endpoint) -> Option<InventoryNode> {
        let Some(name) = self.name else {
            tracing::warn!("Skipping unnamed NetBox object from {endpoint}");
            return None;
        };

        Some(InventoryNode {
            name,
            tags: self
                .tags
                .into_iter()
                .map(|tag| match tag {
                    RawTag::Plain(slug) | RawTag::Nested { slug } => slug,
                })
                .collect(),
            primary_ipv4: self.primary_ip4.map(|a| a.address),
            primary_ipv6: self.primary_ip6.map(|a| a.address),
        })
    }
}

/// NetBox-backed inventory source.
///
/// Lists objects carrying the configured marker tag and follows the
/// `next` links of paginated responses until the last page.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
#[derive(Debug)]
pub struct NetboxInventory<H> {
    client: H,
    base_url: Url,
    headers: HeaderMap,
    tag: String,
    page_size: u32,
}

impl<H> NetboxInventory<H> {
    /// Creates a NetBox source from an HTTP client and connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidToken`] if the token contains
    /// characters that are not allowed in an HTTP header.
    pub fn new(client: H, settings: &NetboxSettings) -> Result<Self, InventoryError> {
        let mut auth = HeaderValue::from_str(&format!("Token {}", settings.token))
            .map_err(InventoryError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            base_url: with_trailing_slash(settings.url.clone()),
            headers,
            tag: settings.tag.clone(),
            page_size: settings.page_size,
        })
    }

    /// Returns the URL of the first page of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Url`] if the endpoint cannot be joined to the base URL.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, InventoryError> {
        let mut url = self
            .base_url
            .join(endpoint.path())
            .map_err(|source| InventoryError::Url {
                url: self.base_url.to_string(),
                source,
            })?;

        url.query_pairs_mut()
            .append_pair("tag", &self.tag)
            .append_pair("limit", &self.page_size.to_string());

        Ok(url)
    }
}

impl<H: HttpClient> NetboxInventory<H> {
    /// Fetches every tagged object of an endpoint, across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] on transport failures, non-2xx responses,
    /// undecodable bodies, or malformed or repeating pagination links.
    pub async fn list(&self, endpoint: Endpoint) -> Result<Vec<InventoryNode>, InventoryError> {
        let mut next = Some(self.endpoint_url(endpoint)?);
        let mut nodes = Vec::new();
        let mut visited = HashSet::new();

        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                return Err(InventoryError::PaginationLoop {
                    url: url.to_string(),
                });
            }
            let page = self.fetch_page(url).await?;

            nodes.extend(
                page.results
                    .into_iter()
                    .filter_map(|raw| raw.into_node(endpoint)),
            );

            next = match page.next {
                Some(link) => Some(self.base_url.join(&link).map_err(|source| {
                    InventoryError::Url { url: link, source }
                })?),
                None => None,
            };
        }

        tracing::debug!(
            "Fetched {} {endpoint} tagged '{}' in {} page(s)",
            nodes.len(),
            self.tag,
            visited.len()
        );

        Ok(nodes)
    }

    async fn fetch_page(&self, url: Url) -> Result<Page, InventoryError> {
        let url_text = url.to_string();
        let request = HttpRequest::get(url).with_headers(self.headers.clone());

        let response =
            self.client
                .request(request)
                .await
                .map_err(|source| InventoryError::Http {
                    url: url_text.clone(),
                    source,
                })?;

        if !response.is_success() {
            return Err(InventoryError::Status {
                url: url_text,
                status: response.status,
                body: response.body_text().map(ToString::to_string),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| InventoryError::Decode {
            url: url_text,
            source,
        })
    }
}

impl<H: HttpClient> InventorySource for NetboxInventory<H> {
    async fn list_devices(&self) -> Result<Vec<InventoryNode>, InventoryError> {
        self.list(Endpoint::Devices).await
    }

    async fn list_virtual_machines(&self) -> Result<Vec<InventoryNode>, InventoryError> {
        self.list(Endpoint::VirtualMachines).await
    }
}

/// Ensures relative endpoint paths are appended to the base path rather than replacing it.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
