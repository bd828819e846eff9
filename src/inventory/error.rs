//! Error types for inventory operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level; the inventory
/// client treats every variant as fatal.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for fetching nodes from the inventory.
///
/// Any of these aborts the run before the output tree is touched.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The HTTP request could not be completed.
    #[error("Request to {url} failed: {source}")]
    Http {
        /// Requested URL
        url: String,
        /// Transport error
        #[source]
        source: HttpError,
    },

    /// NetBox answered with a non-success status code.
    #[error("NetBox returned HTTP {status} for {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Response status
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The response body is not a valid NetBox list page.
    #[error("Failed to decode NetBox response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint or pagination URL could not be built.
    #[error("Invalid NetBox URL '{url}': {source}")]
    Url {
        /// The offending URL or link
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },

    /// A pagination link points back to an already fetched page.
    #[error("NetBox pagination loops back to {url}")]
    PaginationLoop {
        /// The repeated page URL
        url: String,
    },

    /// The API token cannot be sent as an HTTP header.
    #[error("Invalid NetBox API token: {0}")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),
}
