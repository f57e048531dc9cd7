//! Shopify REST Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the store's Admin API access token.** The token is
//! read once at startup and attached to every upstream request as
//! `X-Shopify-Access-Token`; it is marked sensitive so it never shows up in
//! `Debug` output of the underlying HTTP client.
//!
//! # Architecture
//!
//! - Plain REST calls against `https://{store}/admin/api/{version}/...`
//! - Request and response bodies are relayed as opaque JSON
//! - Each call returns an explicit [`Result`]; route handlers collapse errors
//!   into the `{"error": ...}` envelope
//! - Calls within a single operation are made strictly one after another
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_gateway::shopify::{ProductListQuery, ShopifyClient};
//!
//! let client = ShopifyClient::new(&config.shopify)?;
//!
//! let products = client.list_products(&ProductListQuery::default()).await?;
//! let report = client.delete_all_products().await?;
//! ```

mod client;
mod customers;
mod discounts;
mod inventory;
mod orders;
mod products;

pub use client::{ShopifyClient, UpstreamJson, UpstreamResponse};
pub use products::{BULK_DELETE_LIMIT, BulkDeleteReport, DEFAULT_PAGE_LIMIT, ProductListQuery};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned {status} for url ({url})")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Upstream response was missing a field the gateway depends on.
    #[error("Missing field in upstream response: {0}")]
    MissingField(&'static str),

    /// The configured API base URL could not be parsed.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The access token cannot be sent as an HTTP header.
    #[error("Invalid access token header: {0}")]
    InvalidHeader(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ShopifyError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://shop.myshopify.com/admin/api/2024-04/products/1.json".to_string(),
            body: r#"{"errors":"Not Found"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Upstream returned 404 Not Found for url (https://shop.myshopify.com/admin/api/2024-04/products/1.json)"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = ShopifyError::MissingField("price_rule.id");
        assert_eq!(
            err.to_string(),
            "Missing field in upstream response: price_rule.id"
        );
    }
}
