//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::shopify::{ShopifyClient, ShopifyError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything inside is read-only after
/// startup, so handlers never contend on it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GatewayConfig,
    shopify: ShopifyClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify client cannot be built from the
    /// configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ShopifyError> {
        let shopify = ShopifyClient::new(&config.shopify)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, shopify }),
        })
    }

    /// Get a reference to the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &ShopifyClient {
        &self.inner.shopify
    }
}
