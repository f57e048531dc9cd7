//! Order listing for the Admin API.

use tracing::instrument;

use super::{DEFAULT_PAGE_LIMIT, ShopifyClient, ShopifyError, UpstreamJson};

impl ShopifyClient {
    /// Get the most recent orders in any status (open, closed, cancelled).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers non-2xx,
    /// or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<UpstreamJson, ShopifyError> {
        self.get(
            &["orders.json"],
            &[
                ("limit", DEFAULT_PAGE_LIMIT.to_string()),
                ("status", "any".to_string()),
            ],
        )
        .await?
        .into_json()
    }
}
