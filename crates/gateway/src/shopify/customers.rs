//! Customer listing for the Admin API.

use tracing::instrument;

use super::{DEFAULT_PAGE_LIMIT, ShopifyClient, ShopifyError, UpstreamJson};

impl ShopifyClient {
    /// Get a page of customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers non-2xx,
    /// or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<UpstreamJson, ShopifyError> {
        self.get(
            &["customers.json"],
            &[("limit", DEFAULT_PAGE_LIMIT.to_string())],
        )
        .await?
        .into_json()
    }
}
