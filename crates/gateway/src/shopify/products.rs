//! Product and variant operations for the Admin API.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use shopify_gateway_core::ProductId;
use tracing::instrument;

use super::{ShopifyClient, ShopifyError, UpstreamJson, UpstreamResponse};

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Maximum number of products fetched for a bulk delete (one upstream page).
pub const BULK_DELETE_LIMIT: u32 = 250;

/// Pagination parameters relayed verbatim to the products listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    /// Number of delete calls issued.
    pub attempted: usize,
    /// Ids whose delete returned 200, in the order they were deleted.
    pub deleted_ids: Vec<ProductId>,
}

impl BulkDeleteReport {
    /// Human-readable summary for the response envelope.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Deleted {} products", self.deleted_ids.len())
    }
}

impl ShopifyClient {
    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers non-2xx,
    /// or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> Result<UpstreamJson, ShopifyError> {
        let mut params = vec![(
            "limit",
            query
                .limit
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_LIMIT.to_string()),
        )];
        if let Some(page) = &query.page {
            params.push(("page", page.clone()));
        }

        self.get(&["products.json"], &params).await?.into_json()
    }

    /// Create a product from caller-supplied attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers non-2xx,
    /// or the body is not JSON.
    #[instrument(skip(self, product))]
    pub async fn create_product(&self, product: Value) -> Result<UpstreamJson, ShopifyError> {
        self.post(&["products.json"], &json!({ "product": product }))
            .await?
            .into_json()
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers non-2xx,
    /// or the body is not JSON.
    #[instrument(skip(self, product), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &str,
        product: Value,
    ) -> Result<UpstreamJson, ShopifyError> {
        self.put(
            &["products", &format!("{id}.json")],
            &json!({ "product": product }),
        )
        .await?
        .into_json()
    }

    /// Update a product variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream answers non-2xx,
    /// or the body is not JSON.
    #[instrument(skip(self, variant), fields(variant_id = %id))]
    pub async fn update_variant(
        &self,
        id: &str,
        variant: Value,
    ) -> Result<UpstreamJson, ShopifyError> {
        self.put(
            &["variants", &format!("{id}.json")],
            &json!({ "variant": variant }),
        )
        .await?
        .into_json()
    }

    /// Delete a product.
    ///
    /// Returns the raw reply whatever its status; the caller decides what a
    /// non-200 means.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &str) -> Result<UpstreamResponse, ShopifyError> {
        let response = self.delete(&["products", &format!("{id}.json")]).await?;

        if response.status != StatusCode::OK {
            tracing::warn!(
                status = response.status.as_u16(),
                "Shopify rejected product delete"
            );
        }

        Ok(response)
    }

    /// Delete every product on the first upstream page (up to
    /// [`BULK_DELETE_LIMIT`]).
    ///
    /// Deletes run one at a time. A product counts as deleted only when its
    /// delete returns 200; failures are logged and skipped, never retried.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial product fetch fails.
    #[instrument(skip(self))]
    pub async fn delete_all_products(&self) -> Result<BulkDeleteReport, ShopifyError> {
        let listing = self
            .get(&["products.json"], &[("limit", BULK_DELETE_LIMIT.to_string())])
            .await?
            .into_json()?;

        let ids = product_ids(&listing.body)?;
        tracing::info!(count = ids.len(), "Deleting products");

        let mut report = BulkDeleteReport::default();
        for id in ids {
            report.attempted += 1;
            match self.delete(&["products", &format!("{id}.json")]).await {
                Ok(response) if response.status == StatusCode::OK => report.deleted_ids.push(id),
                Ok(response) => {
                    tracing::warn!(
                        product_id = %id,
                        status = response.status.as_u16(),
                        "Product delete failed"
                    );
                }
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "Product delete failed");
                }
            }
        }

        tracing::info!(
            attempted = report.attempted,
            deleted = report.deleted_ids.len(),
            "Bulk delete finished"
        );
        Ok(report)
    }
}

/// Collect the numeric ids of a products listing, skipping entries without one.
fn product_ids(listing: &Value) -> Result<Vec<ProductId>, ShopifyError> {
    let products = listing
        .get("products")
        .and_then(Value::as_array)
        .ok_or(ShopifyError::MissingField("products"))?;

    Ok(products
        .iter()
        .filter_map(|product| product.get("id").and_then(ProductId::from_json))
        .collect())
}
