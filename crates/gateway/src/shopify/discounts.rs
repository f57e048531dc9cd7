//! Discount creation for the Admin API.
//!
//! A discount code always hangs off a price rule, so creation is two calls:
//! the price rule first, then the code under the returned rule id.

use serde_json::Value;
use shopify_gateway_core::{DiscountCodePayload, DiscountRequest, PriceRuleId, PriceRulePayload};
use tracing::instrument;

use super::{ShopifyClient, ShopifyError};

impl ShopifyClient {
    /// Create a percentage-off price rule and a discount code bound to it.
    ///
    /// Returns the discount code reply body. The code is never requested
    /// unless the price rule was created and its id could be read.
    ///
    /// # Errors
    ///
    /// Returns an error if either call fails, answers non-2xx, or returns a
    /// body that is not JSON, or if the price rule reply carries no id.
    #[instrument(skip(self, request), fields(code = %request.code()))]
    pub async fn create_discount(&self, request: &DiscountRequest) -> Result<Value, ShopifyError> {
        let rule = self
            .post(&["price_rules.json"], &PriceRulePayload::from(request))
            .await?
            .into_json()?;

        let rule_id = rule
            .body
            .get("price_rule")
            .and_then(|r| r.get("id"))
            .and_then(PriceRuleId::from_json)
            .ok_or(ShopifyError::MissingField("price_rule.id"))?;
        tracing::info!(price_rule_id = %rule_id, "Price rule created");

        let discount = self
            .post(
                &[
                    "price_rules",
                    &rule_id.to_string(),
                    "discount_codes.json",
                ],
                &DiscountCodePayload::from(request),
            )
            .await?
            .into_json()?;

        Ok(discount.body)
    }
}
