//! Discount creation payloads.
//!
//! A discount is two upstream resources created in order: a price rule that
//! defines the discount's shape, then a discount code bound to that rule.
//! Only a handful of the price rule's fields come from the caller; the rest
//! are fixed to "percentage off every line item, for every customer".

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "auto-discount";

/// Percentage used when the caller does not supply one.
pub const DEFAULT_VALUE: u64 = 10;

/// Customer-facing code used when the caller does not supply one.
pub const DEFAULT_CODE: &str = "AUTODISCOUNT";

/// Start date used when the caller does not supply one.
pub const DEFAULT_STARTS_AT: &str = "2025-01-01T00:00:00Z";

/// Inbound body of a discount creation request.
///
/// Every field is optional. `value` is the percentage off and may be sent as
/// either a JSON number or a string. An explicit `null` counts as absent,
/// and the text fields must be strings when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiscountRequest {
    pub title: Option<String>,
    pub value: Option<Value>,
    pub code: Option<String>,
    pub starts_at: Option<String>,
}

impl DiscountRequest {
    /// The discount code, falling back to [`DEFAULT_CODE`].
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or(DEFAULT_CODE)
    }

    /// The upstream `value` field: the percentage negated as a string.
    #[must_use]
    pub fn signed_value(&self) -> String {
        let magnitude = match &self.value {
            None | Some(Value::Null) => DEFAULT_VALUE.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        format!("-{magnitude}")
    }
}

/// Upstream price rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRule {
    pub title: String,
    pub target_type: &'static str,
    pub target_selection: &'static str,
    pub allocation_method: &'static str,
    pub value_type: &'static str,
    pub value: String,
    pub customer_selection: &'static str,
    pub starts_at: String,
}

impl From<&DiscountRequest> for PriceRule {
    fn from(request: &DiscountRequest) -> Self {
        Self {
            title: request
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            target_type: "line_item",
            target_selection: "all",
            allocation_method: "across",
            value_type: "percentage",
            value: request.signed_value(),
            customer_selection: "all",
            starts_at: request
                .starts_at
                .clone()
                .unwrap_or_else(|| DEFAULT_STARTS_AT.to_string()),
        }
    }
}

/// Body of `POST price_rules.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRulePayload {
    pub price_rule: PriceRule,
}

impl From<&DiscountRequest> for PriceRulePayload {
    fn from(request: &DiscountRequest) -> Self {
        Self {
            price_rule: PriceRule::from(request),
        }
    }
}

/// Body of `POST price_rules/{id}/discount_codes.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountCodePayload {
    pub discount_code: DiscountCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountCode {
    pub code: String,
}

impl From<&DiscountRequest> for DiscountCodePayload {
    fn from(request: &DiscountRequest) -> Self {
        Self {
            discount_code: DiscountCode {
                code: request.code().to_string(),
            },
        }
    }
}
