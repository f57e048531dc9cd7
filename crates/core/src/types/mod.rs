//! Core types for the Shopify gateway.
//!
//! This module provides type-safe wrappers for the few upstream shapes the
//! gateway constructs or inspects.

pub mod discount;
pub mod id;

pub use discount::{
    DEFAULT_CODE, DEFAULT_STARTS_AT, DEFAULT_TITLE, DEFAULT_VALUE, DiscountCode,
    DiscountCodePayload, DiscountRequest, PriceRule, PriceRulePayload,
};
pub use id::*;
