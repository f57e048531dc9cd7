//! Discount route handlers.

use axum::{Json, body::Bytes, extract::State};
use serde_json::{Value, json};
use shopify_gateway_core::DiscountRequest;
use tracing::instrument;

use crate::{error::AppError, state::AppState};

/// Create a price rule and its discount code.
///
/// The body is optional: an empty body (or `{}`) creates the default
/// discount.
#[instrument(skip(state, body))]
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    let request = parse_request(&body)?;

    let discount = state.shopify().create_discount(&request).await?;

    Ok(Json(json!({
        "message": "Discount created",
        "discount": discount,
    })))
}

fn parse_request(body: &[u8]) -> Result<DiscountRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DiscountRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))
}
