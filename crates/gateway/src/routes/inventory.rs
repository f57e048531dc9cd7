//! Inventory route handlers.

use axum::extract::State;
use tracing::instrument;

use crate::{error::AppError, shopify::UpstreamJson, state::AppState};

/// Inventory level listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<UpstreamJson, AppError> {
    Ok(state.shopify().list_inventory_levels().await?)
}
