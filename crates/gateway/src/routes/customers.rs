//! Customer route handlers.

use axum::extract::State;
use tracing::instrument;

use crate::{error::AppError, shopify::UpstreamJson, state::AppState};

/// Customer listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<UpstreamJson, AppError> {
    Ok(state.shopify().list_customers().await?)
}
