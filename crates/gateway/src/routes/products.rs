//! Product and variant route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::{
    error::AppError,
    shopify::{ProductListQuery, UpstreamJson},
    state::AppState,
};

/// Product listing; `page` and `limit` are passed through.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<UpstreamJson, AppError> {
    Ok(state.shopify().list_products(&query).await?)
}

/// Create a product from the request body.
#[instrument(skip(state, product))]
pub async fn create(
    State(state): State<AppState>,
    Json(product): Json<Value>,
) -> Result<UpstreamJson, AppError> {
    Ok(state.shopify().create_product(product).await?)
}

/// Update a product from the request body.
#[instrument(skip(state, product))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(product): Json<Value>,
) -> Result<UpstreamJson, AppError> {
    Ok(state.shopify().update_product(&id, product).await?)
}

/// Update a variant from the request body.
#[instrument(skip(state, variant))]
pub async fn update_variant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(variant): Json<Value>,
) -> Result<UpstreamJson, AppError> {
    Ok(state.shopify().update_variant(&id, variant).await?)
}

/// Delete a single product.
///
/// Anything other than a 200 from Shopify is relayed with its original
/// status and body text.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let response = state.shopify().delete_product(&id).await?;

    if response.status != StatusCode::OK {
        return Err(AppError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    Ok(Json(json!({ "message": format!("Product {id} deleted") })))
}

/// Delete every product on the first upstream page, reporting which went.
#[instrument(skip(state))]
pub async fn delete_all(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let report = state.shopify().delete_all_products().await?;

    Ok(Json(json!({
        "message": report.message(),
        "deleted_ids": report.deleted_ids,
    })))
}
