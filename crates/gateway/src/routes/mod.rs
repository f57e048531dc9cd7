//! HTTP route handlers for the gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                        - Deployment confirmation (plain text)
//! GET    /health                  - Liveness check (plain text)
//!
//! # Products
//! GET    /products                - List products (?page=&limit=, default limit 50)
//! POST   /create_product          - Create product
//! PUT    /update_product/{id}     - Update product
//! DELETE /delete_product/{id}     - Delete product (upstream status relayed)
//! DELETE /delete_all_products     - Delete up to 250 products, one at a time
//!
//! # Variants
//! PUT    /update_variant/{id}     - Update variant
//!
//! # Read-only listings
//! GET    /orders                  - Orders in any status (limit 50)
//! GET    /customers               - Customers (limit 50)
//! GET    /inventory_levels        - Inventory levels (limit 50)
//!
//! # Discounts
//! POST   /discounts/create        - Create price rule + discount code
//! ```

pub mod customers;
pub mod discounts;
pub mod inventory;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::shopify::UpstreamJson;
use crate::state::AppState;

/// Plain-text body served at `/`.
pub const DEPLOYMENT_MESSAGE: &str = "Shopify gateway is running";

/// Upstream JSON is relayed with the upstream status.
impl IntoResponse for UpstreamJson {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Build the gateway routes without state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        // Products
        .route("/products", get(products::index))
        .route("/create_product", post(products::create))
        .route("/update_product/{id}", put(products::update))
        .route("/delete_product/{id}", delete(products::delete))
        .route("/delete_all_products", delete(products::delete_all))
        // Variants
        .route("/update_variant/{id}", put(products::update_variant))
        // Listings
        .route("/orders", get(orders::index))
        .route("/customers", get(customers::index))
        .route("/inventory_levels", get(inventory::index))
        // Discounts
        .route("/discounts/create", post(discounts::create))
}

/// Build the complete application: routes, request IDs, and request tracing.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Deployment confirmation.
async fn index() -> &'static str {
    DEPLOYMENT_MESSAGE
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not contact Shopify.
async fn health() -> &'static str {
    "ok"
}
