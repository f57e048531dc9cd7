//! Integration tests for the read-only listing routes.

use axum::http::{Method, StatusCode};
use serde_json::json;
use shopify_gateway_integration_tests::{StubUpstream, gateway, send};

async fn assert_listing(route: &str, resource: &str, query: &str) {
    let stub = StubUpstream::always(StatusCode::OK, r#"{"items":[{"id":7}]}"#).await;
    let app = gateway(&stub);

    let response = send(&app, Method::GET, route, None).await;

    assert_eq!(response.status, StatusCode::OK, "{route}");
    assert_eq!(response.json(), json!({"items": [{"id": 7}]}), "{route}");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1, "{route}");
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].resource(), resource);
    assert_eq!(requests[0].query.as_deref(), Some(query));
}

#[tokio::test]
async fn test_orders_include_every_status() {
    assert_listing("/orders", "/orders.json", "limit=50&status=any").await;
}

#[tokio::test]
async fn test_customers() {
    assert_listing("/customers", "/customers.json", "limit=50").await;
}

#[tokio::test]
async fn test_inventory_levels() {
    assert_listing("/inventory_levels", "/inventory_levels.json", "limit=50").await;
}

#[tokio::test]
async fn test_listing_ignores_caller_query() {
    let stub = StubUpstream::always(StatusCode::OK, r#"{"orders":[]}"#).await;
    let app = gateway(&stub);

    send(&app, Method::GET, "/orders?limit=5&status=open", None).await;

    let requests = stub.requests();
    assert_eq!(requests[0].query.as_deref(), Some("limit=50&status=any"));
}

#[tokio::test]
async fn test_listing_upstream_error_is_500_envelope() {
    for route in ["/orders", "/customers", "/inventory_levels"] {
        let stub =
            StubUpstream::always(StatusCode::FORBIDDEN, r#"{"errors":"Missing scope"}"#).await;
        let app = gateway(&stub);

        let response = send(&app, Method::GET, route, None).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{route}");
        assert!(response.error().contains("403"), "{route}");
    }
}
