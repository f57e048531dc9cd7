//! Every relayed route reports a transport failure as a 500 envelope.

use axum::http::{Method, StatusCode};
use shopify_gateway_integration_tests::{gateway_for, send, unreachable_base_url};

#[tokio::test]
async fn test_unreachable_upstream_is_500_on_every_route() {
    let app = gateway_for(unreachable_base_url().await);

    let routes = [
        (Method::GET, "/products", None),
        (Method::POST, "/create_product", Some(r#"{"title":"Hat"}"#)),
        (Method::PUT, "/update_product/1", Some(r#"{"title":"Hat"}"#)),
        (Method::PUT, "/update_variant/1", Some(r#"{"price":"1.00"}"#)),
        (Method::DELETE, "/delete_product/1", None),
        (Method::DELETE, "/delete_all_products", None),
        (Method::GET, "/orders", None),
        (Method::GET, "/customers", None),
        (Method::GET, "/inventory_levels", None),
        (Method::POST, "/discounts/create", None),
    ];

    for (method, path, body) in routes {
        let response = send(&app, method.clone(), path, body).await;

        assert_eq!(
            response.status,
            StatusCode::INTERNAL_SERVER_ERROR,
            "{method} {path}"
        );
        assert!(!response.error().is_empty(), "{method} {path}");
    }
}

#[tokio::test]
async fn test_health_does_not_touch_upstream() {
    let app = gateway_for(unreachable_base_url().await);

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "ok");
}
