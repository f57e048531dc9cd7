//! Integration tests for the Shopify gateway.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopify-gateway-integration-tests
//! ```
//!
//! No Shopify credentials are needed. Each test starts a [`StubUpstream`]
//! on a random local port that records every request it receives and
//! answers from a scripted responder. The real gateway router is pointed at
//! it via the API base URL override and driven in-process with
//! `tower::ServiceExt::oneshot`.

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri, header::CONTENT_TYPE},
};
use secrecy::SecretString;
use serde_json::Value;
use shopify_gateway::config::{GatewayConfig, ShopifyConfig};
use shopify_gateway::state::AppState;
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

/// Access token the gateway under test is configured with.
pub const TEST_ACCESS_TOKEN: &str = "shpat_9fK2mQx7LbR4tZ8wNc1vYp3h";

/// Path prefix every upstream request should carry.
pub const API_PREFIX: &str = "/admin/api/2024-04";

/// A request as seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub access_token: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Path with the versioned API prefix removed.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.path.strip_prefix(API_PREFIX).unwrap_or(&self.path)
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

/// In-process stand-in for the Shopify Admin API.
pub struct StubUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    /// Start a stub that answers every request with `responder`.
    pub async fn start(
        responder: impl Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };

        let app = Router::new().fallback(record).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub upstream");
        let addr = listener.local_addr().expect("Stub upstream has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub upstream failed");
        });

        Self { addr, requests }
    }

    /// Start a stub that answers every request with the same reply.
    pub async fn always(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone())).await
    }

    /// API base URL to configure the gateway with.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}{API_PREFIX}", self.addr)).expect("Invalid stub URL")
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("Stub lock poisoned").clone()
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(axum::http::HeaderName, &'static str); 1], String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let request = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        access_token: header("x-shopify-access-token"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).ok(),
    };

    let (status, reply) = (state.responder)(&request);
    state
        .requests
        .lock()
        .expect("Stub lock poisoned")
        .push(request);

    (status, [(CONTENT_TYPE, "application/json")], reply)
}

/// Build the gateway router against an arbitrary API base URL.
#[must_use]
pub fn gateway_for(base_url: Url) -> Router {
    let config = GatewayConfig {
        host: "127.0.0.1".parse().expect("Invalid host"),
        port: 0,
        shopify: ShopifyConfig::new(
            "test-shop.myshopify.com",
            SecretString::from(TEST_ACCESS_TOKEN),
        )
        .with_base_url(base_url),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };

    shopify_gateway::routes::app(AppState::new(config).expect("Failed to build gateway state"))
}

/// Build the gateway router against a stub upstream.
#[must_use]
pub fn gateway(stub: &StubUpstream) -> Router {
    gateway_for(stub.base_url())
}

/// Base URL of a port nothing is listening on.
pub async fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);

    Url::parse(&format!("http://{addr}{API_PREFIX}")).expect("Invalid URL")
}

/// Gateway response as status plus raw body text.
pub struct GatewayResponse {
    pub status: StatusCode,
    pub text: String,
}

impl GatewayResponse {
    /// Body decoded as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("Gateway response was not JSON")
    }

    /// The `error` field of an error envelope.
    #[must_use]
    pub fn error(&self) -> String {
        self.json()["error"]
            .as_str()
            .expect("Response has no error string")
            .to_string()
    }
}

/// Send one request through the gateway router.
pub async fn send(app: &Router, method: Method, path: &str, body: Option<&str>) -> GatewayResponse {
    let mut request = Request::builder().method(method).uri(path);
    if body.is_some() {
        request = request.header(CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Gateway router failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read gateway body");

    GatewayResponse {
        status,
        text: String::from_utf8_lossy(&bytes).to_string(),
    }
}
