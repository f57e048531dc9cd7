//! REST transport for the Shopify Admin API.
//!
//! Builds upstream URLs from path segments, attaches the static credential
//! headers, and hands back the raw status and body. Deciding whether a
//! status counts as failure is left to the caller: most operations require
//! 2xx via [`UpstreamResponse::into_json`], while deletes inspect the status
//! themselves.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ShopifyConfig;

use super::ShopifyError;

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Shopify REST Admin API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for ShopifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Raw upstream reply: status plus undecoded body text.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

/// Successful upstream reply with its decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamJson {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamResponse {
    /// Require a 2xx status and decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Status` for non-2xx replies and
    /// `ShopifyError::Parse` if the body is not JSON.
    pub fn into_json(self) -> Result<UpstreamJson, ShopifyError> {
        if !self.status.is_success() {
            tracing::warn!(
                status = self.status.as_u16(),
                url = %self.url,
                "Shopify returned error status"
            );
            return Err(ShopifyError::Status {
                status: self.status,
                url: self.url,
                body: self.body,
            });
        }

        let body = serde_json::from_str(&self.body)?;
        Ok(UpstreamJson {
            status: self.status,
            body,
        })
    }
}

impl ShopifyClient {
    /// Create a new Admin API client.
    ///
    /// The credential and content-type headers are built here once and sent
    /// with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, the token is not a
    /// valid header value, or the HTTP client fails to build.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let base_url = Url::parse(&config.api_base_url())?;

        let mut headers = HeaderMap::new();

        let mut token = HeaderValue::from_str(config.access_token.expose_secret())
            .map_err(|e| ShopifyError::InvalidHeader(e.to_string()))?;
        token.set_sensitive(true);
        headers.insert(ACCESS_TOKEN_HEADER, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ShopifyClientInner { client, base_url }),
        })
    }

    /// The API base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve path segments and query parameters against the base URL.
    ///
    /// Each segment is percent-encoded, so caller-supplied ids cannot escape
    /// their path position.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    /// Execute a GET request.
    pub(crate) async fn get(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<UpstreamResponse, ShopifyError> {
        self.send::<()>(Method::GET, self.endpoint(segments, query), None)
            .await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<UpstreamResponse, ShopifyError> {
        self.send(Method::POST, self.endpoint(segments, &[]), Some(body))
            .await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<UpstreamResponse, ShopifyError> {
        self.send(Method::PUT, self.endpoint(segments, &[]), Some(body))
            .await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<UpstreamResponse, ShopifyError> {
        self.send::<()>(Method::DELETE, self.endpoint(segments, &[]), None)
            .await
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<UpstreamResponse, ShopifyError> {
        let url_text = url.to_string();
        tracing::debug!(%method, url = %url_text, "Calling Shopify");

        let mut request = self.inner.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(UpstreamResponse {
            status,
            url: url_text,
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;

    fn client(config: &ShopifyConfig) -> ShopifyClient {
        ShopifyClient::new(config).unwrap()
    }

    fn default_config() -> ShopifyConfig {
        ShopifyConfig::new(
            "test-shop.myshopify.com",
            SecretString::from("shpat_9fK2mQx7LbR4tZ8wNc1vYp3h"),
        )
    }

    #[test]
    fn test_endpoint_uses_versioned_base() {
        let client = client(&default_config());
        let url = client.endpoint(&["products.json"], &[("limit", "50".to_string())]);

        assert_eq!(
            url.as_str(),
            "https://test-shop.myshopify.com/admin/api/2024-04/products.json?limit=50"
        );
    }

    #[test]
    fn test_endpoint_nested_resource() {
        let client = client(&default_config());
        let url = client.endpoint(&["price_rules", "507328175", "discount_codes.json"], &[]);

        assert_eq!(
            url.as_str(),
            "https://test-shop.myshopify.com/admin/api/2024-04/price_rules/507328175/discount_codes.json"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = client(&default_config());
        let url = client.endpoint(&["products", "../orders.json"], &[]);

        assert_eq!(
            url.as_str(),
            "https://test-shop.myshopify.com/admin/api/2024-04/products/..%2Forders.json"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_override() {
        let config = default_config()
            .with_base_url(Url::parse("http://127.0.0.1:9000/admin/api/2024-04/").unwrap());
        let client = client(&config);
        let url = client.endpoint(
            &["orders.json"],
            &[("limit", "50".to_string()), ("status", "any".to_string())],
        );

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/admin/api/2024-04/orders.json?limit=50&status=any"
        );
    }

    #[test]
    fn test_invalid_token_header_rejected() {
        let config = ShopifyConfig::new(
            "test-shop.myshopify.com",
            SecretString::from("bad\ntoken"),
        );
        assert!(matches!(
            ShopifyClient::new(&config),
            Err(ShopifyError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_into_json_success() {
        let response = UpstreamResponse {
            status: StatusCode::CREATED,
            url: "https://example.test/products.json".to_string(),
            body: r#"{"product":{"id":1}}"#.to_string(),
        };

        let json = response.into_json().unwrap();
        assert_eq!(json.status, StatusCode::CREATED);
        assert_eq!(json.body, json!({"product": {"id": 1}}));
    }

    #[test]
    fn test_into_json_rejects_error_status() {
        let response = UpstreamResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            url: "https://example.test/products.json".to_string(),
            body: r#"{"errors":{"title":["can't be blank"]}}"#.to_string(),
        };

        let err = response.into_json().unwrap_err();
        assert!(matches!(
            err,
            ShopifyError::Status { status, .. } if status == StatusCode::UNPROCESSABLE_ENTITY
        ));
    }

    #[test]
    fn test_into_json_rejects_non_json_body() {
        let response = UpstreamResponse {
            status: StatusCode::OK,
            url: "https://example.test/products.json".to_string(),
            body: "<html>maintenance</html>".to_string(),
        };

        assert!(matches!(
            response.into_json(),
            Err(ShopifyError::Parse(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = client(&default_config());
        let debug_output = format!("{client:?}");

        assert!(debug_output.contains("test-shop.myshopify.com"));
        assert!(!debug_output.contains("shpat_"));
    }
}
