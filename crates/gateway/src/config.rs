//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - REST Admin API version (default: 2024-04)
//! - `SHOPIFY_API_BASE_URL` - Full API base URL override (staging proxies, local stubs)
//! - `GATEWAY_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// REST Admin API version used when `SHOPIFY_API_VERSION` is unset.
pub const DEFAULT_API_VERSION: &str = "2024-04";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify REST Admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store_domain: String,
    /// REST Admin API version (e.g., 2024-04)
    pub api_version: String,
    /// Admin API access token, sent as `X-Shopify-Access-Token`
    pub access_token: SecretString,
    /// Overrides the `https://{domain}/admin/api/{version}` base when set
    pub base_url_override: Option<Url>,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("base_url_override", &self.base_url_override)
            .finish()
    }
}

impl ShopifyConfig {
    /// Create a configuration for a store using the default API version.
    #[must_use]
    pub fn new(store_domain: impl Into<String>, access_token: SecretString) -> Self {
        Self {
            store_domain: store_domain.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token,
            base_url_override: None,
        }
    }

    /// Point the client at a different API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Base URL every upstream path is appended to, without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.base_url_override.as_ref().map_or_else(
            || {
                format!(
                    "https://{}/admin/api/{}",
                    self.store_domain, self.api_version
                )
            },
            |url| url.as_str().trim_end_matches('/').to_string(),
        )
    }

    fn from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_domain = get_required(vars, "SHOPIFY_STORE_DOMAIN")?;
        validate_store_domain(&store_domain)?;

        let access_token = get_required(vars, "SHOPIFY_ACCESS_TOKEN")?;

        let base_url_override = vars("SHOPIFY_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                Url::parse(&v).map_err(|e| {
                    ConfigError::InvalidEnvVar("SHOPIFY_API_BASE_URL".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            store_domain,
            api_version: get_or_default(vars, "SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            access_token: SecretString::from(access_token),
            base_url_override,
        })
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the store domain or access token is missing,
    /// or if any variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayConfig::from_env`].
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(&vars, "GATEWAY_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GATEWAY_HOST".to_string(), e.to_string()))?;
        let port = get_or_default(&vars, "PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let shopify = ShopifyConfig::from_vars(&vars)?;

        let sentry_dsn = get_optional(&vars, "SENTRY_DSN");
        let sentry_environment = get_optional(&vars, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional(&vars, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional(&vars, "SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            shopify,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating empty values as unset.
fn get_optional(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    vars(key).filter(|v| !v.trim().is_empty())
}

/// Get a required variable.
fn get_required(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    get_optional(vars, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional(vars, key).unwrap_or_else(|| default.to_string())
}

/// The domain is interpolated into `https://{domain}/...`, so it must be a bare host.
fn validate_store_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.contains("://") || domain.contains('/') {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_STORE_DOMAIN".to_string(),
            format!("expected a bare host like your-store.myshopify.com, got '{domain}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let owned: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| owned.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("SHOPIFY_STORE_DOMAIN", "test-shop.myshopify.com"),
        ("SHOPIFY_ACCESS_TOKEN", "shpat_9fK2mQx7LbR4tZ8wNc1vYp3h"),
    ];

    #[test]
    fn test_from_vars_defaults() {
        let config = GatewayConfig::from_vars(lookup(REQUIRED)).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.shopify.store_domain, "test-shop.myshopify.com");
        assert_eq!(config.shopify.api_version, "2024-04");
        assert_eq!(
            config.shopify.api_base_url(),
            "https://test-shop.myshopify.com/admin/api/2024-04"
        );
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_domain_is_fatal() {
        let err = GatewayConfig::from_vars(lookup(&[(
            "SHOPIFY_ACCESS_TOKEN",
            "shpat_9fK2mQx7LbR4tZ8wNc1vYp3h",
        )]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "SHOPIFY_STORE_DOMAIN"));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = GatewayConfig::from_vars(lookup(&[(
            "SHOPIFY_STORE_DOMAIN",
            "test-shop.myshopify.com",
        )]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "SHOPIFY_ACCESS_TOKEN"));
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let err = GatewayConfig::from_vars(lookup(&[
            ("SHOPIFY_STORE_DOMAIN", "test-shop.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "   "),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_domain_with_scheme_is_rejected() {
        let err = GatewayConfig::from_vars(lookup(&[
            ("SHOPIFY_STORE_DOMAIN", "https://test-shop.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_9fK2mQx7LbR4tZ8wNc1vYp3h"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "not-a-port"));
        let err = GatewayConfig::from_vars(lookup(&vars)).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PORT"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("GATEWAY_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("SHOPIFY_API_VERSION", "2025-01"),
            ("SHOPIFY_API_BASE_URL", "http://127.0.0.1:9000/admin/api/2025-01/"),
        ]);
        let config = GatewayConfig::from_vars(lookup(&vars)).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.shopify.api_version, "2025-01");
        assert_eq!(
            config.shopify.api_base_url(),
            "http://127.0.0.1:9000/admin/api/2025-01"
        );
    }

    #[test]
    fn test_invalid_base_url_override() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SHOPIFY_API_BASE_URL", "not a url"));
        let err = GatewayConfig::from_vars(lookup(&vars)).unwrap_err();

        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPIFY_API_BASE_URL")
        );
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = ShopifyConfig::new(
            "test-shop.myshopify.com",
            SecretString::from("shpat_super_secret_token_value"),
        );

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("test-shop.myshopify.com"));
        assert!(debug_output.contains("2024-04"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_super_secret_token_value"));
    }

    #[test]
    fn test_access_token_is_taken_verbatim() {
        use secrecy::ExposeSecret;

        let config = GatewayConfig::from_vars(lookup(&[
            ("SHOPIFY_STORE_DOMAIN", "test-shop.myshopify.com"),
            ("SHOPIFY_ACCESS_TOKEN", "shpat_example"),
        ]))
        .unwrap();

        assert_eq!(config.shopify.access_token.expose_secret(), "shpat_example");
    }
}
