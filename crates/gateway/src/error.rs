//! Unified error handling for the gateway.
//!
//! Every failure leaves the gateway as a JSON envelope `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shopify::ShopifyError;

/// Application-level error type for route handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream call failed (transport, non-2xx, or undecodable reply).
    #[error(transparent)]
    Shopify(#[from] ShopifyError),

    /// Upstream answered and its status and body are relayed as-is.
    #[error("{body}")]
    Upstream { status: StatusCode, body: String },

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status of the error envelope.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Shopify(e) = &self {
            let event_id = sentry::capture_error(e);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Gateway request error"
            );
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Shopify(ShopifyError::MissingField("products"));
        assert_eq!(
            err.to_string(),
            "Missing field in upstream response: products"
        );

        let err = AppError::Upstream {
            status: StatusCode::NOT_FOUND,
            body: r#"{"errors":"Not Found"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"{"errors":"Not Found"}"#);

        let err = AppError::BadRequest("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid JSON");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Shopify(ShopifyError::MissingField("products"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Upstream {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
