//! Error handling with Sentry integration.
//!
//! Handlers return [`Result`]. Client mistakes become 4xx responses carrying
//! the message the shopper should see; server faults are reported to Sentry
//! and answered with a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store read or write failed.
    #[error("session store: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// No product or cart line with that key.
    #[error("{0} not found")]
    NotFound(String),

    /// Unusable input, e.g. a missing size or an unknown filter label.
    #[error("{0}")]
    BadRequest(String),

    /// The catalog forbids the request, e.g. ordering an out-of-stock product.
    #[error("{0}")]
    Conflict(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Session(_) | Self::Internal(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.is_server_error() {
            tracing::debug!(error = %self, "request rejected");
            return (self.status(), self.to_string()).into_response();
        }

        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Internal details stay in the logs
        (self.status(), "Internal server error").into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a shopper action as a Sentry breadcrumb.
///
/// Breadcrumbs show up in later error reports from the same request scope,
/// e.g. the cart changes leading up to a failed checkout.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", &[("product_id", "1"), ("size", "50ml")]);
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data: data
            .iter()
            .map(|(key, value)| ((*key).to_string(), serde_json::Value::from(*value)))
            .collect(),
        ..Default::default()
    });
}
