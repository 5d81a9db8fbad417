//! Request errors and their HTTP rendering.
//!
//! Storefront actions never fail; an action that does not apply is reported as
//! `Transition::Ignored` and still renders the panels. `AppError` covers the
//! rest: session store failures and requests that name something that does
//! not exist.
//!
//! Error responses carry `HX-Reswap: none` so HTMX leaves the current panels
//! in place instead of swapping in the error text.

use axum::{
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the visitor's session failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The request referred to a product that is not in the catalog.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Text shown to the visitor. Server-side details stay in the logs.
    fn public_message(&self) -> String {
        if self.status().is_server_error() {
            "Something went wrong, please reload the page".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (
            status,
            AppendHeaders([("HX-Reswap", "none")]),
            self.public_message(),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a visitor action for Sentry.
///
/// Breadcrumbs are attached to the next error reported from the same request.
///
/// ```rust,ignore
/// add_breadcrumb("checkout", "Order placed", Some(&[("order_number", "482913")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let data = data
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        })
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use tower_sessions::{session, session_store};

    use super::*;

    fn store_failure(detail: &str) -> AppError {
        AppError::Session(session::Error::Store(session_store::Error::Backend(
            detail.to_string(),
        )))
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("product k3j9x0abc".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("invalid checkout step 9".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            store_failure("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_show_their_message() {
        let err = AppError::NotFound("product k3j9x0abc".to_string());
        assert_eq!(err.public_message(), "Not found: product k3j9x0abc");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = store_failure("session store unreachable");
        assert!(!err.public_message().contains("unreachable"));
    }

    #[test]
    fn test_error_response_keeps_panels() {
        let response = AppError::BadRequest("invalid checkout step 0".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("HX-Reswap").and_then(|v| v.to_str().ok()),
            Some("none")
        );
    }
}
