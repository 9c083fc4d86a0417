use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::i18n::DEFAULT_LOCALE;
use crate::services::SessionError;

/// API Error with rich context and automatic error trait implementations
///
/// Responses are rendered in the default locale; the locale middleware
/// re-renders them in the request's active locale on the way out.
#[derive(Error, Debug)]
pub enum ApiError {
    // Session errors 1xxx
    #[error("Session store error: {0}")]
    Session(#[from] SessionError),

    #[error("Session layer is not installed")]
    SessionMissing,

    // Locale errors 3xxx
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create unsupported locale error
    pub fn unsupported_locale(locale: impl Into<String>) -> Self {
        Self::UnsupportedLocale(locale.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::Session(_) => 1001,
            Self::SessionMissing => 1002,

            Self::UnsupportedLocale(_) => 3001,

            Self::InternalError(_) => 5001,
            Self::Other(_) => 5001,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error_code() {
            3000..=3999 => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get localized error message for the given locale
    pub fn localized_message(&self, locale: &str) -> String {
        match self {
            Self::Session(err) => {
                t!("session.unavailable", locale = locale, error = err.to_string()).to_string()
            },
            Self::SessionMissing => t!("session.missing", locale = locale).to_string(),
            Self::UnsupportedLocale(name) => {
                t!("locale.unsupported", locale = locale, id = name).to_string()
            },
            Self::InternalError(msg) => {
                t!("internal.error", locale = locale, message = msg).to_string()
            },
            Self::Other(err) => {
                t!("internal.error", locale = locale, message = err.to_string()).to_string()
            },
        }
    }

    /// Build the error response with the message rendered for `locale`
    pub fn to_response(&self, locale: &str) -> Response {
        let body = ApiErrorResponse {
            code: self.error_code(),
            message: self.localized_message(locale),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!("Request failed: {}", self),
            _ => tracing::debug!("Request rejected: {}", self),
        }

        let mut response = self.to_response(DEFAULT_LOCALE);
        // Carried so the locale middleware can re-render the message
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_status() {
        let err = ApiError::unsupported_locale("xx");
        assert_eq!(err.error_code(), 3001);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(SessionError::Unavailable("redis down".into()));
        assert_eq!(err.error_code(), 1001);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_localized_message() {
        let err = ApiError::unsupported_locale("xx");
        assert_eq!(err.localized_message("en"), "Locale 'xx' is not supported");
        assert_eq!(err.localized_message("tr"), "'xx' dili desteklenmiyor");
    }

    #[test]
    fn test_into_response_carries_error() {
        let response = ApiError::internal_error("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Arc<ApiError>>().is_some());
    }
}
