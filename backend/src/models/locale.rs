use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::ApiError;

/// Locale in effect for the current request.
///
/// Inserted into the request extensions by the locale middleware and
/// read back by handlers through the extractor below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLocale(String);

impl ActiveLocale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ActiveLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ActiveLocale
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActiveLocale>()
            .cloned()
            .ok_or_else(|| ApiError::internal_error("Locale middleware is not installed"))
    }
}

/// A selectable locale: display label and identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailableLocale {
    /// Label shown on the switch link (e.g. "Türkçe")
    pub label: String,
    /// Locale identifier used in `/language/{id}` (e.g. "tr")
    pub id: String,
}

impl AvailableLocale {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self { label: label.into(), id: id.into() }
    }
}

/// Response body of `GET /api/locale`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocaleInfoResponse {
    pub active: String,
    pub default: String,
    pub available: Vec<AvailableLocale>,
}
