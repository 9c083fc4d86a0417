//! Locale resolution middleware
//!
//! Applies the locale stored in the visitor's session to the request. When
//! the session holds no locale the configured default is used. This layer
//! never writes to the session and never rejects a request.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::Session;
use crate::models::ActiveLocale;
use crate::services::LocaleService;
use crate::utils::{ApiError, LOCALE_SESSION_KEY};

/// Middleware to resolve the active locale from session state
pub async fn locale_middleware(
    State(locales): State<Arc<LocaleService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = req.extensions().get::<Session>().cloned().ok_or(ApiError::SessionMissing)?;

    let stored = if session.has(LOCALE_SESSION_KEY).await? {
        session.get(LOCALE_SESSION_KEY).await?
    } else {
        None
    };

    let active = match stored {
        Some(locale) => {
            tracing::debug!("Applying session locale '{}' for session {}", locale, session.id());
            ActiveLocale::new(locale)
        },
        None => ActiveLocale::new(locales.default_locale()),
    };

    req.extensions_mut().insert(active.clone());

    let response = next.run(req).await;

    Ok(localize_error(response, &active))
}

/// Re-render an error body produced downstream in the request's locale
fn localize_error(response: Response, active: &ActiveLocale) -> Response {
    let Some(error) = response.extensions().get::<Arc<ApiError>>().cloned() else {
        return response;
    };

    let mut localized = error.to_response(active.as_str());
    localized.extensions_mut().insert(error);
    localized
}
