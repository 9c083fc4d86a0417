//! Locale switching
//!
//! `GET /language/{locale}` stores the chosen locale in the session and
//! sends the visitor back where they came from.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Uri, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::AppState;
use crate::middleware::Session;
use crate::models::ActiveLocale;
use crate::services::LocaleDecision;
use crate::utils::{ApiResult, LOCALE_SESSION_KEY};

const FALLBACK_TARGET: &str = "/";

/// Switch the session locale and redirect back
#[utoipa::path(
    get,
    path = "/language/{locale}",
    params(
        ("locale" = String, Path, description = "Locale identifier, e.g. \"tr\"")
    ),
    responses(
        (status = 303, description = "Redirect to the referring page, or / when unknown")
    ),
    tag = "Locale"
)]
pub async fn switch_language(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(locale): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let target = redirect_target(&headers);

    match state.locales.decide(&locale) {
        LocaleDecision::Accept(accepted) => {
            let active = ActiveLocale::new(accepted);
            session.put(LOCALE_SESSION_KEY, active.as_str()).await?;
            tracing::info!("Session {} switched locale to '{}'", session.id(), active);

            let mut response = Redirect::to(&target).into_response();
            response.extensions_mut().insert(active);
            Ok(response)
        },
        LocaleDecision::Reject => {
            tracing::warn!(
                "Rejected unsupported locale '{}' for session {}",
                locale,
                session.id()
            );
            Ok(Redirect::to(&target).into_response())
        },
    }
}

/// Where to send the visitor after switching.
///
/// Only same-host referrers are followed; anything else goes to `/`.
pub(crate) fn redirect_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return FALLBACK_TARGET.to_string();
    };
    let Ok(uri) = referer.parse::<Uri>() else {
        return FALLBACK_TARGET.to_string();
    };

    match uri.authority() {
        None => {
            let is_local_path = referer.starts_with('/')
                && !referer.starts_with("//")
                && !referer.starts_with("/\\");
            if is_local_path { referer.to_string() } else { FALLBACK_TARGET.to_string() }
        },
        Some(authority) => {
            let same_host = headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|host| host.eq_ignore_ascii_case(authority.as_str()));
            let web_scheme = matches!(uri.scheme_str(), Some("http") | Some("https"));

            if !(same_host && web_scheme) {
                return FALLBACK_TARGET.to_string();
            }
            uri.path_and_query()
                .map(|pq| pq.as_str())
                .filter(|pq| pq.starts_with('/'))
                .unwrap_or(FALLBACK_TARGET)
                .to_string()
        },
    }
}
