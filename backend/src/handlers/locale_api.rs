use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::AppState;
use crate::models::{ActiveLocale, AvailableLocale, LocaleInfoResponse};
use crate::utils::ApiResult;

/// Active, default and available locales for the current session
#[utoipa::path(
    get,
    path = "/api/locale",
    responses(
        (status = 200, description = "Locale state of the current request", body = LocaleInfoResponse)
    ),
    tag = "Locale"
)]
pub async fn current_locale(
    State(state): State<Arc<AppState>>,
    locale: ActiveLocale,
) -> Json<LocaleInfoResponse> {
    Json(LocaleInfoResponse {
        active: locale.into_inner(),
        default: state.locales.default_locale().to_string(),
        available: state.locales.available().to_vec(),
    })
}

/// Look up a configured locale by identifier
#[utoipa::path(
    get,
    path = "/api/locale/{locale}",
    params(
        ("locale" = String, Path, description = "Locale identifier")
    ),
    responses(
        (status = 200, description = "Matching configured locale", body = AvailableLocale),
        (status = 404, description = "Locale is not configured")
    ),
    tag = "Locale"
)]
pub async fn describe_locale(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
) -> ApiResult<Json<AvailableLocale>> {
    tracing::debug!("Looking up locale '{}'", locale);
    let found = state.locales.lookup(&locale)?;
    Ok(Json(found.clone()))
}
