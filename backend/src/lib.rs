//! Session-backed locale switching for a small web application.
//!
//! Request flow:
//! ```text
//! request ─▶ session_middleware ─▶ locale_middleware ─▶ handler
//!            (cookie → Session)    (Session → ActiveLocale)
//! ```
//! `GET /language/{locale}` writes the session locale and redirects back;
//! every later request in that session renders in the stored locale.

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::middleware::{SessionState, locale_middleware, session_middleware};
use crate::services::{LocaleService, MemorySessionStore, SessionStore};

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub locales: Arc<LocaleService>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Build state backed by the in-memory session store
    pub fn new(config: Config) -> Self {
        let sessions: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::new(config.session.lifetime));
        Self::with_store(config, sessions)
    }

    pub fn with_store(config: Config, sessions: Arc<dyn SessionStore>) -> Self {
        let locales = Arc::new(LocaleService::new(&config.locale));
        Self { config, locales, sessions }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::language::switch_language,
        handlers::locale_api::current_locale,
        handlers::locale_api::describe_locale,
    ),
    components(schemas(models::AvailableLocale, models::LocaleInfoResponse)),
    tags((name = "Locale", description = "Locale selection and lookup"))
)]
pub struct ApiDoc;

/// Assemble the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let session_state = SessionState::new(Arc::clone(&state.sessions), &state.config.session);

    Router::new()
        .route("/", get(handlers::home::welcome))
        .route("/language/:locale", get(handlers::language::switch_language))
        .route("/api/locale", get(handlers::locale_api::current_locale))
        .route("/api/locale/:locale", get(handlers::locale_api::describe_locale))
        .with_state(Arc::clone(&state))
        // Layers run outermost-last: session first, then locale resolution
        .layer(from_fn_with_state(Arc::clone(&state.locales), locale_middleware))
        .layer(from_fn_with_state(session_state, session_middleware))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
