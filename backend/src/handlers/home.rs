use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::AppState;
use crate::models::ActiveLocale;
use crate::views::render_welcome;

/// Landing page with the language switcher
pub async fn welcome(State(state): State<Arc<AppState>>, locale: ActiveLocale) -> Html<String> {
    Html(render_welcome(state.locales.available(), locale.as_str()))
}
