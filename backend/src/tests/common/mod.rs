// Common test utilities and helpers

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use tower::ServiceExt;

use crate::config::Config;
use crate::models::LocaleInfoResponse;
use crate::services::{SessionError, SessionStore};
use crate::{AppState, build_router};

pub const COOKIE_NAME: &str = "locale_switch_session";

/// Config with en/tr/zh available and "en" as default
pub fn test_config(validate: bool) -> Config {
    let mut config = Config::from_toml_str(
        r#"
        [session]
        cookie_name = "locale_switch_session"
        lifetime = "10m"

        [locale]
        default = "en"

        [[locale.available]]
        label = "English"
        id = "en"

        [[locale.available]]
        label = "Türkçe"
        id = "tr"

        [[locale.available]]
        label = "中文"
        id = "zh"
        "#,
    )
    .expect("Failed to parse test config");
    config.locale.validate = validate;
    config
}

pub fn create_test_app(validate: bool) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(test_config(validate)));
    (build_router(Arc::clone(&state)), state)
}

pub fn create_test_app_with_store(store: Arc<dyn SessionStore>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_store(test_config(true), store));
    (build_router(Arc::clone(&state)), state)
}

/// Build a GET request, optionally carrying a session cookie and a referer
pub fn get(uri: &str, cookie: Option<&str>, referer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri).header(header::HOST, "localhost");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(referer) = referer {
        builder = builder.header(header::REFERER, referer);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("Router is infallible")
}

/// "name=value" pair of the session cookie issued by a response
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(COOKIE_NAME))
        .and_then(|v| v.split(';').next())
        .expect("Response should set the session cookie")
        .to_string()
}

/// Session id carried by a "name=value" cookie pair
pub fn session_id(cookie: &str) -> &str {
    cookie.split_once('=').map(|(_, id)| id).expect("Malformed cookie pair")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn locale_info(app: &Router, cookie: Option<&str>) -> LocaleInfoResponse {
    let response = send(app, get("/api/locale", cookie, None)).await;
    assert_eq!(response.status(), 200);
    serde_json::from_str(&body_string(response).await).expect("Invalid locale info JSON")
}

/// Session store whose backend is always down
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn exists(&self, _: &str) -> Result<bool, SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }

    async fn has(&self, _: &str, _: &str) -> Result<bool, SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<String>, SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }

    async fn put(&self, _: &str, _: &str, _: String) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }

    async fn touch(&self, _: &str) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }

    async fn destroy(&self, _: &str) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }

    async fn purge_expired(&self) -> Result<usize, SessionError> {
        Err(SessionError::Unavailable("connection refused".into()))
    }
}
