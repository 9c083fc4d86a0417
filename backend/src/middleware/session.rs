//! Session middleware
//!
//! Maps the session cookie to a [`Session`] handle stored in the request
//! extensions. Requests without a live session get a fresh id, and the
//! cookie is (re)issued on every response so its expiry slides with use.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::services::{SessionError, SessionStore};
use crate::utils::ApiError;

/// Handle to the current visitor's session
#[derive(Clone)]
pub struct Session {
    id: String,
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(id: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self { id: id.into(), store }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn has(&self, key: &str) -> Result<bool, SessionError> {
        self.store.has(&self.id, key).await
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.store.get(&self.id, key).await
    }

    pub async fn put(&self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        self.store.put(&self.id, key, value.into()).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish_non_exhaustive()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Session>().cloned().ok_or(ApiError::SessionMissing)
    }
}

#[derive(Clone)]
pub struct SessionState {
    pub store: Arc<dyn SessionStore>,
    pub cookie_name: Arc<str>,
    pub lifetime_secs: u64,
}

impl SessionState {
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            cookie_name: Arc::from(config.cookie_name.as_str()),
            lifetime_secs: config.lifetime,
        }
    }

    fn set_cookie_value(&self, session_id: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name, session_id, self.lifetime_secs
        )
    }
}

/// Attach a session handle to every request
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| parse_cookie(cookies, &state.cookie_name))
        .filter(|id| Uuid::parse_str(id).is_ok())
        .map(str::to_string);

    let live = match presented {
        Some(id) => {
            if state.store.exists(&id).await? {
                state.store.touch(&id).await?;
                Some(id)
            } else {
                tracing::debug!("Session {} expired or unknown, starting a new one", id);
                None
            }
        },
        None => None,
    };
    let session_id = live.unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(Session::new(session_id.clone(), Arc::clone(&state.store)));

    let mut response = next.run(req).await;

    let cookie = HeaderValue::from_str(&state.set_cookie_value(&session_id))
        .map_err(|e| ApiError::internal_error(format!("Invalid session cookie: {}", e)))?;
    response.headers_mut().append(header::SET_COOKIE, cookie);

    Ok(response)
}

/// Parse a specific cookie from a Cookie header string.
fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie() {
        assert_eq!(parse_cookie("sid=abc123; other=xyz", "sid"), Some("abc123"));
        assert_eq!(parse_cookie("other=xyz; sid=abc123", "sid"), Some("abc123"));
        assert_eq!(parse_cookie("other=xyz", "sid"), None);
        assert_eq!(parse_cookie("sidx=1", "sid"), None);
        assert_eq!(parse_cookie("", "sid"), None);
    }

    #[test]
    fn test_set_cookie_value() {
        let state = SessionState::new(
            Arc::new(crate::services::MemorySessionStore::new(60)),
            &SessionConfig { cookie_name: "sid".to_string(), lifetime: 60, purge_interval: 60 },
        );
        assert_eq!(
            state.set_cookie_value("abc"),
            "sid=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
    }
}
