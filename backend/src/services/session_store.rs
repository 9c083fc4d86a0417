//! Session storage
//!
//! The session store is a per-session key-value collaborator. Handlers never
//! talk to it directly; they receive a [`crate::middleware::Session`] handle
//! bound to their session id.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage keyed by session id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Whether the session exists and has not expired
    async fn exists(&self, session_id: &str) -> Result<bool, SessionError>;

    async fn has(&self, session_id: &str, key: &str) -> Result<bool, SessionError>;

    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError>;

    /// Store a value, creating the session if needed
    async fn put(&self, session_id: &str, key: &str, value: String) -> Result<(), SessionError>;

    /// Push the session's expiry forward by one lifetime
    async fn touch(&self, session_id: &str) -> Result<(), SessionError>;

    async fn destroy(&self, session_id: &str) -> Result<(), SessionError>;

    /// Drop every expired session, returning how many were removed
    async fn purge_expired(&self) -> Result<usize, SessionError>;
}

// Ten years; keeps expiry arithmetic far away from chrono's limits
const MAX_LIFETIME_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
struct SessionRecord {
    data: HashMap<String, String>,
    expires_at: DateTime<Utc>,
}

impl SessionRecord {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// In-process session store with idle expiry
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionRecord>,
    lifetime: Duration,
}

impl MemorySessionStore {
    pub fn new(lifetime_secs: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            lifetime: Duration::seconds(lifetime_secs.min(MAX_LIFETIME_SECS) as i64),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Read a live session's value, evicting the session if it has expired
    fn read<T>(&self, session_id: &str, f: impl FnOnce(&SessionRecord) -> T) -> Option<T> {
        let now = Utc::now();
        let expired = match self.sessions.get(session_id) {
            Some(record) if !record.is_expired(now) => return Some(f(record.value())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove_if(session_id, |_, record| record.is_expired(now));
        }
        None
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn exists(&self, session_id: &str) -> Result<bool, SessionError> {
        Ok(self.read(session_id, |_| ()).is_some())
    }

    async fn has(&self, session_id: &str, key: &str) -> Result<bool, SessionError> {
        Ok(self.read(session_id, |record| record.data.contains_key(key)).unwrap_or(false))
    }

    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.read(session_id, |record| record.data.get(key).cloned()).flatten())
    }

    async fn put(&self, session_id: &str, key: &str, value: String) -> Result<(), SessionError> {
        let now = Utc::now();
        let expires_at = now + self.lifetime;
        let mut record = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRecord { data: HashMap::new(), expires_at });
        if record.is_expired(now) {
            record.data.clear();
        }
        record.data.insert(key.to_string(), value);
        record.expires_at = expires_at;
        Ok(())
    }

    async fn touch(&self, session_id: &str) -> Result<(), SessionError> {
        let now = Utc::now();
        if let Some(mut record) = self.sessions.get_mut(session_id)
            && !record.is_expired(now)
        {
            record.expires_at = now + self.lifetime;
        }
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), SessionError> {
        self.sessions.remove(session_id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, SessionError> {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, record| !record.is_expired(now));
        Ok(before.saturating_sub(self.sessions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemorySessionStore::new(60);

        assert!(!store.exists("s1").await.unwrap());
        assert!(!store.has("s1", "locale").await.unwrap());
        assert_eq!(store.get("s1", "locale").await.unwrap(), None);

        store.put("s1", "locale", "tr".to_string()).await.unwrap();

        assert!(store.exists("s1").await.unwrap());
        assert!(store.has("s1", "locale").await.unwrap());
        assert_eq!(store.get("s1", "locale").await.unwrap().as_deref(), Some("tr"));
        // Other sessions are unaffected
        assert!(!store.has("s2", "locale").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemorySessionStore::new(60);
        store.put("s1", "locale", "tr".to_string()).await.unwrap();
        store.put("s1", "locale", "zh".to_string()).await.unwrap();
        assert_eq!(store.get("s1", "locale").await.unwrap().as_deref(), Some("zh"));
    }

    #[tokio::test]
    async fn test_expired_session_reads_empty() {
        let store = MemorySessionStore::new(0);
        store.put("s1", "locale", "tr".to_string()).await.unwrap();

        assert!(!store.exists("s1").await.unwrap());
        assert!(!store.has("s1", "locale").await.unwrap());
        assert_eq!(store.get("s1", "locale").await.unwrap(), None);
        assert!(store.is_empty(), "expired session should be evicted on read");
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemorySessionStore::new(0);
        store.put("s1", "locale", "tr".to_string()).await.unwrap();
        store.put("s2", "locale", "en".to_string()).await.unwrap();
        assert_eq!(store.len(), 2);

        assert_eq!(store.purge_expired().await.unwrap(), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_destroy() {
        let store = MemorySessionStore::new(60);
        store.put("s1", "locale", "tr".to_string()).await.unwrap();
        store.destroy("s1").await.unwrap();
        assert!(!store.exists("s1").await.unwrap());
    }
}
