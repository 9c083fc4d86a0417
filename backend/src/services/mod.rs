pub mod locale_service;
pub mod session_purge_task;
pub mod session_store;

pub use locale_service::{LocaleDecision, LocaleService};
pub use session_purge_task::SessionPurgeTask;
pub use session_store::{MemorySessionStore, SessionError, SessionStore};
