//! Session Purge Task
//!
//! Periodically removes expired sessions from the session store.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::services::SessionStore;
use crate::utils::scheduled_executor::ScheduledTask;

pub struct SessionPurgeTask {
    store: Arc<dyn SessionStore>,
    shutdown: Arc<AtomicBool>,
}

impl SessionPurgeTask {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store, shutdown: Arc::new(AtomicBool::new(false)) }
    }

    /// Get shutdown handle
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    async fn execute(&self) -> Result<(), anyhow::Error> {
        let removed = self.store.purge_expired().await?;
        if removed > 0 {
            info!("Purged {} expired sessions", removed);
        } else {
            debug!("No expired sessions to purge");
        }
        Ok(())
    }
}

impl ScheduledTask for SessionPurgeTask {
    fn run(&self) -> Pin<Box<dyn Future<Output = Result<(), anyhow::Error>> + Send + '_>> {
        Box::pin(async move { self.execute().await })
    }

    fn should_terminate(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
