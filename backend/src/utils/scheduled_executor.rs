//! Scheduled Executor
//!
//! Runs a [`ScheduledTask`] on a fixed interval in a background tokio task
//! until the task asks to terminate.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// A unit of periodic work
pub trait ScheduledTask: Send + Sync + 'static {
    fn run(&self) -> Pin<Box<dyn Future<Output = Result<(), anyhow::Error>> + Send + '_>>;

    fn should_terminate(&self) -> bool {
        false
    }
}

pub struct ScheduledExecutor {
    name: String,
    interval: Duration,
}

impl ScheduledExecutor {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self { name: name.into(), interval }
    }

    /// Spawn the task loop. The first run happens one interval after spawning.
    pub fn spawn<T: ScheduledTask>(self, task: Arc<T>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Scheduled task '{}' started (interval: {:?})", self.name, self.interval);

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately on the first tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if task.should_terminate() {
                    info!("Scheduled task '{}' terminated", self.name);
                    break;
                }

                debug!("Running scheduled task '{}'", self.name);
                if let Err(e) = task.run().await {
                    warn!("Scheduled task '{}' failed: {:?}", self.name, e);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTask {
        runs: AtomicUsize,
        limit: usize,
    }

    impl ScheduledTask for CountingTask {
        fn run(&self) -> Pin<Box<dyn Future<Output = Result<(), anyhow::Error>> + Send + '_>> {
            Box::pin(async move {
                self.runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }

        fn should_terminate(&self) -> bool {
            self.runs.load(Ordering::SeqCst) >= self.limit
        }
    }

    #[tokio::test]
    async fn test_runs_until_terminated() {
        let task = Arc::new(CountingTask { runs: AtomicUsize::new(0), limit: 3 });
        let handle =
            ScheduledExecutor::new("counting", Duration::from_millis(5)).spawn(Arc::clone(&task));

        handle.await.unwrap();
        assert_eq!(task.runs.load(Ordering::SeqCst), 3);
    }
}
