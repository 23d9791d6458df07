use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Bounded pool for fire-and-forget work (breaker probes, verdict warming).
///
/// Tasks are best-effort: when every permit is taken the task is dropped
/// rather than queued, and accepted tasks may outlive the request that
/// spawned them.
#[derive(Debug, Clone)]
pub struct BackgroundTaskPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl BackgroundTaskPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Spawns `task` if a permit is free. Returns whether it was accepted.
    pub fn try_spawn<F>(&self, label: &'static str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match Arc::clone(&self.permits).try_acquire_owned() {
            Ok(permit) => {
                tokio::spawn(async move {
                    task.await;
                    drop(permit);
                });
                true
            }
            Err(_) => {
                debug!(
                    task = label,
                    capacity = self.capacity,
                    "Background pool saturated, skipping task"
                );
                false
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }
}
