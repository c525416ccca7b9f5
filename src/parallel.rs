use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Executes analysis tasks with a fixed concurrency limit
///
/// Each scan invocation owns its own pool, so concurrent scans never share a
/// queue. The limit is deliberately small: scans run alongside normal request
/// serving and must not saturate the host.
pub struct AnalysisPool {
    semaphore: Arc<Semaphore>,
}

impl AnalysisPool {
    /// Creates a pool with the specified number of concurrent slots
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Spawns a task once a slot is free and returns its handle
    ///
    /// Waits for a permit before spawning, so at most `max_concurrent` tasks
    /// are in flight at any time.
    pub async fn spawn<F, T>(&self, task: F) -> PooledTask<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        // Semaphore is never closed while the pool is alive.
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .unwrap_or_else(|_| unreachable!("analysis pool semaphore closed"));

        let handle = tokio::spawn(async move {
            let result = task.await;
            drop(permit);
            result
        });

        PooledTask { handle }
    }
}

/// Handle to an in-flight pooled task
///
/// Dropping the handle aborts the task, so work still in flight when a scan
/// times out is cancelled rather than left running to completion.
pub struct PooledTask<T> {
    handle: JoinHandle<T>,
}

impl<T> PooledTask<T> {
    /// Waits for the task, returning `None` if it was cancelled or panicked
    pub async fn join(mut self) -> Option<T> {
        (&mut self.handle).await.ok()
    }
}

impl<T> Drop for PooledTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
