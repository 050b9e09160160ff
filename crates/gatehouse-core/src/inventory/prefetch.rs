//! Write-once prefetch cell for inventory snapshots.
//!
//! A session starts one background fetch per snapshot at attach time.
//! The task runs to completion without cancellation and publishes its
//! result into a write-once cell; after publication the snapshot is
//! read-only and shared. An accessor that arrives before the background
//! fetch lands performs its own on-demand fetch instead of polling.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

/// A snapshot slot populated by a one-shot background fetch.
///
/// Single writer, multiple readers, no mutation after publish. The
/// first value to land wins; later writers are dropped.
#[derive(Debug)]
pub struct Prefetch<T> {
    cell: Arc<OnceCell<Arc<T>>>,
}

impl<T> Clone for Prefetch<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Send + Sync + 'static> Prefetch<T> {
    /// Start the background fetch and return the readable slot.
    pub fn spawn<F>(fetch: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let cell = Arc::new(OnceCell::new());
        let writer = Arc::clone(&cell);
        tokio::spawn(async move {
            let value = Arc::new(fetch.await);
            // An accessor may have populated the cell on demand first.
            let _ = writer.set(value);
        });
        Self { cell }
    }

    /// Return the snapshot, fetching on demand if the background task
    /// has not landed yet.
    ///
    /// Concurrent first accesses block on a single in-flight fetch.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let value = self
            .cell
            .get_or_init(|| async { Arc::new(fetch().await) })
            .await;
        Arc::clone(value)
    }

    /// Return the snapshot if it has already been published.
    pub fn try_get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }
}

// =============================================================================
// Tests
// =============================================================================
