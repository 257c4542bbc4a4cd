//! Request Deduplication
//!
//! `SingleFlight` collapses concurrent calls for the same key into one
//! execution. The first caller for a key starts its future on a detached
//! task; that caller and everyone arriving while the task runs wait for and
//! receive a clone of its result, errors included. The task outlives any
//! caller, so dropping the first caller does not cancel the work or fail the
//! others. Nothing is remembered once the task finishes, so a later call for
//! the key starts a fresh execution.

use crate::error::{CacheError, Result};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

type Slot<T> = watch::Receiver<Option<Result<T>>>;
type Calls<T> = Arc<DashMap<String, Slot<T>>>;

pub struct SingleFlight<T> {
    calls: Calls<T>,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            calls: Arc::new(DashMap::new()),
        }
    }

    /// Runs `fut` unless a call for `key` is already in flight, in which case
    /// the in-flight result is awaited instead.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn do_call<F>(&self, key: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let rx = match self.calls.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                tracing::debug!("Joining in-flight call for key {}", key);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let (tx, rx) = watch::channel(None);
                entry.insert(rx.clone());

                // Deregisters on every exit path. If the task panics the
                // sender is dropped and waiters see the channel close.
                let guard = CallGuard {
                    calls: self.calls.clone(),
                    key: key.to_string(),
                };
                tokio::spawn(async move {
                    let result = fut.await;
                    tx.send_replace(Some(result));
                    drop(guard);
                });
                rx
            }
        };

        wait_for_result(rx, key).await
    }

    /// Number of keys with a call currently in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.len()
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

async fn wait_for_result<T: Clone>(mut rx: Slot<T>, key: &str) -> Result<T> {
    match rx.wait_for(Option::is_some).await {
        Ok(slot) => match &*slot {
            Some(result) => result.clone(),
            None => Err(CacheError::Interrupted(key.to_string())),
        },
        Err(_) => Err(CacheError::Interrupted(key.to_string())),
    }
}

struct CallGuard<T> {
    calls: Calls<T>,
    key: String,
}

impl<T> Drop for CallGuard<T> {
    fn drop(&mut self) {
        self.calls.remove(&self.key);
    }
}
