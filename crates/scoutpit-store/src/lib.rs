//! scoutpit-store
//!
//! The remote store seam. The hosted realtime database is modelled as a
//! key-path-addressable JSON tree with full-overwrite sets, push-id appends,
//! and live snapshot subscriptions. [`RemoteStore`] is the trait the screens
//! depend on; [`memory::MemoryStore`] backs tests and local development,
//! [`firebase::FirebaseStore`] speaks the hosted store's wire protocol.

pub mod error;
pub mod firebase;
pub mod memory;
pub mod sse;
pub mod tree;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreError;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read the value at `path`. `None` when nothing is stored there.
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Full overwrite of the value at `path`, discarding any prior content
    /// not included in the new value.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Append `value` under a store-generated child key of `path`.
    /// Returns the generated key.
    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError>;

    /// Live subscription to `path`: a push-based stream of full snapshots
    /// of the value at that path, one per change.
    fn subscribe(&self, path: &str) -> Subscription;
}

/// Handle to one live subscription. Dropping it (or calling
/// [`unsubscribe`](Subscription::unsubscribe)) tears the stream down.
pub struct Subscription {
    rx: watch::Receiver<Value>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl Subscription {
    /// Assemble a subscription from a snapshot channel and an optional
    /// background task that feeds it. Backends outside this crate can use
    /// this to satisfy [`RemoteStore::subscribe`].
    pub fn new(rx: watch::Receiver<Value>, task: Option<tokio::task::JoinHandle<()>>) -> Self {
        Self { rx, task }
    }

    /// The most recent full snapshot. `Value::Null` while nothing is stored
    /// at the path, or before a streaming backend has delivered its first
    /// frame.
    pub fn snapshot(&self) -> Value {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot to arrive.
    pub async fn changed(&mut self) -> Result<(), StoreError> {
        self.rx
            .changed()
            .await
            .map_err(|_| StoreError::SubscriptionClosed)
    }

    /// Explicit teardown; equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
