//! In-memory backend with the same observable semantics as the hosted
//! store: full-overwrite sets, generated-id appends, and snapshot
//! subscriptions. Backs the test suites and local development.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::StoreError;
use crate::{tree, RemoteStore, Subscription};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    root: Value,
    watchers: HashMap<String, watch::Sender<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test panicked mid-write;
        // the tree itself is still coherent JSON.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, path: &str, value: Value) {
        let mut inner = self.locked();
        tree::set_at(&mut inner.root, path, value);
        inner
            .watchers
            .retain(|_, sender| sender.receiver_count() > 0);
        for (watched, sender) in &inner.watchers {
            let snapshot = tree::get_at(&inner.root, watched)
                .cloned()
                .unwrap_or(Value::Null);
            sender.send_replace(snapshot);
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.locked();
        Ok(tree::get_at(&inner.root, path)
            .filter(|v| !v.is_null())
            .cloned())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.write(path, value);
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let child = format!("{}/{id}", path.trim_matches('/'));
        self.write(&child, value);
        Ok(id)
    }

    fn subscribe(&self, path: &str) -> Subscription {
        let mut inner = self.locked();
        let current = tree::get_at(&inner.root, path)
            .cloned()
            .unwrap_or(Value::Null);
        let rx = match inner.watchers.get(path) {
            Some(sender) => sender.subscribe(),
            None => {
                let (tx, rx) = watch::channel(current);
                inner.watchers.insert(path.to_string(), tx);
                rx
            }
        };
        Subscription::new(rx, None)
    }
}
