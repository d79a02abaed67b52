//! Backend speaking the hosted realtime database's wire protocols.
//!
//! Reads and writes go through the JSON REST surface
//! (`GET`/`PUT`/`POST {base}/{path}.json`, plus an optional `auth` query
//! parameter); `POST` answers `{"name": "<generated id>"}`. Subscriptions
//! use the `text/event-stream` endpoint, mirrored into a local JSON tree so
//! every event yields a full snapshot of the subscribed subtree.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreError;
use crate::{sse, RemoteStore, Subscription};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Database root, e.g. `https://<project>.firebasedatabase.app`.
    pub base_url: String,
    /// Database secret or ID token, sent as the `auth` query parameter.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub auth: Option<String>,
}

pub struct FirebaseStore {
    http: reqwest::Client,
    config: FirebaseConfig,
}

impl FirebaseStore {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_matches('/');
        match &self.config.auth {
            Some(auth) => format!("{base}/{path}.json?auth={auth}"),
            None => format!("{base}/{path}.json"),
        }
    }

    fn rejected(path: &str, err: reqwest::Error) -> StoreError {
        StoreError::Rejected {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

#[async_trait]
impl RemoteStore for FirebaseStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let value: Value = self
            .http
            .get(self.endpoint(path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.http
            .put(self.endpoint(path))
            .json(&value)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Self::rejected(path, e))?;
        tracing::info!(%path, "wrote document");
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let resp: PushResponse = self
            .http
            .post(self.endpoint(path))
            .json(&value)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Self::rejected(path, e))?
            .json()
            .await?;
        tracing::info!(%path, id = %resp.name, "appended entry");
        Ok(resp.name)
    }

    fn subscribe(&self, path: &str) -> Subscription {
        let (tx, rx) = watch::channel(Value::Null);
        let http = self.http.clone();
        let url = self.endpoint(path);
        let path = path.to_string();
        let task = tokio::spawn(async move {
            let mut mirror = Value::Null;
            loop {
                match stream_once(&http, &url, &mut mirror, &tx).await {
                    Ok(()) => tracing::debug!(%path, "event stream ended"),
                    Err(e) => tracing::warn!(%path, error = %e, "event stream failed"),
                }
                if tx.is_closed() {
                    return;
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        });
        Subscription::new(rx, Some(task))
    }
}

/// Run one streaming connection until the server or the subscriber ends it,
/// pushing a full snapshot into `tx` for every mutating event.
async fn stream_once(
    http: &reqwest::Client,
    url: &str,
    mirror: &mut Value,
    tx: &watch::Sender<Value>,
) -> Result<(), StoreError> {
    let resp = http
        .get(url)
        .header(ACCEPT, "text/event-stream")
        .send()
        .await?
        .error_for_status()?;

    let mut parser = sse::Parser::new();
    let mut body = resp.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for event in parser.feed(&chunk) {
            if sse::apply(mirror, &event)? {
                tx.send_replace(mirror.clone());
            }
            if tx.is_closed() {
                return Ok(());
            }
        }
    }
    Ok(())
}
