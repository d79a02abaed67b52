//! The hosted store's `text/event-stream` line protocol.
//!
//! Events arrive as `event: <name>` / `data: <json>` line pairs terminated
//! by a blank line. `put` replaces the subtree named by `data.path`,
//! `patch` merges its children, `keep-alive` carries no payload, and
//! `cancel` / `auth_revoked` end the stream.

use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::tree;

/// One complete server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub data: String,
}

/// Incremental parser over the raw byte stream. Feed chunks as they
/// arrive; events may span chunk boundaries.
#[derive(Default)]
pub struct Parser {
    buffer: Vec<u8>,
    event: Option<String>,
    data: String,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return the events it completed.
    ///
    /// Chunks arrive at arbitrary byte boundaries, possibly mid-character;
    /// bytes are buffered raw and only complete lines are decoded (`\n` is
    /// ASCII, so it never lands inside a multi-byte sequence).
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Event> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(idx) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=idx).collect();
            let line = String::from_utf8_lossy(&raw[..raw.len() - 1]);
            self.line(line.trim_end_matches('\r'), &mut events);
        }
        events
    }

    fn line(&mut self, line: &str, out: &mut Vec<Event>) {
        if line.is_empty() {
            if let Some(name) = self.event.take() {
                out.push(Event {
                    name,
                    data: std::mem::take(&mut self.data),
                });
            }
            self.data.clear();
        } else if let Some(rest) = line.strip_prefix("event:") {
            self.event = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("data:") {
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            // One leading space after the colon is separator, not payload.
            self.data.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
}

#[derive(Deserialize)]
struct Frame {
    path: String,
    data: Value,
}

/// Apply one event to the local mirror of a subscribed subtree. Returns
/// whether the mirror changed.
pub fn apply(mirror: &mut Value, event: &Event) -> Result<bool, StoreError> {
    match event.name.as_str() {
        "put" => {
            let frame: Frame = serde_json::from_str(&event.data)?;
            tree::set_at(mirror, &frame.path, frame.data);
            Ok(true)
        }
        "patch" => {
            let frame: Frame = serde_json::from_str(&event.data)?;
            tree::merge_at(mirror, &frame.path, frame.data);
            Ok(true)
        }
        "keep-alive" => Ok(false),
        "cancel" => Err(StoreError::Stream("cancelled by server".to_string())),
        "auth_revoked" => Err(StoreError::Stream("credentials revoked".to_string())),
        other => {
            tracing::debug!(event = other, "ignoring unknown stream event");
            Ok(false)
        }
    }
}
