use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A provisioned account. Created and owned by account provisioning;
/// read-only from this system's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    /// Numeric or string depending on how the account was provisioned;
    /// carried opaquely, never interpreted here.
    pub id: serde_json::Value,
    pub username: String,
}
