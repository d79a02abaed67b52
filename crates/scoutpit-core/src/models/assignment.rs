use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pairs a scouter with the team number they are responsible for inspecting.
/// Appended once per submission under a store-generated id; never updated or
/// deleted by this system.
///
/// Wire field names are fixed by existing data: `assignedBy` is camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assignment {
    pub user: String,
    pub team_number: String,
    #[serde(rename = "assignedBy")]
    #[ts(rename = "assignedBy")]
    pub assigned_by: String,
}
