//! Remote-store path conventions.
//!
//! Pure string functions — these define the canonical key layout in the
//! hosted realtime database and must stay bit-exact for compatibility with
//! data written by other clients.

/// Collection of provisioned accounts, `{id, username}` per entry.
pub const USERS: &str = "users";

/// Append-only collection of assignments, keyed by store-generated push ids.
pub const ASSIGNMENTS: &str = "pitScoutingAssignments";

/// One survey document per team, full-overwrite semantics.
pub fn survey_result(team_number: &str) -> String {
    format!("pitScoutingResults/{team_number}")
}
