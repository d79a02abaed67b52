//! scoutpit-screens
//!
//! The two view-controllers of the pit-scouting workflow: task assignment
//! and the pit survey itself. Each screen takes its collaborators — the
//! remote store, the authenticated user, the theme, the navigator — as
//! explicit parameters; nothing is read from ambient globals.

pub mod assignment;
pub mod context;
pub mod error;
pub mod phase;
pub mod survey;
