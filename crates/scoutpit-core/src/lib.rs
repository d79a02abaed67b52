//! scoutpit-core
//!
//! Pure domain types, the compiled-in pit questionnaire, and remote-store
//! path conventions. No I/O — this is the shared vocabulary of the scoutpit
//! system.

pub mod error;
pub mod models;
pub mod paths;
pub mod questionnaire;
