//! Collaborators injected into the screens: the authenticated actor, the
//! cosmetic theme, and the navigation seam. All three are produced by the
//! embedding shell; this crate only consumes them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The externally supplied authenticated actor. Absence means "not logged
/// in" — session management lives upstream.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrentUser {
    pub username: String,
}

/// Cosmetic only; never consulted for behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The colors a theme renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#fff",
                text: "#000",
                accent: "#012265",
            },
            Theme::Dark => Palette {
                background: "#333",
                text: "#fff",
                accent: "#d4af37",
            },
        }
    }
}

/// Destinations a screen can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
}

/// Routing seam owned by the embedding shell.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: Route);
}
