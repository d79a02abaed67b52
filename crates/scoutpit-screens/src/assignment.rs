//! Administrative screen assigning pit-scouting tasks to users.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use scoutpit_core::models::{Assignment, User};
use scoutpit_core::paths;
use scoutpit_store::error::StoreError;
use scoutpit_store::{RemoteStore, Subscription};

use crate::context::{CurrentUser, Theme};
use crate::error::ScreenError;
use crate::phase::Phase;

/// Shown instead of the assignments list while none exist.
pub const EMPTY_STATE: &str = "No pit scouting assignments yet.";

const VALIDATION_MESSAGE: &str = "Please select a user and provide a team number.";

/// How one assignment renders in the current-assignments list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AssignmentRow {
    pub primary: String,
    pub secondary: String,
}

pub struct AssignmentScreen {
    store: Arc<dyn RemoteStore>,
    current_user: Option<CurrentUser>,
    theme: Theme,
    users: Subscription,
    assignments: Subscription,
    selected_user: String,
    team_number: String,
    phase: Phase,
}

impl AssignmentScreen {
    /// Mount the screen. Subscribes to the `users` and assignments
    /// collections; the two streams are independent and unordered, and each
    /// update replaces the corresponding snapshot wholesale. Dropping the
    /// screen tears both subscriptions down.
    pub fn mount(
        store: Arc<dyn RemoteStore>,
        current_user: Option<CurrentUser>,
        theme: Theme,
    ) -> Self {
        let users = store.subscribe(paths::USERS);
        let assignments = store.subscribe(paths::ASSIGNMENTS);
        Self {
            store,
            current_user,
            theme,
            users,
            assignments,
            selected_user: String::new(),
            team_number: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// True while a write is in flight; the submit control renders disabled.
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn select_user(&mut self, username: impl Into<String>) {
        self.selected_user = username.into();
    }

    pub fn set_team_number(&mut self, team_number: impl Into<String>) {
        self.team_number = team_number.into();
    }

    pub fn selected_user(&self) -> &str {
        &self.selected_user
    }

    pub fn team_number(&self) -> &str {
        &self.team_number
    }

    /// Every known user, selectable by username.
    pub fn users(&self) -> Vec<User> {
        collection(&self.users.snapshot())
    }

    /// Every existing assignment, from the live snapshot.
    pub fn assignments(&self) -> Vec<Assignment> {
        collection(&self.assignments.snapshot())
    }

    /// The assignments list as rendered rows.
    pub fn assignment_rows(&self) -> Vec<AssignmentRow> {
        self.assignments()
            .into_iter()
            .map(|a| AssignmentRow {
                primary: format!("User: {}", a.user),
                secondary: format!(
                    "Assigned Team: {}, Assigned By: {}",
                    a.team_number, a.assigned_by
                ),
            })
            .collect()
    }

    pub fn empty_state(&self) -> Option<&'static str> {
        if self.assignments().is_empty() {
            Some(EMPTY_STATE)
        } else {
            None
        }
    }

    /// Append one assignment attributed to the current user and return its
    /// generated id. Requires a selected user and a team number, and a
    /// logged-in actor — there is no sentinel attribution. On success the
    /// form clears; on a rejected write it is preserved so the same
    /// submission can be retried.
    pub async fn submit(&mut self) -> Result<String, ScreenError> {
        if self.selected_user.is_empty() || self.team_number.is_empty() {
            return Err(ScreenError::Validation(VALIDATION_MESSAGE.to_string()));
        }
        let Some(current) = &self.current_user else {
            return Err(ScreenError::AuthRequired);
        };

        let record = Assignment {
            user: self.selected_user.clone(),
            team_number: self.team_number.clone(),
            assigned_by: current.username.clone(),
        };

        self.phase = Phase::Submitting;
        let result = async {
            let value = serde_json::to_value(&record).map_err(StoreError::from)?;
            self.store.push(paths::ASSIGNMENTS, value).await
        }
        .await;
        self.phase = Phase::Idle;

        match result {
            Ok(id) => {
                tracing::info!(
                    user = %record.user,
                    team = %record.team_number,
                    %id,
                    "assignment added"
                );
                self.selected_user.clear();
                self.team_number.clear();
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "assignment write failed");
                Err(e.into())
            }
        }
    }
}

/// A hosted collection arrives as `{<key>: <entry>, ...}` (or nothing at
/// all); flatten it to its entries. Malformed entries are skipped rather
/// than failing the whole list.
fn collection<T: DeserializeOwned>(snapshot: &Value) -> Vec<T> {
    match snapshot {
        Value::Object(map) => map
            .values()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}
