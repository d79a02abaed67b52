//! Data-entry screen recording a team's pre-match pit inspection.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use scoutpit_core::models::{Answer, PitSurveyRecord, YesNo};
use scoutpit_core::paths;
use scoutpit_core::questionnaire::{question, questionnaire, QuestionKind};
use scoutpit_store::error::StoreError;
use scoutpit_store::RemoteStore;

use crate::context::{CurrentUser, Navigator, Route, Theme};
use crate::error::ScreenError;
use crate::phase::Phase;

/// The input widget a question renders with, resolved from its kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(tag = "widget", rename_all = "snake_case")]
#[ts(export)]
pub enum Widget {
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    YesNoSelect,
    MultilineText,
}

impl From<QuestionKind> for Widget {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Scale(range) => Widget::Slider {
                min: range.min,
                max: range.max,
                step: range.step,
                default: range.default,
            },
            QuestionKind::YesNo => Widget::YesNoSelect,
            QuestionKind::Open => Widget::MultilineText,
        }
    }
}

/// One rendered form row: the prompt, its widget, and the answer so far
/// (empty until the scouter touches it).
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct FormField {
    pub id: u8,
    pub prompt: &'static str,
    pub widget: Widget,
    pub answer: Answer,
}

pub struct PitSurveyScreen {
    store: Arc<dyn RemoteStore>,
    current_user: CurrentUser,
    theme: Theme,
    /// Team number handed over by navigation (opened from an assignment);
    /// locks the manual field when present.
    entry_team: Option<String>,
    team_number: String,
    form: BTreeMap<u8, Answer>,
    phase: Phase,
}

impl PitSurveyScreen {
    /// Mount the screen. Requires an authenticated user: without one the
    /// navigator is sent to the login route and the screen never comes up —
    /// no store access is attempted.
    pub fn mount(
        store: Arc<dyn RemoteStore>,
        current_user: Option<CurrentUser>,
        theme: Theme,
        navigator: &dyn Navigator,
        entry_team: Option<String>,
    ) -> Result<Self, ScreenError> {
        let Some(current_user) = current_user else {
            tracing::warn!("pit survey opened without a logged-in user");
            navigator.redirect(Route::Login);
            return Err(ScreenError::AuthRequired);
        };

        let team_number = entry_team.clone().unwrap_or_default();
        Ok(Self {
            store,
            current_user,
            theme,
            entry_team,
            team_number,
            form: BTreeMap::new(),
            phase: Phase::Idle,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn username(&self) -> &str {
        &self.current_user.username
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// The storage key the submission will use.
    pub fn team_number(&self) -> &str {
        &self.team_number
    }

    /// Whether the manual team-number field renders. Only when navigation
    /// supplied no team.
    pub fn team_number_editable(&self) -> bool {
        self.entry_team.is_none()
    }

    /// Manual team-number entry; ignored when navigation supplied the team.
    pub fn set_team_number(&mut self, team_number: impl Into<String>) {
        if self.entry_team.is_some() {
            return;
        }
        self.team_number = team_number.into();
    }

    /// Move a scale question's slider. The value is clamped to the
    /// question's range and snapped to its step, matching what the bounded
    /// widget can produce.
    pub fn set_scale(&mut self, id: u8, value: f64) -> Result<(), ScreenError> {
        let q = question(id)?;
        let QuestionKind::Scale(range) = q.kind else {
            return Err(ScreenError::WidgetMismatch { id });
        };
        self.form.insert(id, Answer::Scale(range.snap(value)));
        Ok(())
    }

    /// Pick one of the two values of a yes/no question.
    pub fn choose(&mut self, id: u8, choice: YesNo) -> Result<(), ScreenError> {
        let q = question(id)?;
        if !matches!(q.kind, QuestionKind::YesNo) {
            return Err(ScreenError::WidgetMismatch { id });
        }
        self.form.insert(id, choice.into());
        Ok(())
    }

    /// Edit an open question's free text.
    pub fn set_text(&mut self, id: u8, text: impl Into<String>) -> Result<(), ScreenError> {
        let q = question(id)?;
        if !matches!(q.kind, QuestionKind::Open) {
            return Err(ScreenError::WidgetMismatch { id });
        }
        self.form.insert(id, Answer::Text(text.into()));
        Ok(())
    }

    /// The questionnaire as rendered rows, in table order.
    pub fn form(&self) -> Vec<FormField> {
        questionnaire()
            .iter()
            .map(|q| FormField {
                id: q.id,
                prompt: q.prompt,
                widget: Widget::from(q.kind),
                answer: self.form.get(&q.id).cloned().unwrap_or_else(Answer::empty),
            })
            .collect()
    }

    /// The submit control is enabled only with a team number and no write
    /// in flight.
    pub fn can_submit(&self) -> bool {
        !self.team_number.is_empty() && self.phase == Phase::Idle
    }

    /// Write the survey for the effective team number, fully overwriting
    /// any prior survey for that team. The stored answers map covers every
    /// question id; skipped questions are stored as the empty string. The
    /// form is not reset and the screen does not navigate away.
    ///
    /// Concurrent submissions for the same team from different clients race
    /// at the store and the last writer wins; no optimistic concurrency
    /// check is made. Acceptable for this low-contention manual workflow,
    /// but a known limitation.
    pub async fn submit(&mut self) -> Result<(), ScreenError> {
        if self.team_number.is_empty() {
            return Err(ScreenError::Validation(
                "Enter a team number before submitting.".to_string(),
            ));
        }

        let record = PitSurveyRecord::from_form(self.current_user.username.clone(), &self.form);

        self.phase = Phase::Submitting;
        let result = async {
            let value = serde_json::to_value(&record).map_err(StoreError::from)?;
            self.store
                .set(&paths::survey_result(&self.team_number), value)
                .await
        }
        .await;
        self.phase = Phase::Idle;

        match result {
            Ok(()) => {
                tracing::info!(team = %self.team_number, "pit survey submitted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(team = %self.team_number, error = %e, "pit survey write failed");
                Err(e.into())
            }
        }
    }
}
