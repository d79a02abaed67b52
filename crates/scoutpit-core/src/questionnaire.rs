//! The pit-inspection questionnaire.
//!
//! Fixed at build time. This table is the single source of truth for which
//! questions are asked, the order they render in, and which input widget
//! each one gets. Question ids are stable — they are the keys of every
//! stored `answers` map, so renumbering would orphan existing survey data.

use std::sync::LazyLock;

use serde::Serialize;
use ts_rs::TS;

use crate::error::CoreError;

/// Number of questions in the fixed table.
pub const QUESTION_COUNT: usize = 14;

/// Valid range for a scale question's slider.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Value the slider shows before the scouter touches it.
    pub default: f64,
}

impl ScaleRange {
    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        let offset = value - self.min;
        let remainder = offset % self.step;
        // Allow floating point tolerance
        remainder < 1e-9 || (self.step - remainder) < 1e-9
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamp to the range and round to the nearest step, as the slider
    /// widget does. Snapped values always satisfy [`contains`](Self::contains).
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let steps = ((clamped - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

/// Selects the input widget a question renders with.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    /// Continuous slider bound to the given range.
    Scale(ScaleRange),
    /// Two-valued choice, empty until chosen.
    #[serde(rename = "yesno")]
    YesNo,
    /// Multi-line free text.
    Open,
}

#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u8,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

/// Climb height is the one scale question: 1.0–2.0 meters in 0.05 steps.
pub const CLIMB_RANGE: ScaleRange = ScaleRange {
    min: 1.0,
    max: 2.0,
    step: 0.05,
    default: 1.0,
};

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let entries: [(&'static str, QuestionKind); QUESTION_COUNT] = [
        ("Maximum climb height (meters)", QuestionKind::Scale(CLIMB_RANGE)),
        (
            "Does the climb interfere with another team's climb?",
            QuestionKind::YesNo,
        ),
        ("Can the robot score on L1?", QuestionKind::YesNo),
        ("Can the robot score on L2?", QuestionKind::YesNo),
        ("Can the robot score on L3?", QuestionKind::YesNo),
        ("Can the robot score on L4?", QuestionKind::YesNo),
        ("Can the robot intake from the floor?", QuestionKind::YesNo),
        ("Can the robot intake from the feeder?", QuestionKind::YesNo),
        (
            "Can the robot score algae in the processor?",
            QuestionKind::YesNo,
        ),
        ("Can the robot score algae in the net?", QuestionKind::YesNo),
        (
            "Does the robot leave the starting zone in autonomous?",
            QuestionKind::YesNo,
        ),
        ("Can you dislodge algae from the reef?", QuestionKind::YesNo),
        ("Describe each autonomous routine", QuestionKind::Open),
        ("Other general notes", QuestionKind::Open),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(|(id, (prompt, kind))| Question {
            id: id as u8,
            prompt,
            kind,
        })
        .collect()
});

/// The full questionnaire, in render order.
pub fn questionnaire() -> &'static [Question] {
    &QUESTIONS
}

/// Look up a question by its stable id.
pub fn question(id: u8) -> Result<&'static Question, CoreError> {
    QUESTIONS
        .get(id as usize)
        .ok_or(CoreError::UnknownQuestion(id))
}
