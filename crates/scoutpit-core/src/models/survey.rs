use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::questionnaire::questionnaire;

/// A single questionnaire answer as it appears on the wire: scale answers
/// are JSON numbers, yes/no and open answers are strings, unanswered is
/// the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Answer {
    Scale(f64),
    Text(String),
}

impl Answer {
    /// The wire form of an unanswered question.
    pub fn empty() -> Self {
        Answer::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Answer::Text(t) if t.is_empty())
    }
}

impl From<YesNo> for Answer {
    fn from(choice: YesNo) -> Self {
        Answer::Text(choice.as_str().to_string())
    }
}

/// The two values a `yesno` question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

/// One pit survey per team, stored under the team number. A new submission
/// replaces the whole document — last writer wins, nothing is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PitSurveyRecord {
    pub username: String,
    /// Question id ("0"–"13") to answer. Every id from the questionnaire
    /// appears; unanswered ids map to the empty string.
    pub answers: BTreeMap<String, Answer>,
}

impl PitSurveyRecord {
    /// Build the record written for one team from the in-progress form
    /// state, filling every question the scouter skipped with the empty
    /// string.
    pub fn from_form(username: impl Into<String>, form: &BTreeMap<u8, Answer>) -> Self {
        let answers = questionnaire()
            .iter()
            .map(|q| {
                let answer = form.get(&q.id).cloned().unwrap_or_else(Answer::empty);
                (q.id.to_string(), answer)
            })
            .collect();

        Self {
            username: username.into(),
            answers,
        }
    }
}
