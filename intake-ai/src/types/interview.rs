//! The project and question/answer data a prompt is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who asked a question in the interview history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AskedBy {
    /// An admin-authored catalog question
    Predefined,
    /// A follow-up question the model synthesized
    Ai,
}

impl fmt::Display for AskedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskedBy::Predefined => write!(f, "predefined"),
            AskedBy::Ai => write!(f, "ai"),
        }
    }
}

/// A question shown to the client and the latest answer they gave, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question_text: String,
    pub answer_text: Option<String>,
    pub asked_by: AskedBy,
}

impl HistoryEntry {
    pub fn new(question_text: impl Into<String>, answer_text: Option<String>, asked_by: AskedBy) -> Self {
        Self {
            question_text: question_text.into(),
            answer_text,
            asked_by,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer_text
            .as_deref()
            .is_some_and(|answer| !answer.trim().is_empty())
    }
}

/// Project metadata embedded at the top of every prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub description: Option<String>,
    pub project_type: String,
    pub project_type_description: Option<String>,
}
