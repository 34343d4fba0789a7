use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the client is expected to answer a predefined question.
#[derive(
    Debug,
    Clone,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "question_format")]
pub enum QuestionFormat {
    #[sea_orm(string_value = "text")]
    #[default]
    Text,
    /// Multiple choice
    #[sea_orm(string_value = "mcq")]
    Mcq,
    /// Voice input, transcribed client-side
    #[sea_orm(string_value = "mic")]
    Mic,
}

impl std::fmt::Display for QuestionFormat {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionFormat::Text => write!(fmt, "text"),
            QuestionFormat::Mcq => write!(fmt, "mcq"),
            QuestionFormat::Mic => write!(fmt, "mic"),
        }
    }
}
