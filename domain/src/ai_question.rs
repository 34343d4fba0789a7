use crate::ai_questions::Model;
use crate::error::Error;
use crate::Id;
use entity_api::{ai_answer, ai_question};
use sea_orm::DatabaseConnection;
use serde::Serialize;

pub use entity_api::ai_question::find_by_id;

/// An AI question as shown on the admin monitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiQuestionStatus {
    #[serde(flatten)]
    pub question: Model,
    pub answered: bool,
}

/// The project's synthesized questions in ordinal order, each flagged with
/// whether the client has answered it.
pub async fn find_by_project_with_status(
    db: &DatabaseConnection,
    project_id: Id,
) -> Result<Vec<AiQuestionStatus>, Error> {
    let questions = ai_question::find_by_project(db, project_id).await?;
    let answered = ai_answer::find_answered_ai_question_ids(db, project_id).await?;

    Ok(questions
        .into_iter()
        .map(|question| AiQuestionStatus {
            answered: answered.contains(&question.id),
            question,
        })
        .collect())
}
