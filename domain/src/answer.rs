use crate::answers::Model;
use crate::error::Error;
use crate::Id;
use entity_api::answer;
use sea_orm::DatabaseConnection;

pub use entity_api::ai_answer::find_by_project as find_ai_answers_by_project;
pub use entity_api::answer::{delete_by_id, find_by_id};

/// A project's answers to catalog questions, oldest first, optionally only
/// those given to `question_id`.
pub async fn find_by_project(
    db: &DatabaseConnection,
    project_id: Id,
    question_id: Option<Id>,
) -> Result<Vec<Model>, Error> {
    let answers = answer::find_by_project(db, project_id).await?;

    Ok(match question_id {
        Some(question_id) => answers
            .into_iter()
            .filter(|answer| answer.question_id == question_id)
            .collect(),
        None => answers,
    })
}
