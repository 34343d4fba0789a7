//! Assembles the question/answer history a prompt is built from.

use crate::error::Error;
use crate::{ai_answers, ai_questions, answers, projects, questions, Id};
use entity_api::{ai_answer, ai_question, answer, project_type, question};
use intake_ai::{AskedBy, HistoryEntry, ProjectInfo};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

pub(crate) async fn project_info(
    db: &DatabaseConnection,
    project: &projects::Model,
) -> Result<ProjectInfo, Error> {
    let project_type = project_type::find_by_id(db, project.project_type_id).await?;

    Ok(ProjectInfo {
        name: project.name.clone(),
        description: project.description.clone(),
        project_type: project_type.name,
        project_type_description: project_type.description,
    })
}

/// The catalog half of the interview: used when asking for follow-up questions.
pub(crate) async fn predefined_history(
    db: &DatabaseConnection,
    project: &projects::Model,
) -> Result<Vec<HistoryEntry>, Error> {
    let catalog = question::find_by_project_type(db, project.project_type_id).await?;
    let answers = answer::find_by_project(db, project.id).await?;

    Ok(predefined_entries(catalog, answers))
}

/// Catalog entries followed by the AI follow-ups: used when writing the report.
pub(crate) async fn full_history(
    db: &DatabaseConnection,
    project: &projects::Model,
) -> Result<Vec<HistoryEntry>, Error> {
    let mut history = predefined_history(db, project).await?;

    let ai_questions = ai_question::find_by_project(db, project.id).await?;
    let ai_answers = ai_answer::find_by_project(db, project.id).await?;
    history.extend(ai_entries(ai_questions, ai_answers));

    Ok(history)
}

// Answers arrive oldest first, so later inserts overwrite earlier ones.
fn latest_answers(answers: impl IntoIterator<Item = (Id, String)>) -> HashMap<Id, String> {
    answers.into_iter().collect()
}

fn predefined_entries(
    catalog: Vec<questions::Model>,
    answers: Vec<answers::Model>,
) -> Vec<HistoryEntry> {
    let mut latest = latest_answers(
        answers
            .into_iter()
            .map(|answer| (answer.question_id, answer.text)),
    );

    // Disabled questions still count when the client answered them before
    // they were switched off.
    catalog
        .into_iter()
        .filter_map(|question| {
            if !(question.enabled || latest.contains_key(&question.id)) {
                return None;
            }
            let answer = latest.remove(&question.id);
            Some(HistoryEntry::new(question.text, answer, AskedBy::Predefined))
        })
        .collect()
}

fn ai_entries(
    ai_questions: Vec<ai_questions::Model>,
    ai_answers: Vec<ai_answers::Model>,
) -> Vec<HistoryEntry> {
    let mut latest = latest_answers(
        ai_answers
            .into_iter()
            .map(|answer| (answer.ai_question_id, answer.text)),
    );

    ai_questions
        .into_iter()
        .map(|question| {
            let answer = latest.remove(&question.id);
            HistoryEntry::new(question.text, answer, AskedBy::Ai)
        })
        .collect()
}
