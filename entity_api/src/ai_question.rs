use super::error::Error;
use entity::ai_questions::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, PaginatorTrait, QueryOrder};

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(Error::not_found)
}

/// A project's synthesized questions in ordinal order.
pub async fn find_by_project(db: &impl ConnectionTrait, project_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ProjectId.eq(project_id))
        .order_by_asc(Column::QuestionNo)
        .all(db)
        .await?)
}

/// Whether a synthesis batch has ever been persisted for the project.
pub async fn exists_for_project(db: &impl ConnectionTrait, project_id: Id) -> Result<bool, Error> {
    let count = Entity::find()
        .filter(Column::ProjectId.eq(project_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Lowest-numbered AI question of the project whose id is not in `answered`.
pub async fn find_first_unanswered(
    db: &impl ConnectionTrait,
    project_id: Id,
    answered: &[Id],
) -> Result<Option<Model>, Error> {
    let mut query = Entity::find().filter(Column::ProjectId.eq(project_id));

    if !answered.is_empty() {
        query = query.filter(Column::Id.is_not_in(answered.iter().copied()));
    }

    Ok(query.order_by_asc(Column::QuestionNo).one(db).await?)
}

/// Persists a synthesis batch for `project_id`: one row per entry of `texts`
/// with ordinals `1..=n`, each row's `next_question_id` pointing at the row
/// with the next ordinal and the last row terminating the chain.
///
/// The whole batch is a single multi-row `INSERT`, so either every row lands
/// or none do. If another batch already exists for the project the
/// `(project_id, question_no)` unique constraint rejects the statement and a
/// `RecordConflict` error is returned.
pub async fn create_batch(
    db: &impl ConnectionTrait,
    project_id: Id,
    texts: Vec<String>,
) -> Result<Vec<Model>, Error> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let now: DateTimeWithTimeZone = chrono::Utc::now().into();
    let ids: Vec<Id> = texts.iter().map(|_| Id::new_v4()).collect();

    let batch: Vec<Model> = texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| Model {
            id: ids[index],
            project_id,
            question_no: index as i32 + 1,
            text,
            description: None,
            next_question_id: ids.get(index + 1).copied(),
            created_at: now,
            updated_at: now,
        })
        .collect();

    let active_models = batch.iter().cloned().map(|model| ActiveModel {
        id: Set(model.id),
        project_id: Set(model.project_id),
        question_no: Set(model.question_no),
        text: Set(model.text),
        description: Set(model.description),
        next_question_id: Set(model.next_question_id),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    });

    Entity::insert_many(active_models)
        .exec_without_returning(db)
        .await?;

    info!(
        "Persisted {} AI questions for Project {project_id}",
        batch.len()
    );
    Ok(batch)
}
