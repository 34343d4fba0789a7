use super::error::Error;
use entity::answers::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, QueryOrder, TryIntoModel};

pub async fn create(
    db: &impl ConnectionTrait,
    answer_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    debug!(
        "New Answer to Question {} for Project {}",
        answer_model.question_id, answer_model.project_id
    );

    let now = chrono::Utc::now();

    let active_model: ActiveModel = ActiveModel {
        project_id: Set(answer_model.project_id),
        question_id: Set(answer_model.question_id),
        user_id: Set(user_id),
        text: Set(answer_model.text),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(Error::not_found)
}

/// All answers recorded for a project, oldest first.
pub async fn find_by_project(db: &impl ConnectionTrait, project_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ProjectId.eq(project_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Ids of the predefined questions that have at least one answer in the project.
pub async fn find_answered_question_ids(
    db: &impl ConnectionTrait,
    project_id: Id,
) -> Result<Vec<Id>, Error> {
    let mut ids: Vec<Id> = find_by_project(db, project_id)
        .await?
        .into_iter()
        .map(|answer| answer.question_id)
        .collect();
    ids.sort();
    ids.dedup();
    Ok(ids)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found());
    }
    Ok(())
}
