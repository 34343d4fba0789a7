use super::error::{EntityApiErrorKind, Error};
use entity::questions::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, DatabaseConnection, QueryOrder, TransactionTrait, TryIntoModel,
};

pub async fn create(db: &impl ConnectionTrait, question_model: Model) -> Result<Model, Error> {
    debug!("New Question Model to be inserted: {question_model:?}");

    let now = chrono::Utc::now();

    let active_model: ActiveModel = ActiveModel {
        project_type_id: Set(question_model.project_type_id),
        question_no: Set(question_model.question_no),
        text: Set(question_model.text),
        description: Set(question_model.description),
        question_format: Set(question_model.question_format),
        next_question_id: Set(question_model.next_question_id),
        enabled: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(Error::not_found)
}

/// Highest ordinal currently used in a project type's catalog, if any.
pub async fn max_question_no(
    db: &impl ConnectionTrait,
    project_type_id: Id,
) -> Result<Option<i32>, Error> {
    let last = Entity::find()
        .filter(Column::ProjectTypeId.eq(project_type_id))
        .order_by_desc(Column::QuestionNo)
        .one(db)
        .await?;
    Ok(last.map(|question| question.question_no))
}

/// The full catalog of a project type in ordinal order, disabled questions included.
pub async fn find_by_project_type(
    db: &impl ConnectionTrait,
    project_type_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ProjectTypeId.eq(project_type_id))
        .order_by_asc(Column::QuestionNo)
        .all(db)
        .await?)
}

pub async fn find_enabled_by_project_type(
    db: &impl ConnectionTrait,
    project_type_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ProjectTypeId.eq(project_type_id))
        .filter(Column::Enabled.eq(true))
        .order_by_asc(Column::QuestionNo)
        .all(db)
        .await?)
}

/// Lowest-numbered enabled question of the project type whose id is not in `answered`.
pub async fn find_first_unanswered(
    db: &impl ConnectionTrait,
    project_type_id: Id,
    answered: &[Id],
) -> Result<Option<Model>, Error> {
    let mut query = Entity::find()
        .filter(Column::ProjectTypeId.eq(project_type_id))
        .filter(Column::Enabled.eq(true));

    if !answered.is_empty() {
        query = query.filter(Column::Id.is_not_in(answered.iter().copied()));
    }

    Ok(query.order_by_asc(Column::QuestionNo).one(db).await?)
}

pub async fn disable(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let question = find_by_id(db, id).await?;
    debug!("Disabling Question {}", question.id);

    let active_model = ActiveModel {
        id: Unchanged(question.id),
        project_type_id: Unchanged(question.project_type_id),
        question_no: Unchanged(question.question_no),
        text: Unchanged(question.text),
        description: Unchanged(question.description),
        question_format: Unchanged(question.question_format),
        next_question_id: Unchanged(question.next_question_id),
        enabled: Set(false),
        created_at: Unchanged(question.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Saves the editable fields of `question`: text, description, format and
/// successor. Catalog membership, ordinal and enabled state are left alone.
pub async fn update(db: &impl ConnectionTrait, question: Model) -> Result<Model, Error> {
    debug!("Updating Question {}", question.id);

    let active_model = ActiveModel {
        id: Unchanged(question.id),
        project_type_id: Unchanged(question.project_type_id),
        question_no: Unchanged(question.question_no),
        text: Set(question.text),
        description: Set(question.description),
        question_format: Set(question.question_format),
        next_question_id: Set(question.next_question_id),
        enabled: Unchanged(question.enabled),
        created_at: Unchanged(question.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Renumbers a project type's catalog so that `ordered_ids` take ordinals
/// `1..=n` in the given order. Questions of the type that are not listed keep
/// their relative order and follow after the listed ones.
///
/// Every row is first moved to a negative ordinal so that no intermediate
/// state violates the `(project_type_id, question_no)` unique constraint.
pub async fn reorder(
    db: &DatabaseConnection,
    project_type_id: Id,
    ordered_ids: &[Id],
) -> Result<Vec<Model>, Error> {
    let txn = db.begin().await?;

    let catalog = find_by_project_type(&txn, project_type_id).await?;

    if let Some(stranger) = ordered_ids
        .iter()
        .find(|id| !catalog.iter().any(|question| question.id == **id))
    {
        warn!("Question {stranger} does not belong to Project Type {project_type_id}");
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::ValidationError,
        });
    }

    let mut final_order: Vec<Id> = Vec::with_capacity(catalog.len());
    for id in ordered_ids {
        if !final_order.contains(id) {
            final_order.push(*id);
        }
    }
    for question in &catalog {
        if !final_order.contains(&question.id) {
            final_order.push(question.id);
        }
    }

    for (position, id) in final_order.iter().enumerate() {
        set_question_no(&txn, *id, -(position as i32 + 1)).await?;
    }
    for (position, id) in final_order.iter().enumerate() {
        set_question_no(&txn, *id, position as i32 + 1).await?;
    }

    let reordered = find_by_project_type(&txn, project_type_id).await?;
    txn.commit().await?;

    info!(
        "Reordered {} questions of Project Type {project_type_id}",
        reordered.len()
    );
    Ok(reordered)
}

async fn set_question_no(db: &impl ConnectionTrait, id: Id, question_no: i32) -> Result<(), Error> {
    Entity::update_many()
        .col_expr(Column::QuestionNo, Expr::value(question_no))
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
