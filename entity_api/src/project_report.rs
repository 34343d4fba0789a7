use super::error::Error;
use entity::project_reports::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, DatabaseConnection, QueryOrder,
    TransactionTrait, TryIntoModel,
};

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(Error::not_found)
}

/// The project's report, if one has been generated.
pub async fn find_by_project(
    db: &impl ConnectionTrait,
    project_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::ProjectId.eq(project_id))
        .order_by_asc(Column::CreatedAt)
        .one(db)
        .await?)
}

/// Inserts the first report for a project. A second insert for the same
/// project fails with `RecordConflict`.
pub async fn create(db: &impl ConnectionTrait, project_id: Id, report: String) -> Result<Model, Error> {
    debug!("New Project Report for Project {project_id} ({} bytes)", report.len());

    let now = chrono::Utc::now();

    let active_model: ActiveModel = ActiveModel {
        project_id: Set(project_id),
        report: Set(report),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Deletes any existing report for the project and inserts `report` in its
/// place, atomically.
pub async fn replace(db: &DatabaseConnection, project_id: Id, report: String) -> Result<Model, Error> {
    let txn = db.begin().await?;

    let deleted = Entity::delete_many()
        .filter(Column::ProjectId.eq(project_id))
        .exec(&txn)
        .await?;
    debug!(
        "Deleted {} prior report(s) for Project {project_id}",
        deleted.rows_affected
    );

    let created = create(&txn, project_id, report).await?;
    txn.commit().await?;

    Ok(created)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found());
    }
    Ok(())
}
