use super::error::Error;
use entity::project_status::ProjectStatus;
use entity::projects::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    Condition, ConnectionTrait, QueryOrder, TryIntoModel,
};

/// Optional narrowing applied when listing projects. `None` fields do not filter.
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    /// Restrict to projects owned by this user
    pub user_id: Option<Id>,
    /// Case-insensitive substring match against name or description
    pub q: Option<String>,
    pub status: Option<ProjectStatus>,
    pub project_type_id: Option<Id>,
    pub enabled: Option<bool>,
}

pub async fn create(
    db: &impl ConnectionTrait,
    project_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    debug!("New Project Model to be inserted: {project_model:?}");

    let now = chrono::Utc::now();

    let active_model: ActiveModel = ActiveModel {
        name: Set(project_model.name),
        description: Set(project_model.description),
        user_id: Set(user_id),
        project_type_id: Set(project_model.project_type_id),
        status: Set(ProjectStatus::Proposed),
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

/// Lists projects matching `filter`, newest first.
pub async fn find_by(db: &impl ConnectionTrait, filter: ProjectFilter) -> Result<Vec<Model>, Error> {
    let mut condition = Condition::all();

    if let Some(user_id) = filter.user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }
    if let Some(status) = filter.status {
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(project_type_id) = filter.project_type_id {
        condition = condition.add(Column::ProjectTypeId.eq(project_type_id));
    }
    if let Some(enabled) = filter.enabled {
        condition = condition.add(Column::Enabled.eq(enabled));
    }
    if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", q.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(pattern)),
        );
    }

    Ok(Entity::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn update_status(
    db: &impl ConnectionTrait,
    id: Id,
    status: ProjectStatus,
) -> Result<Model, Error> {
    let project = find_by_id(db, id).await?;
    debug!("Changing status of Project {} from {} to {status}", project.id, project.status);

    let mut active_model = unchanged(project);
    active_model.status = Set(status);
    active_model.updated_at = Set(chrono::Utc::now().into());

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Soft-removes a project. Its answers and report are retained.
pub async fn disable(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let project = find_by_id(db, id).await?;
    debug!("Disabling Project {}", project.id);

    let mut active_model = unchanged(project);
    active_model.enabled = Set(false);
    active_model.updated_at = Set(chrono::Utc::now().into());

    Ok(active_model.update(db).await?.try_into_model()?)
}

fn unchanged(project: Model) -> ActiveModel {
    ActiveModel {
        id: Unchanged(project.id),
        name: Unchanged(project.name),
        description: Unchanged(project.description),
        user_id: Unchanged(project.user_id),
        project_type_id: Unchanged(project.project_type_id),
        status: Unchanged(project.status),
        enabled: Unchanged(project.enabled),
        created_at: Unchanged(project.created_at),
        updated_at: Unchanged(project.updated_at),
    }
}
