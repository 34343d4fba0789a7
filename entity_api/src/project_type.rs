use super::error::Error;
use entity::project_types::{ActiveModel, Column, Entity, Model, DEFAULT_ICON};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, QueryOrder, TryIntoModel,
};

pub async fn create(db: &impl ConnectionTrait, project_type_model: Model) -> Result<Model, Error> {
    debug!("New Project Type Model to be inserted: {project_type_model:?}");

    let now = chrono::Utc::now();
    let icon = if project_type_model.icon.trim().is_empty() {
        DEFAULT_ICON.to_string()
    } else {
        project_type_model.icon
    };

    let active_model: ActiveModel = ActiveModel {
        name: Set(project_type_model.name),
        description: Set(project_type_model.description),
        icon: Set(icon),
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

/// Every project type a client can currently pick, alphabetically.
pub async fn find_enabled(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Enabled.eq(true))
        .order_by_asc(Column::Name)
        .all(db)
        .await?)
}

/// Soft delete: existing projects keep pointing at the type, but it is no
/// longer offered to new projects.
pub async fn disable(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let project_type = find_by_id(db, id).await?;
    debug!("Disabling Project Type: {}", project_type.id);

    let active_model = ActiveModel {
        id: Unchanged(project_type.id),
        name: Unchanged(project_type.name),
        description: Unchanged(project_type.description),
        icon: Unchanged(project_type.icon),
        enabled: Set(false),
        created_at: Unchanged(project_type.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn project_type_model(icon: &str) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            name: "Mobile App".to_owned(),
            description: Some("iOS and Android".to_owned()),
            icon: icon.to_owned(),
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_project_type_model() -> Result<(), Error> {
        let model = project_type_model("📱");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model.clone()]])
            .into_connection();

        let project_type = create(&db, model.clone()).await?;

        assert_eq!(project_type.id, model.id);
        assert_eq!(project_type.icon, "📱");
        Ok(())
    }

    #[tokio::test]
    async fn create_substitutes_the_default_icon_when_blank() -> Result<(), Error> {
        let model = project_type_model(" ");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[project_type_model(DEFAULT_ICON)]])
            .into_connection();

        let _ = create(&db, model).await?;

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(DEFAULT_ICON));
        Ok(())
    }

    #[tokio::test]
    async fn disable_sets_enabled_to_false() -> Result<(), Error> {
        let model = project_type_model("📁");
        let disabled = Model {
            enabled: false,
            ..model.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[model.clone()], [disabled]])
            .into_connection();

        let project_type = disable(&db, model.id).await?;

        assert!(!project_type.enabled);
        Ok(())
    }
}
