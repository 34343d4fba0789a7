use crate::error::Error;
use crate::projects::Model;
use crate::{users, Id, ProjectFilter};
use entity_api::{project, project_type};
use log::*;
use sea_orm::DatabaseConnection;

pub use entity_api::project::{find_by_id, update_status};

/// Starts a client engagement owned by `user_id`. The project type must exist
/// and be open for new projects.
pub async fn create(
    db: &DatabaseConnection,
    project_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    let name = project_model.name.trim().to_string();
    if name.is_empty() {
        warn!("Rejecting Project without a name for User {user_id}");
        return Err(Error::invalid("Project name must not be empty"));
    }

    let project_type = project_type::find_by_id(db, project_model.project_type_id).await?;
    if !project_type.enabled {
        warn!(
            "Rejecting Project for disabled Project Type {}",
            project_type.id
        );
        return Err(Error::invalid("Project type is not available"));
    }

    Ok(project::create(db, Model { name, ..project_model }, user_id).await?)
}

/// Lists projects visible to `user`: admins see every project matching
/// `filter`, clients only their own.
pub async fn find_by(
    db: &DatabaseConnection,
    user: &users::Model,
    filter: ProjectFilter,
) -> Result<Vec<Model>, Error> {
    let filter = if user.is_admin() {
        filter
    } else {
        ProjectFilter {
            user_id: Some(user.id),
            ..filter
        }
    };

    Ok(project::find_by(db, filter).await?)
}

/// Soft-removes a project. Its answers and report are kept.
pub async fn remove(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(project::disable(db, id).await?)
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
    use crate::project_status::ProjectStatus;
    use crate::project_types;
    use crate::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user(role: Role) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: Id::new_v4(),
            email: "client@intake.local".to_string(),
            first_name: "Casey".to_string(),
            last_name: "Client".to_string(),
            display_name: None,
            password: String::new(),
            role,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn project(user_id: Id, project_type_id: Id) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            name: "Bakery storefront".to_string(),
            description: None,
            user_id,
            project_type_id,
            status: ProjectStatus::Proposed,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn clients_only_list_their_own_projects() -> Result<(), Error> {
        let client = user(Role::Client);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project(client.id, Id::new_v4())]])
            .into_connection();

        find_by(&db, &client, ProjectFilter::default()).await?;

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("\"user_id\" = $1"));
        assert!(log.contains(&client.id.to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn admins_list_every_project() -> Result<(), Error> {
        let admin = user(Role::Admin);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        find_by(&db, &admin, ProjectFilter::default()).await?;

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("\"user_id\" = $"));
        Ok(())
    }

    #[tokio::test]
    async fn projects_cannot_use_a_disabled_type() {
        let client = user(Role::Client);
        let now = chrono::Utc::now();
        let closed = project_types::Model {
            id: Id::new_v4(),
            name: "Legacy".to_string(),
            description: None,
            icon: "📁".to_string(),
            enabled: false,
            created_at: now.into(),
            updated_at: now.into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![closed.clone()]])
            .into_connection();

        let result = create(&db, project(client.id, closed.id), client.id).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }
}
