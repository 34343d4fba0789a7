use crate::error::Error;
use crate::project_types::Model;
use log::*;
use sea_orm::DatabaseConnection;

pub use entity_api::project_type::{disable, find_by_id, find_enabled};

/// Adds a project type clients can pick. Names are unique; a duplicate
/// surfaces as a conflict.
pub async fn create(db: &DatabaseConnection, project_type_model: Model) -> Result<Model, Error> {
    let name = project_type_model.name.trim().to_string();
    if name.is_empty() {
        warn!("Rejecting Project Type without a name");
        return Err(Error::invalid("Project type name must not be empty"));
    }

    Ok(entity_api::project_type::create(
        db,
        Model {
            name,
            ..project_type_model
        },
    )
    .await?)
}
