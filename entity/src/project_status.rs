use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sales pipeline stage of a client project.
#[derive(
    Debug,
    Clone,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
pub enum ProjectStatus {
    /// Intake submitted, nobody has contacted the client yet
    #[sea_orm(string_value = "proposed")]
    #[default]
    Proposed,
    #[sea_orm(string_value = "called")]
    Called,
    /// Became a paying engagement
    #[sea_orm(string_value = "converted")]
    Converted,
    #[sea_orm(string_value = "trash")]
    Trash,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Proposed => write!(fmt, "proposed"),
            ProjectStatus::Called => write!(fmt, "called"),
            ProjectStatus::Converted => write!(fmt, "converted"),
            ProjectStatus::Trash => write!(fmt, "trash"),
        }
    }
}
