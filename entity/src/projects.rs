use crate::project_status::ProjectStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::projects::Model)]
#[sea_orm(schema_name = "intake_platform", table_name = "projects")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    /// The client that owns this project
    #[serde(skip_deserializing)]
    pub user_id: Id,
    #[schema(value_type = Uuid)]
    pub project_type_id: Id,
    #[serde(skip_deserializing)]
    pub status: ProjectStatus,
    #[serde(skip_deserializing)]
    pub enabled: bool,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::project_types::Entity",
        from = "Column::ProjectTypeId",
        to = "super::project_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ProjectTypes,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
    #[sea_orm(has_many = "super::ai_questions::Entity")]
    AiQuestions,
    #[sea_orm(has_one = "super::project_reports::Entity")]
    ProjectReports,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::project_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectTypes.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl Related<super::ai_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiQuestions.def()
    }
}

impl Related<super::project_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
