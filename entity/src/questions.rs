//! SeaORM Entity for the predefined question catalog.
//! Each row is a template shared by every project of its project type.

use crate::question_format::QuestionFormat;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::questions::Model)]
#[sea_orm(schema_name = "intake_platform", table_name = "questions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = Uuid)]
    pub project_type_id: Id,

    /// Ordinal position within the project type, unique per project type
    pub question_no: i32,

    pub text: String,

    /// Optional helper text shown beneath the question
    pub description: Option<String>,

    #[serde(default)]
    pub question_format: QuestionFormat,

    /// Statically configured successor; null marks the end of the chain
    #[schema(value_type = Option<Uuid>)]
    pub next_question_id: Option<Id>,

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
        belongs_to = "super::project_types::Entity",
        from = "Column::ProjectTypeId",
        to = "super::project_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ProjectTypes,

    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::NextQuestionId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    NextQuestion,

    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
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

impl ActiveModelBehavior for ActiveModel {}
