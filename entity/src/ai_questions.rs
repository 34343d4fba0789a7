//! SeaORM Entity for follow-up questions synthesized by the language model.
//! A project gets a single batch, linked both by `question_no` and by
//! `next_question_id`.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::ai_questions::Model)]
#[sea_orm(schema_name = "intake_platform", table_name = "ai_questions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = Uuid)]
    pub project_id: Id,

    /// 1-based position within the project's batch, unique per project
    pub question_no: i32,

    pub text: String,

    pub description: Option<String>,

    #[schema(value_type = Option<Uuid>)]
    pub next_question_id: Option<Id>,

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
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Projects,

    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::NextQuestionId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    NextQuestion,

    #[sea_orm(has_many = "super::ai_answers::Entity")]
    AiAnswers,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::ai_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
