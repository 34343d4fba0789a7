use super::error::Error;
use entity::ai_answers::{ActiveModel, Column, Entity, Model};
use entity::{ai_questions, Id};
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, JoinType, QueryOrder, QuerySelect,
    TryIntoModel,
};

pub async fn create(
    db: &impl ConnectionTrait,
    ai_answer_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    debug!("New AI Answer to AI Question {}", ai_answer_model.ai_question_id);

    let now = chrono::Utc::now();

    let active_model: ActiveModel = ActiveModel {
        ai_question_id: Set(ai_answer_model.ai_question_id),
        user_id: Set(user_id),
        text: Set(ai_answer_model.text),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Every AI answer given within a project, oldest first.
pub async fn find_by_project(db: &impl ConnectionTrait, project_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .join(JoinType::InnerJoin, entity::ai_answers::Relation::AiQuestions.def())
        .filter(ai_questions::Column::ProjectId.eq(project_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Ids of the AI questions that have at least one answer in the project.
pub async fn find_answered_ai_question_ids(
    db: &impl ConnectionTrait,
    project_id: Id,
) -> Result<Vec<Id>, Error> {
    let mut ids: Vec<Id> = find_by_project(db, project_id)
        .await?
        .into_iter()
        .map(|answer| answer.ai_question_id)
        .collect();
    ids.sort();
    ids.dedup();
    Ok(ids)
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn find_by_project_joins_through_ai_questions() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let project_id = Id::new_v4();
        let answers = find_by_project(&db, project_id).await?;
        assert!(answers.is_empty());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("INNER JOIN"));
        assert!(log.contains("ai_questions"));
        assert!(log.contains(&project_id.to_string()));
        Ok(())
    }
}
