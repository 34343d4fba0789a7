use crate::error::Error;
use crate::question_format::QuestionFormat;
use crate::questions::Model;
use crate::Id;
use entity_api::{project_type, question};
use log::*;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

pub use entity_api::question::{disable, find_by_id, find_enabled_by_project_type, reorder};

/// What an admin supplies when adding a question to a catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub project_type_id: Id,
    /// Ordinal within the catalog; appended after the last question when absent
    pub question_no: Option<i32>,
    pub text: String,
    pub description: Option<String>,
    #[serde(default)]
    pub question_format: QuestionFormat,
    pub next_question_id: Option<Id>,
}

pub async fn create(db: &DatabaseConnection, new_question: NewQuestion) -> Result<Model, Error> {
    let text = new_question.text.trim().to_string();
    if text.is_empty() {
        warn!("Rejecting Question without text");
        return Err(Error::invalid("Question text must not be empty"));
    }

    let project_type = project_type::find_by_id(db, new_question.project_type_id).await?;

    if let Some(next_question_id) = new_question.next_question_id {
        let successor = question::find_by_id(db, next_question_id).await?;
        if successor.project_type_id != project_type.id {
            warn!(
                "Successor {} is not in Project Type {}",
                successor.id, project_type.id
            );
            return Err(Error::invalid(
                "Next question must belong to the same project type",
            ));
        }
    }

    let question_no = match new_question.question_no {
        Some(question_no) if question_no < 1 => {
            return Err(Error::invalid("Question number must be at least 1"));
        }
        Some(question_no) => question_no,
        None => {
            question::max_question_no(db, project_type.id)
                .await?
                .unwrap_or(0)
                + 1
        }
    };

    let now = chrono::Utc::now();
    Ok(question::create(
        db,
        Model {
            id: Id::nil(),
            project_type_id: project_type.id,
            question_no,
            text,
            description: new_question.description,
            question_format: new_question.question_format,
            next_question_id: new_question.next_question_id,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?)
}

/// An admin's edit to an existing question. Absent fields keep their current
/// value; `Some(None)` clears an optional one.
#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub text: Option<String>,
    pub description: Option<Option<String>>,
    pub question_format: Option<QuestionFormat>,
    pub next_question_id: Option<Option<Id>>,
}

/// Applies `changes` to the question. The successor may point anywhere in the
/// same catalog, forwards or backwards, but never at the question itself.
pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    changes: QuestionChanges,
) -> Result<Model, Error> {
    let text = match changes.text.map(|text| text.trim().to_string()) {
        Some(text) if text.is_empty() => {
            return Err(Error::invalid("Question text must not be empty"));
        }
        text => text,
    };

    let mut edited = question::find_by_id(db, id).await?;

    if let Some(Some(next_question_id)) = changes.next_question_id {
        if next_question_id == edited.id {
            return Err(Error::invalid("A question cannot be its own successor"));
        }
        let successor = question::find_by_id(db, next_question_id).await?;
        if successor.project_type_id != edited.project_type_id {
            warn!(
                "Successor {} is not in Project Type {}",
                successor.id, edited.project_type_id
            );
            return Err(Error::invalid(
                "Next question must belong to the same project type",
            ));
        }
    }

    if let Some(text) = text {
        edited.text = text;
    }
    if let Some(description) = changes.description {
        edited.description = description;
    }
    if let Some(question_format) = changes.question_format {
        edited.question_format = question_format;
    }
    if let Some(next_question_id) = changes.next_question_id {
        edited.next_question_id = next_question_id;
    }

    Ok(question::update(db, edited).await?)
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
    use crate::project_types;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn project_type() -> project_types::Model {
        let now = chrono::Utc::now();
        project_types::Model {
            id: Id::new_v4(),
            name: "Web Application".to_string(),
            description: None,
            icon: "🌐".to_string(),
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn question(project_type_id: Id, question_no: i32) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            project_type_id,
            question_no,
            text: "Who are your users?".to_string(),
            description: None,
            question_format: QuestionFormat::Text,
            next_question_id: None,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn new_question(project_type_id: Id) -> NewQuestion {
        NewQuestion {
            project_type_id,
            question_no: None,
            text: "Who are your users?".to_string(),
            description: None,
            question_format: QuestionFormat::Text,
            next_question_id: None,
        }
    }

    #[tokio::test]
    async fn create_appends_after_the_last_ordinal() -> Result<(), Error> {
        let project_type = project_type();
        let last = question(project_type.id, 4);
        let created = question(project_type.id, 5);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_type.clone()]])
            .append_query_results([vec![last]])
            .append_query_results([vec![created.clone()]])
            .into_connection();

        let question = create(&db, new_question(project_type.id)).await?;

        assert_eq!(question, created);
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("Int(Some(5))"));
        Ok(())
    }

    #[tokio::test]
    async fn successor_from_another_catalog_is_invalid() {
        let project_type = project_type();
        let foreign = question(Id::new_v4(), 1);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_type.clone()]])
            .append_query_results([vec![foreign.clone()]])
            .into_connection();

        let result = create(
            &db,
            NewQuestion {
                next_question_id: Some(foreign.id),
                ..new_question(project_type.id)
            },
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    #[tokio::test]
    async fn update_can_point_forward_in_the_catalog() -> Result<(), Error> {
        let project_type_id = Id::new_v4();
        let q1 = question(project_type_id, 1);
        let q2 = question(project_type_id, 2);
        let linked = Model {
            next_question_id: Some(q2.id),
            ..q1.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![q1.clone()], vec![q2.clone()], vec![linked.clone()]])
            .into_connection();

        let updated = update(
            &db,
            q1.id,
            QuestionChanges {
                next_question_id: Some(Some(q2.id)),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.next_question_id, Some(q2.id));
        assert_eq!(updated.text, q1.text);
        Ok(())
    }

    #[tokio::test]
    async fn update_clears_the_successor() -> Result<(), Error> {
        let project_type_id = Id::new_v4();
        let q1 = Model {
            next_question_id: Some(Id::new_v4()),
            ..question(project_type_id, 1)
        };
        let cleared = Model {
            next_question_id: None,
            ..q1.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![q1.clone()], vec![cleared.clone()]])
            .into_connection();

        let updated = update(
            &db,
            q1.id,
            QuestionChanges {
                next_question_id: Some(None),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.next_question_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn a_question_cannot_follow_itself() {
        let q1 = question(Id::new_v4(), 1);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![q1.clone()]])
            .into_connection();

        let result = update(
            &db,
            q1.id,
            QuestionChanges {
                next_question_id: Some(Some(q1.id)),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_a_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = update(
            &db,
            Id::new_v4(),
            QuestionChanges {
                text: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(result.is_err());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn ordinals_start_at_one() {
        let project_type = project_type();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_type.clone()]])
            .into_connection();

        let result = create(
            &db,
            NewQuestion {
                question_no: Some(0),
                ..new_question(project_type.id)
            },
        )
        .await;

        assert!(result.is_err());
    }
}
