//! Deciding what the client is asked next.
//!
//! Polling uses one rule: the lowest-numbered unanswered enabled catalog
//! question, then the lowest-numbered unanswered AI question, then (once per
//! project) a freshly synthesized batch, then completion. Submitting an answer
//! first tries the answered question's successor pointer and falls back to the
//! polling rule when there is no usable successor.

use super::{history, Intake};
use crate::error::Error;
use crate::{ai_answers, ai_questions, answers, projects, questions, Id};
use entity_api::error::EntityApiErrorKind;
use entity_api::{ai_answer, ai_question, answer, question};
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Predefined,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "question_type", content = "question", rename_all = "lowercase")]
pub enum NextQuestion {
    Predefined(questions::Model),
    Ai(ai_questions::Model),
}

impl NextQuestion {
    pub fn id(&self) -> Id {
        match self {
            NextQuestion::Predefined(question) => question.id,
            NextQuestion::Ai(question) => question.id,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            NextQuestion::Predefined(_) => QuestionType::Predefined,
            NextQuestion::Ai(_) => QuestionType::Ai,
        }
    }
}

/// Where a project's interview stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Traversal {
    /// Show this question next.
    Question(NextQuestion),
    /// Another request is asking the model for follow-up questions; poll again.
    Synthesizing,
    /// Nothing left to ask.
    Completed,
}

/// A client's answer to the question identified by `question_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: Id,
    pub question_type: QuestionType,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Predefined(answers::Model),
    Ai(ai_answers::Model),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub answer: SubmittedAnswer,
    pub next: Traversal,
}

impl Intake<'_> {
    /// What to show the client now, synthesizing AI follow-ups if the catalog
    /// is exhausted and the project has never had any.
    pub async fn next_question(&self, project: &projects::Model) -> Result<Traversal, Error> {
        if let Some(next) = self.pending_question(project).await? {
            debug!(
                "Project {} next question: {:?} {}",
                project.id,
                next.question_type(),
                next.id()
            );
            return Ok(Traversal::Question(next));
        }

        // One synthesis round per project: an exhausted batch means we're done.
        if ai_question::exists_for_project(self.db, project.id).await? {
            info!("Project {} has answered every question", project.id);
            return Ok(Traversal::Completed);
        }

        if !self.config.ai_questions_enabled {
            info!(
                "AI questions are disabled, Project {} is complete after the catalog",
                project.id
            );
            return Ok(Traversal::Completed);
        }

        let Some(_guard) = self.locks.try_lock(project.id) else {
            debug!("Synthesis already running for Project {}", project.id);
            return Ok(Traversal::Synthesizing);
        };

        // Whoever held the lock before us may have just persisted a batch.
        if ai_question::exists_for_project(self.db, project.id).await? {
            return self.first_pending_ai_question(project).await;
        }

        self.synthesize(project).await
    }

    /// Records an answer and resolves what comes after it.
    pub async fn submit_answer(
        &self,
        project: &projects::Model,
        user_id: Id,
        submission: AnswerSubmission,
    ) -> Result<Submission, Error> {
        let text = submission.text.trim().to_string();
        if text.is_empty() {
            warn!("Rejecting empty answer for Project {}", project.id);
            return Err(Error::invalid("Answer text must not be empty"));
        }

        match submission.question_type {
            QuestionType::Predefined => {
                self.submit_predefined(project, user_id, submission.question_id, text)
                    .await
            }
            QuestionType::Ai => {
                self.submit_ai(project, user_id, submission.question_id, text)
                    .await
            }
        }
    }

    async fn submit_predefined(
        &self,
        project: &projects::Model,
        user_id: Id,
        question_id: Id,
        text: String,
    ) -> Result<Submission, Error> {
        let answered = question::find_by_id(self.db, question_id).await?;
        if answered.project_type_id != project.project_type_id || !answered.enabled {
            warn!(
                "Question {} is not part of Project {}'s catalog",
                answered.id, project.id
            );
            return Err(Error::invalid("Question does not belong to this project"));
        }

        let now = chrono::Utc::now();
        let answer = answer::create(
            self.db,
            answers::Model {
                id: Id::nil(),
                project_id: project.id,
                question_id: answered.id,
                user_id,
                text,
                created_at: now.into(),
                updated_at: now.into(),
            },
            user_id,
        )
        .await?;

        let next = match self.successor_of(&answered).await? {
            Some(successor) => {
                debug!(
                    "Following successor {} of Question {}",
                    successor.id, answered.id
                );
                Traversal::Question(NextQuestion::Predefined(successor))
            }
            None => self.next_question(project).await?,
        };

        Ok(Submission {
            answer: SubmittedAnswer::Predefined(answer),
            next,
        })
    }

    async fn submit_ai(
        &self,
        project: &projects::Model,
        user_id: Id,
        ai_question_id: Id,
        text: String,
    ) -> Result<Submission, Error> {
        let answered = ai_question::find_by_id(self.db, ai_question_id).await?;
        if answered.project_id != project.id {
            warn!(
                "AI Question {} does not belong to Project {}",
                answered.id, project.id
            );
            return Err(Error::invalid("Question does not belong to this project"));
        }

        let now = chrono::Utc::now();
        let answer = ai_answer::create(
            self.db,
            ai_answers::Model {
                id: Id::nil(),
                ai_question_id: answered.id,
                user_id,
                text,
                created_at: now.into(),
                updated_at: now.into(),
            },
            user_id,
        )
        .await?;

        let next = match answered.next_question_id {
            Some(next_id) => {
                let answered_ids =
                    ai_answer::find_answered_ai_question_ids(self.db, project.id).await?;
                if answered_ids.contains(&next_id) {
                    self.next_question(project).await?
                } else {
                    let successor = ai_question::find_by_id(self.db, next_id).await?;
                    Traversal::Question(NextQuestion::Ai(successor))
                }
            }
            None => self.next_question(project).await?,
        };

        Ok(Submission {
            answer: SubmittedAnswer::Ai(answer),
            next,
        })
    }

    // A successor only counts if it still exists, is enabled and sits in the
    // same catalog as the question pointing at it.
    async fn successor_of(
        &self,
        answered: &questions::Model,
    ) -> Result<Option<questions::Model>, Error> {
        let Some(next_id) = answered.next_question_id else {
            return Ok(None);
        };

        match question::find_by_id(self.db, next_id).await {
            Ok(successor)
                if successor.enabled && successor.project_type_id == answered.project_type_id =>
            {
                Ok(Some(successor))
            }
            Ok(_) => Ok(None),
            Err(err) if err.error_kind == EntityApiErrorKind::RecordNotFound => {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn pending_question(
        &self,
        project: &projects::Model,
    ) -> Result<Option<NextQuestion>, Error> {
        let answered = answer::find_answered_question_ids(self.db, project.id).await?;
        if let Some(question) =
            question::find_first_unanswered(self.db, project.project_type_id, &answered).await?
        {
            return Ok(Some(NextQuestion::Predefined(question)));
        }

        let answered_ai = ai_answer::find_answered_ai_question_ids(self.db, project.id).await?;
        Ok(
            ai_question::find_first_unanswered(self.db, project.id, &answered_ai)
                .await?
                .map(NextQuestion::Ai),
        )
    }

    async fn first_pending_ai_question(
        &self,
        project: &projects::Model,
    ) -> Result<Traversal, Error> {
        let answered_ai = ai_answer::find_answered_ai_question_ids(self.db, project.id).await?;
        Ok(
            match ai_question::find_first_unanswered(self.db, project.id, &answered_ai).await? {
                Some(question) => Traversal::Question(NextQuestion::Ai(question)),
                None => Traversal::Completed,
            },
        )
    }

    // Caller holds the project's lock.
    async fn synthesize(&self, project: &projects::Model) -> Result<Traversal, Error> {
        let project_info = history::project_info(self.db, project).await?;
        let history = history::predefined_history(self.db, project).await?;

        info!(
            "Synthesizing follow-up questions for Project {} from {} catalog entries",
            project.id,
            history.len()
        );

        let texts = self
            .with_deadline(
                self.synthesizer()
                    .follow_up_questions(&project_info, &history),
            )
            .await
            .inspect_err(|err| {
                warn!("Synthesis failed for Project {}: {err}", project.id);
            })?;

        if texts.is_empty() {
            info!(
                "Model needs no follow-up questions for Project {}",
                project.id
            );
            return Ok(Traversal::Completed);
        }

        match ai_question::create_batch(self.db, project.id, texts).await {
            Ok(batch) => Ok(batch
                .into_iter()
                .next()
                .map(|first| Traversal::Question(NextQuestion::Ai(first)))
                .unwrap_or(Traversal::Completed)),
            Err(err) if err.is_conflict() => {
                warn!(
                    "Another batch landed first for Project {}, using it",
                    project.id
                );
                self.first_pending_ai_question(project).await
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, ExternalErrorKind, InternalErrorKind};
    use crate::intake::ProjectLocks;
    use crate::project_types;
    use entity::{project_status::ProjectStatus, question_format::QuestionFormat};
    use intake_ai::MockProvider;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
    use service::config::Config;
    use std::collections::BTreeMap;

    fn project() -> projects::Model {
        let now = chrono::Utc::now();
        projects::Model {
            id: Id::new_v4(),
            name: "Bakery storefront".to_string(),
            description: Some("Online cake orders".to_string()),
            user_id: Id::new_v4(),
            project_type_id: Id::new_v4(),
            status: ProjectStatus::Proposed,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn project_type(project: &projects::Model) -> project_types::Model {
        let now = chrono::Utc::now();
        project_types::Model {
            id: project.project_type_id,
            name: "Web Application".to_string(),
            description: None,
            icon: "🌐".to_string(),
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn question(project: &projects::Model, question_no: i32) -> questions::Model {
        let now = chrono::Utc::now();
        questions::Model {
            id: Id::new_v4(),
            project_type_id: project.project_type_id,
            question_no,
            text: format!("Question {question_no}?"),
            description: None,
            question_format: QuestionFormat::Text,
            next_question_id: None,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn answer(project: &projects::Model, question: &questions::Model) -> answers::Model {
        let now = chrono::Utc::now();
        answers::Model {
            id: Id::new_v4(),
            project_id: project.id,
            question_id: question.id,
            user_id: project.user_id,
            text: format!("Answer to {}", question.text),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn ai_question(project: &projects::Model, question_no: i32) -> ai_questions::Model {
        let now = chrono::Utc::now();
        ai_questions::Model {
            id: Id::new_v4(),
            project_id: project.id,
            question_no,
            text: format!("AI question {question_no}?"),
            description: None,
            next_question_id: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn ai_answer(question: &ai_questions::Model) -> ai_answers::Model {
        let now = chrono::Utc::now();
        ai_answers::Model {
            id: Id::new_v4(),
            ai_question_id: question.id,
            user_id: Id::new_v4(),
            text: "Sure".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count(n: i64) -> Vec<BTreeMap<&'static str, Value>> {
        vec![BTreeMap::from([("num_items", Value::BigInt(Some(n)))])]
    }

    // Mocks the four lookups of a poll that finds the catalog exhausted:
    // predefined answers, no unanswered catalog question, AI answers and the
    // first unanswered AI question.
    fn catalog_exhausted(
        answers: Vec<answers::Model>,
        ai_answers: Vec<ai_answers::Model>,
        next_ai: Option<ai_questions::Model>,
    ) -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([answers])
            .append_query_results([Vec::<questions::Model>::new()])
            .append_query_results([ai_answers])
            .append_query_results([next_ai.into_iter().collect::<Vec<_>>()])
    }

    fn config() -> Config {
        Config::default()
            .set_ai_questions_enabled(true)
            .set_report_regeneration_enabled(true)
    }

    async fn poll(
        db: &DatabaseConnection,
        config: &Config,
        provider: &MockProvider,
        locks: &ProjectLocks,
        project: &projects::Model,
    ) -> Result<Traversal, Error> {
        Intake::new(db, config, provider, locks)
            .next_question(project)
            .await
    }

    #[tokio::test]
    async fn lowest_unanswered_catalog_question_comes_first() -> Result<(), Error> {
        let project = project();
        let q1 = question(&project, 1);
        let q2 = question(&project, 2);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![answer(&project, &q1)]])
            .append_query_results([vec![q2.clone()]])
            .into_connection();

        let next = poll(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
            &project,
        )
        .await?;

        assert_eq!(next, Traversal::Question(NextQuestion::Predefined(q2)));
        Ok(())
    }

    #[tokio::test]
    async fn pending_ai_question_is_served_after_the_catalog() -> Result<(), Error> {
        let project = project();
        let ai_q1 = ai_question(&project, 1);
        let ai_q2 = ai_question(&project, 2);

        let db = catalog_exhausted(
            vec![],
            vec![ai_answer(&ai_q1)],
            Some(ai_q2.clone()),
        )
        .into_connection();

        let next = poll(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
            &project,
        )
        .await?;

        assert_eq!(next, Traversal::Question(NextQuestion::Ai(ai_q2)));
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_batch_completes_without_calling_the_model() -> Result<(), Error> {
        let project = project();
        let ai_q1 = ai_question(&project, 1);

        let db = catalog_exhausted(
            vec![],
            vec![ai_answer(&ai_q1)],
            None,
        )
        .append_query_results([count(1)])
        .into_connection();

        // No expectations: any model call panics.
        let provider = MockProvider::new();
        let next = poll(&db, &config(), &provider, &ProjectLocks::new(), &project).await?;

        assert_eq!(next, Traversal::Completed);
        Ok(())
    }

    #[tokio::test]
    async fn disabled_ai_questions_complete_after_the_catalog() -> Result<(), Error> {
        let project = project();

        let db = catalog_exhausted(
            vec![],
            vec![],
            None,
        )
        .append_query_results([count(0)])
        .into_connection();

        let config = config().set_ai_questions_enabled(false);
        let next = poll(
            &db,
            &config,
            &MockProvider::new(),
            &ProjectLocks::new(),
            &project,
        )
        .await?;

        assert_eq!(next, Traversal::Completed);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_poll_reports_synthesizing() -> Result<(), Error> {
        let project = project();

        let db = catalog_exhausted(
            vec![],
            vec![],
            None,
        )
        .append_query_results([count(0)])
        .into_connection();

        let locks = ProjectLocks::new();
        let _held = locks.try_lock(project.id).unwrap();

        let next = poll(&db, &config(), &MockProvider::new(), &locks, &project).await?;

        assert_eq!(next, Traversal::Synthesizing);
        Ok(())
    }

    #[tokio::test]
    async fn batch_persisted_while_waiting_for_the_lock_is_served() -> Result<(), Error> {
        let project = project();
        let ai_q1 = ai_question(&project, 1);

        let db = catalog_exhausted(
            vec![],
            vec![],
            None,
        )
        // No batch before taking the lock, one after
        .append_query_results([count(0)])
        .append_query_results([count(1)])
        .append_query_results([Vec::<ai_answers::Model>::new()])
        .append_query_results([vec![ai_q1.clone()]])
        .into_connection();

        // No expectations: any model call panics.
        let provider = MockProvider::new();
        let next = poll(&db, &config(), &provider, &ProjectLocks::new(), &project).await?;

        assert_eq!(next, Traversal::Question(NextQuestion::Ai(ai_q1)));
        assert_eq!(db.into_transaction_log().len(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn synthesis_persists_a_linked_batch_and_returns_its_first_question(
    ) -> Result<(), Error> {
        let project = project();
        let q1 = question(&project, 1);
        let a1 = answer(&project, &q1);

        let db = catalog_exhausted(
            vec![a1.clone()],
            vec![],
            None,
        )
        .append_query_results([count(0)])
        .append_query_results([count(0)])
        .append_query_results([vec![project_type(&project)]])
        .append_query_results([vec![q1.clone()]])
        .append_query_results([vec![a1]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|request| request.prompt.contains("Answer to Question 1?"))
            .times(1)
            .returning(|_| Ok(r#"{"questions": ["Q_a", "Q_b"]}"#.to_string()));

        let next = poll(&db, &config(), &provider, &ProjectLocks::new(), &project).await?;

        match next {
            Traversal::Question(NextQuestion::Ai(first)) => {
                assert_eq!(first.text, "Q_a");
                assert_eq!(first.question_no, 1);
                assert_eq!(first.project_id, project.id);
                assert!(first.next_question_id.is_some());
            }
            other => panic!("expected the first AI question, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn empty_synthesis_completes_and_persists_nothing() -> Result<(), Error> {
        let project = project();
        let q1 = question(&project, 1);
        let q2 = question(&project, 2);
        let answers = vec![answer(&project, &q1), answer(&project, &q2)];

        let db = catalog_exhausted(
            answers.clone(),
            vec![],
            None,
        )
        .append_query_results([count(0)])
        .append_query_results([count(0)])
        .append_query_results([vec![project_type(&project)]])
        .append_query_results([vec![q1, q2]])
        .append_query_results([answers])
        .into_connection();

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(r#"{"questions": []}"#.to_string()));

        let next = poll(&db, &config(), &provider, &ProjectLocks::new(), &project).await?;

        assert_eq!(next, Traversal::Completed);
        // Nine reads and no insert
        assert_eq!(db.into_transaction_log().len(), 9);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_model_reply_is_an_error_not_completion() {
        let project = project();

        let db = catalog_exhausted(
            vec![],
            vec![],
            None,
        )
        .append_query_results([count(0)])
        .append_query_results([count(0)])
        .append_query_results([vec![project_type(&project)]])
        .append_query_results([Vec::<questions::Model>::new()])
        .append_query_results([Vec::<answers::Model>::new()])
        .into_connection();

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Ok("Q_a\n\nQ_b".to_string()));

        let result = poll(&db, &config(), &provider, &ProjectLocks::new(), &project).await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::External(ExternalErrorKind::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn submitting_follows_the_configured_successor() -> Result<(), Error> {
        let project = project();
        let q3 = question(&project, 3);
        let mut q1 = question(&project, 1);
        q1.next_question_id = Some(q3.id);
        let stored = answer(&project, &q1);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![q1.clone()]])
            .append_query_results([vec![stored.clone()]])
            .append_query_results([vec![q3.clone()]])
            .into_connection();

        let submission = Intake::new(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
        )
        .submit_answer(
            &project,
            project.user_id,
            AnswerSubmission {
                question_id: q1.id,
                question_type: QuestionType::Predefined,
                text: "  Online cake orders ".to_string(),
            },
        )
        .await?;

        assert_eq!(submission.answer, SubmittedAnswer::Predefined(stored));
        assert_eq!(
            submission.next,
            Traversal::Question(NextQuestion::Predefined(q3))
        );
        Ok(())
    }

    #[tokio::test]
    async fn submitting_without_successor_falls_back_to_polling() -> Result<(), Error> {
        let project = project();
        let q1 = question(&project, 1);
        let q2 = question(&project, 2);
        let stored = answer(&project, &q1);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![q1.clone()]])
            .append_query_results([vec![stored.clone()]])
            .append_query_results([vec![stored]])
            .append_query_results([vec![q2.clone()]])
            .into_connection();

        let submission = Intake::new(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
        )
        .submit_answer(
            &project,
            project.user_id,
            AnswerSubmission {
                question_id: q1.id,
                question_type: QuestionType::Predefined,
                text: "Online cake orders".to_string(),
            },
        )
        .await?;

        assert_eq!(
            submission.next,
            Traversal::Question(NextQuestion::Predefined(q2))
        );
        Ok(())
    }

    #[tokio::test]
    async fn submitting_to_another_catalog_is_invalid() {
        let project = project();
        let mut foreign = question(&project, 1);
        foreign.project_type_id = Id::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![foreign.clone()]])
            .into_connection();

        let result = Intake::new(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
        )
        .submit_answer(
            &project,
            project.user_id,
            AnswerSubmission {
                question_id: foreign.id,
                question_type: QuestionType::Predefined,
                text: "Yes".to_string(),
            },
        )
        .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    #[tokio::test]
    async fn blank_answers_are_rejected_before_touching_the_database() {
        let project = project();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = Intake::new(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
        )
        .submit_answer(
            &project,
            project.user_id,
            AnswerSubmission {
                question_id: Id::new_v4(),
                question_type: QuestionType::Ai,
                text: "   ".to_string(),
            },
        )
        .await;

        assert!(result.is_err());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn ai_submission_follows_unanswered_successor() -> Result<(), Error> {
        let project = project();
        let mut ai_q1 = ai_question(&project, 1);
        let ai_q2 = ai_question(&project, 2);
        ai_q1.next_question_id = Some(ai_q2.id);
        let stored = ai_answer(&ai_q1);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ai_q1.clone()]])
            .append_query_results([vec![stored.clone()]])
            .append_query_results([vec![stored.clone()]])
            .append_query_results([vec![ai_q2.clone()]])
            .into_connection();

        let submission = Intake::new(
            &db,
            &config(),
            &MockProvider::new(),
            &ProjectLocks::new(),
        )
        .submit_answer(
            &project,
            stored.user_id,
            AnswerSubmission {
                question_id: ai_q1.id,
                question_type: QuestionType::Ai,
                text: "Sure".to_string(),
            },
        )
        .await?;

        assert_eq!(submission.answer, SubmittedAnswer::Ai(stored));
        assert_eq!(submission.next, Traversal::Question(NextQuestion::Ai(ai_q2)));
        Ok(())
    }

    #[test]
    fn traversal_serializes_with_state_and_question_type() {
        let project = project();
        let q1 = question(&project, 1);

        let json = serde_json::to_value(Traversal::Question(NextQuestion::Predefined(q1.clone())))
            .unwrap();

        assert_eq!(json["state"], "question");
        assert_eq!(json["question_type"], "predefined");
        assert_eq!(json["question"]["text"], q1.text);
        assert_eq!(
            serde_json::to_value(Traversal::Completed).unwrap(),
            serde_json::json!({"state": "completed"})
        );
    }
}
