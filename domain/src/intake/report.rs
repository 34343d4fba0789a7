use super::{history, Intake};
use crate::error::Error;
use crate::{project_reports, projects};
use entity_api::project_report;
use intake_ai::HistoryEntry;
use log::*;

impl Intake<'_> {
    /// The project's requirements report, written by the model on first request.
    ///
    /// Concurrent first requests for the same project wait on the project lock,
    /// so the model is asked once and every caller gets the same row.
    pub async fn report(
        &self,
        project: &projects::Model,
    ) -> Result<project_reports::Model, Error> {
        if let Some(report) = project_report::find_by_project(self.db, project.id).await? {
            return Ok(report);
        }

        let _guard = self.locks.lock(project.id).await;
        if let Some(report) = project_report::find_by_project(self.db, project.id).await? {
            debug!("Report for Project {} appeared while waiting", project.id);
            return Ok(report);
        }

        let text = self.write_report(project).await?;
        match project_report::create(self.db, project.id, text).await {
            Ok(report) => {
                info!("Generated report {} for Project {}", report.id, project.id);
                Ok(report)
            }
            // Another process won the insert; its report is the report.
            Err(err) if err.is_conflict() => {
                warn!("Report for Project {} was inserted concurrently", project.id);
                project_report::find_by_project(self.db, project.id)
                    .await?
                    .ok_or_else(Error::not_found)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Rewrites the project's report from its current answers.
    ///
    /// The new text is obtained before the old row is touched, so a failed
    /// model call leaves the existing report in place.
    pub async fn regenerate_report(
        &self,
        project: &projects::Model,
    ) -> Result<project_reports::Model, Error> {
        if !self.config.report_regeneration_enabled {
            warn!(
                "Report regeneration is disabled, refusing for Project {}",
                project.id
            );
            return Err(Error::feature_disabled("report regeneration"));
        }

        let _guard = self.locks.lock(project.id).await;
        let text = self.write_report(project).await?;
        let report = project_report::replace(self.db, project.id, text).await?;

        info!("Regenerated report {} for Project {}", report.id, project.id);
        Ok(report)
    }

    async fn write_report(&self, project: &projects::Model) -> Result<String, Error> {
        let history = history::full_history(self.db, project).await?;
        if !history.iter().any(HistoryEntry::is_answered) {
            warn!("Project {} has no answers to report on", project.id);
            return Err(Error::invalid("Project has no answers to report on"));
        }

        let project_info = history::project_info(self.db, project).await?;
        info!(
            "Writing report for Project {} from {} history entries",
            project.id,
            history.len()
        );

        self.with_deadline(self.synthesizer().report(&project_info, &history))
            .await
            .inspect_err(|err| {
                warn!("Report generation failed for Project {}: {err}", project.id);
            })
    }
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, ExternalErrorKind, InternalErrorKind};
    use crate::intake::ProjectLocks;
    use crate::{ai_answers, ai_questions, answers, project_types, questions, Id};
    use entity::{project_status::ProjectStatus, question_format::QuestionFormat};
    use intake_ai::MockProvider;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use service::config::Config;

    fn project() -> projects::Model {
        let now = chrono::Utc::now();
        projects::Model {
            id: Id::new_v4(),
            name: "Bakery storefront".to_string(),
            description: None,
            user_id: Id::new_v4(),
            project_type_id: Id::new_v4(),
            status: ProjectStatus::Proposed,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn report(project: &projects::Model, body: &str) -> project_reports::Model {
        let now = chrono::Utc::now();
        project_reports::Model {
            id: Id::new_v4(),
            project_id: project.id,
            report: body.to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    // Appends the reads of `full_history` and `project_info` for a project
    // with one catalog question, answered when `answered` is set.
    fn with_history(db: MockDatabase, project: &projects::Model, answered: bool) -> MockDatabase {
        let now = chrono::Utc::now();
        let question = questions::Model {
            id: Id::new_v4(),
            project_type_id: project.project_type_id,
            question_no: 1,
            text: "What problem should this application solve?".to_string(),
            description: None,
            question_format: QuestionFormat::Text,
            next_question_id: None,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        };
        let answers = if answered {
            vec![answers::Model {
                id: Id::new_v4(),
                project_id: project.id,
                question_id: question.id,
                user_id: project.user_id,
                text: "Take cake orders online".to_string(),
                created_at: now.into(),
                updated_at: now.into(),
            }]
        } else {
            vec![]
        };

        let db = db
            .append_query_results([vec![question]])
            .append_query_results([answers])
            .append_query_results([Vec::<ai_questions::Model>::new()])
            .append_query_results([Vec::<ai_answers::Model>::new()]);

        if !answered {
            return db;
        }

        db.append_query_results([vec![project_types::Model {
            id: project.project_type_id,
            name: "Web Application".to_string(),
            description: None,
            icon: "🌐".to_string(),
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
    }

    #[tokio::test]
    async fn existing_report_is_returned_without_calling_the_model() -> Result<(), Error> {
        let project = project();
        let existing = report(&project, "<h1>v1</h1>");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let found = Intake::new(
            &db,
            &Config::default(),
            &MockProvider::new(),
            &ProjectLocks::new(),
        )
        .report(&project)
        .await?;

        assert_eq!(found, existing);
        Ok(())
    }

    #[tokio::test]
    async fn first_request_generates_and_stores_the_report() -> Result<(), Error> {
        let project = project();
        let stored = report(&project, "<h1>Bakery storefront</h1>");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<project_reports::Model>::new()])
            .append_query_results([Vec::<project_reports::Model>::new()]);
        let db = with_history(db, &project, true)
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|request| request.prompt.contains("Take cake orders online"))
            .times(1)
            .returning(|_| Ok("<h1>Bakery storefront</h1>".to_string()));

        let generated = Intake::new(&db, &Config::default(), &provider, &ProjectLocks::new())
            .report(&project)
            .await?;

        assert_eq!(generated, stored);
        Ok(())
    }

    #[tokio::test]
    async fn regeneration_is_refused_when_disabled() {
        let project = project();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let config = Config::default().set_report_regeneration_enabled(false);

        let result = Intake::new(&db, &config, &MockProvider::new(), &ProjectLocks::new())
            .regenerate_report(&project)
            .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::FeatureDisabled(
                "report regeneration".to_string()
            ))
        );
        // Nothing deleted, nothing created
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn regeneration_without_answers_is_invalid() {
        let project = project();
        let db = with_history(
            MockDatabase::new(DatabaseBackend::Postgres),
            &project,
            false,
        )
        .into_connection();
        let config = Config::default().set_report_regeneration_enabled(true);

        let result = Intake::new(&db, &config, &MockProvider::new(), &ProjectLocks::new())
            .regenerate_report(&project)
            .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_the_old_report() {
        let project = project();
        let db = with_history(
            MockDatabase::new(DatabaseBackend::Postgres),
            &project,
            true,
        )
        .into_connection();
        let config = Config::default().set_report_regeneration_enabled(true);

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(intake_ai::Error::Network("connection reset".to_string())));

        let result = Intake::new(&db, &config, &provider, &ProjectLocks::new())
            .regenerate_report(&project)
            .await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::External(ExternalErrorKind::Network)
        );
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("DELETE"));
    }

    #[tokio::test]
    async fn regeneration_replaces_the_report() -> Result<(), Error> {
        let project = project();
        let fresh = report(&project, "<h1>v2</h1>");
        let db = with_history(
            MockDatabase::new(DatabaseBackend::Postgres),
            &project,
            true,
        )
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![fresh.clone()]])
        .into_connection();
        let config = Config::default().set_report_regeneration_enabled(true);

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok("<h1>v2</h1>".to_string()));

        let regenerated = Intake::new(&db, &config, &provider, &ProjectLocks::new())
            .regenerate_report(&project)
            .await?;

        assert_eq!(regenerated, fresh);
        let log = format!("{:?}", db.into_transaction_log());
        let delete_at = log.find("DELETE").expect("delete statement");
        let insert_at = log.find("INSERT").expect("insert statement");
        assert!(delete_at < insert_at);
        Ok(())
    }
}
