//! The client interview: which question comes next, when to ask the model for
//! follow-ups, and turning the finished interview into a requirements report.
//!
//! Every operation takes the project it works on; callers are expected to have
//! loaded it (and checked the caller may touch it) beforehand.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::http::RetryAfterPolicy;
use intake_ai::Synthesizer;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::future::Future;
use std::time::Duration;

pub(crate) mod history;
pub mod locks;
pub mod report;
pub mod traversal;

pub use intake_ai::Provider;
pub use locks::ProjectLocks;
pub use traversal::{AnswerSubmission, NextQuestion, QuestionType, Submission, SubmittedAnswer, Traversal};

/// Everything an interview step needs, borrowed from the application state for
/// the length of one request.
pub struct Intake<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    llm: &'a dyn Provider,
    locks: &'a ProjectLocks,
}

impl<'a> Intake<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a Config,
        llm: &'a dyn Provider,
        locks: &'a ProjectLocks,
    ) -> Self {
        Self {
            db,
            config,
            llm,
            locks,
        }
    }

    fn synthesizer(&self) -> Synthesizer<'a> {
        Synthesizer::new(
            self.llm,
            self.config.llm_model(),
            self.config.llm_max_tokens,
        )
    }

    // Upper bound for one model call: every attempt the HTTP client may make,
    // plus the longest it may sleep between them.
    fn model_deadline(&self) -> Duration {
        let attempts = u64::from(self.config.llm_max_retries) + 1;
        let requests = Duration::from_secs(self.config.llm_timeout_secs.saturating_mul(attempts));
        requests.saturating_add(RetryAfterPolicy::new(self.config.llm_max_retries).max_total_delay())
    }

    async fn with_deadline<T>(
        &self,
        call: impl Future<Output = Result<T, intake_ai::Error>>,
    ) -> Result<T, Error> {
        let deadline = self.model_deadline();
        match tokio::time::timeout(deadline, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                if err.is_transient() {
                    warn!("Model unavailable after retries, the caller may try again: {err}");
                } else {
                    error!("Model call failed: {err}");
                }
                Err(err.into())
            }
            Err(elapsed) => {
                warn!(
                    "{} call exceeded {}s deadline",
                    self.llm.provider_id(),
                    deadline.as_secs()
                );
                Err(Error {
                    source: Some(Box::new(elapsed)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Timeout),
                })
            }
        }
    }
}
