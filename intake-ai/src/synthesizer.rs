//! Follow-up question synthesis and report writing over any [`Provider`].

use crate::prompt::{question_prompt, report_prompt};
use crate::response::{parse_questions, validate_report};
use crate::types::completion::CompletionRequest;
use crate::types::interview::{HistoryEntry, ProjectInfo};
use crate::{Error, Provider};
use log::*;

/// Issues interview prompts against one model with fixed generation settings.
pub struct Synthesizer<'a> {
    provider: &'a dyn Provider,
    model_id: String,
    max_tokens: u32,
}

impl<'a> Synthesizer<'a> {
    pub fn new(provider: &'a dyn Provider, model_id: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            max_tokens,
        }
    }

    /// Asks the model which questions are still needed. An empty result means
    /// the model considers the requirements complete; every failure, including
    /// an unparseable reply, is an `Err`.
    pub async fn follow_up_questions(
        &self,
        project: &ProjectInfo,
        history: &[HistoryEntry],
    ) -> Result<Vec<String>, Error> {
        let prompt = question_prompt(project, history);
        debug!(
            "Requesting follow-up questions for \"{}\" ({} history entries, {} prompt bytes)",
            project.name,
            history.len(),
            prompt.len()
        );

        let raw = self.provider.complete(self.request(prompt)).await?;
        let questions = parse_questions(&raw).inspect_err(|e| {
            warn!("Discarding model reply for \"{}\": {e}", project.name);
        })?;

        info!(
            "Model proposed {} follow-up question(s) for \"{}\"",
            questions.len(),
            project.name
        );
        Ok(questions)
    }

    /// Asks the model for the requirements document and returns it verbatim.
    pub async fn report(
        &self,
        project: &ProjectInfo,
        history: &[HistoryEntry],
    ) -> Result<String, Error> {
        let prompt = report_prompt(project, history);
        debug!(
            "Requesting report for \"{}\" ({} history entries, {} prompt bytes)",
            project.name,
            history.len(),
            prompt.len()
        );

        let report = validate_report(self.provider.complete(self.request(prompt)).await?)?;

        info!(
            "Model wrote a {} byte report for \"{}\"",
            report.len(),
            project.name
        );
        Ok(report)
    }

    fn request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            prompt,
            model_id: self.model_id.clone(),
            max_tokens: self.max_tokens,
        }
    }
}
