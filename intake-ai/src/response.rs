//! Validation of raw model output.

use crate::Error;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QuestionList {
    questions: Vec<String>,
}

/// Parses the `{"questions": [...]}` object requested by
/// [`crate::prompt::question_prompt`].
///
/// One surrounding Markdown code fence is tolerated. Entries are trimmed and
/// blank entries dropped, so `Ok(vec![])` means the model explicitly asked
/// for nothing more. Anything that is not that JSON shape, including an empty
/// reply, is `Error::MalformedResponse`.
pub fn parse_questions(raw: &str) -> Result<Vec<String>, Error> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(Error::MalformedResponse(
            "model returned an empty reply".to_string(),
        ));
    }

    let list: QuestionList = serde_json::from_str(body).map_err(|e| {
        Error::MalformedResponse(format!("expected {{\"questions\": [..]}}: {e}"))
    })?;

    Ok(list
        .questions
        .into_iter()
        .map(|question| question.trim().to_string())
        .filter(|question| !question.is_empty())
        .collect())
}

/// Accepts any non-blank report body, returned verbatim.
pub fn validate_report(raw: String) -> Result<String, Error> {
    if raw.trim().is_empty() {
        return Err(Error::MalformedResponse(
            "model returned an empty report".to_string(),
        ));
    }
    Ok(raw)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    match rest.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => rest.trim(),
    }
}
