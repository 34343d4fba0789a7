use serde::Serialize;

/// One-shot completion request: a single prompt, answered once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model_id: String,
    pub max_tokens: u32,
}
