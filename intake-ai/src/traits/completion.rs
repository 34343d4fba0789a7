//! Text completion provider trait.

use crate::types::completion::CompletionRequest;
use crate::Error;
use async_trait::async_trait;

/// A hosted text-generation model reduced to the one operation the intake
/// interview needs.
///
/// Implementations must distinguish every failure (authentication, rate
/// limiting, network, malformed body) from success; an `Ok` carries the
/// model's text output verbatim.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send `request.prompt` as a single user turn and return the text of the reply.
    async fn complete(&self, request: CompletionRequest) -> Result<String, Error>;

    /// Return unique identifier for this provider (e.g., "anthropic").
    ///
    /// Used for logging and selecting providers at runtime.
    fn provider_id(&self) -> &'static str;
}
