//! Error types for language model operations.

use std::fmt;

/// Provider-agnostic failure of a model call.
///
/// Every variant is a failure: none of them may be read as "the model had
/// nothing to say". Provider implementations map their native errors onto
/// these variants.
#[derive(Debug)]
pub enum Error {
    /// The API key is missing, invalid or lacks permission.
    Authentication(String),

    /// Connection, DNS or transport failure. Usually transient.
    Network(String),

    /// The provider is not usable as configured (e.g. no API key set).
    Configuration(String),

    /// The provider rejected the request or failed while serving it.
    Provider(String),

    /// The call did not finish within the configured deadline.
    Timeout(String),

    /// Provider rate limit exceeded. Respect `retry_after_seconds` before retrying.
    RateLimited { retry_after_seconds: u64 },

    /// The model answered, but not in the shape the prompt asked for.
    MalformedResponse(String),

    /// Failed to serialize an outgoing request body.
    Serialization(String),

    /// Catch-all for errors that don't fit other categories.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Whether retrying the same call later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Timeout(_) | Error::RateLimited { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Error::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited: retry after {}s", retry_after_seconds)
            }
            Error::MalformedResponse(msg) => write!(f, "Malformed model response: {}", msg),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Other(err) => write!(f, "Other error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_timeout_and_rate_limit_are_transient() {
        assert!(Error::Network("reset".into()).is_transient());
        assert!(Error::Timeout("120s".into()).is_transient());
        assert!(Error::RateLimited {
            retry_after_seconds: 5
        }
        .is_transient());

        assert!(!Error::Authentication("bad key".into()).is_transient());
        assert!(!Error::MalformedResponse("not json".into()).is_transient());
        assert!(!Error::Provider("400".into()).is_transient());
    }

    #[test]
    fn display_includes_retry_delay() {
        let error = Error::RateLimited {
            retry_after_seconds: 30,
        };
        assert_eq!(error.to_string(), "Rate limited: retry after 30s");
    }
}
