use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    /// The HTTP status, a stable machine readable kind, and the message shown
    /// to the caller. Upstream and internal details stay in the server log.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match &self.0.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)) => {
                match entity_error_kind {
                    EntityErrorKind::NotFound => (
                        StatusCode::NOT_FOUND,
                        "not_found",
                        "The requested resource was not found".to_string(),
                    ),
                    EntityErrorKind::Invalid => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "invalid",
                        self.0
                            .source
                            .as_ref()
                            .map(|source| source.to_string())
                            .unwrap_or_else(|| "The request could not be processed".to_string()),
                    ),
                    EntityErrorKind::Unauthenticated => (
                        StatusCode::UNAUTHORIZED,
                        "unauthenticated",
                        "Invalid credentials".to_string(),
                    ),
                    EntityErrorKind::Conflict => (
                        StatusCode::CONFLICT,
                        "conflict",
                        "The resource already exists".to_string(),
                    ),
                    EntityErrorKind::DbTransaction | EntityErrorKind::Other(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal",
                        "Internal server error".to_string(),
                    ),
                }
            }
            DomainErrorKind::Internal(InternalErrorKind::FeatureDisabled(feature)) => (
                StatusCode::FORBIDDEN,
                "feature_disabled",
                format!("{feature} is disabled"),
            ),
            DomainErrorKind::Internal(InternalErrorKind::Config)
            | DomainErrorKind::Internal(InternalErrorKind::Other(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "Internal server error".to_string(),
            ),
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Timeout => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_timeout",
                    "The language model did not respond in time, please try again".to_string(),
                ),
                ExternalErrorKind::RateLimited => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_rate_limited",
                    "The language model is busy, please try again later".to_string(),
                ),
                ExternalErrorKind::MalformedResponse(_) => (
                    StatusCode::BAD_GATEWAY,
                    "upstream_malformed_response",
                    "The language model returned an unusable response".to_string(),
                ),
                ExternalErrorKind::Network | ExternalErrorKind::Other(_) => (
                    StatusCode::BAD_GATEWAY,
                    "upstream_failure",
                    "The language model request failed".to_string(),
                ),
            },
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, kind, message) = self.classify();

        if status_code.is_server_error() {
            error!("{status_code} {kind}: {:?}", self.0);
        } else {
            debug!("{status_code} {kind}: {:?}", self.0);
        }

        (
            status_code,
            Json(json!({
                "status_code": status_code.as_u16(),
                "error": {
                    "kind": kind,
                    "message": message,
                }
            })),
        )
            .into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
