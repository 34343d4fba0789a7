use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use log::*;
use semver::Version;
use service::config::ApiVersion;

/// The API version requested through the `x-version` header. Requests naming
/// a version this server does not speak are rejected with 400.
pub(crate) struct CompareApiVersion(pub Version);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let field_name = ApiVersion::field_name();

        let header = parts
            .headers
            .get(field_name)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                debug!("Request without a usable {field_name} header");
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing {field_name} header"),
                )
            })?;

        let version = Version::parse(header.trim()).map_err(|err| {
            debug!("Unparseable {field_name} header {header:?}: {err}");
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {field_name} header: {header}"),
            )
        })?;

        let supported = ApiVersion::versions()
            .iter()
            .filter_map(|v| Version::parse(v).ok())
            .any(|v| v == version);

        if supported {
            Ok(CompareApiVersion(version))
        } else {
            warn!("Rejecting request for unsupported API version {version}");
            Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {version}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<CompareApiVersion, RejectionType> {
        let mut builder = Request::builder().uri("/projects");
        if let Some(header) = header {
            builder = builder.header(ApiVersion::field_name(), header);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        CompareApiVersion::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_the_default_version() {
        let CompareApiVersion(version) = extract(Some(ApiVersion::default_version()))
            .await
            .unwrap();

        assert_eq!(version, ApiVersion::default().version);
    }

    #[tokio::test]
    async fn rejects_a_missing_header() {
        let (status, message) = extract(None).await.err().unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("x-version"));
    }

    #[tokio::test]
    async fn rejects_an_unknown_version() {
        let (status, _) = extract(Some("9.9.9")).await.err().unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let (status, _) = extract(Some("latest")).await.err().unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
