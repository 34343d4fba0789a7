use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_login::AuthSession;
use log::*;

/// Returns 401 Unauthorized for requests without a logged in session.
///
/// axum-login's `login_required!` redirects to a login page; an API client
/// wants the status code instead.
pub async fn require_auth(
    auth_session: AuthSession<domain::user::Backend>,
    request: Request,
    next: Next,
) -> Response {
    match auth_session.user {
        Some(_user) => next.run(request).await,
        None => {
            debug!("Rejecting unauthenticated {} {}", request.method(), request.uri().path());
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
