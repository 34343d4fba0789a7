use crate::controller::ApiResponse;
use crate::error::{Error as WebError, Result as WebResult};
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::user::SignupParams;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};
use domain::error::{DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind};
use domain::user::{self as UserApi, AuthSession, Credentials};
use domain::users;
use log::*;
use serde_json::json;
use service::config::ApiVersion;

fn unauthenticated(source: Option<Box<dyn std::error::Error + Send + Sync>>) -> WebError {
    WebError::from(DomainError {
        source,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
            EntityErrorKind::Unauthenticated,
        )),
    })
}

/// Logs the user into the platform and returns a new session cookie.
///
/// Successful login will return a session cookie with id, e.g.:
/// set-cookie: id=07bbbe54-bd35-425f-8e63-618a8d8612df; HttpOnly; SameSite=Strict; Path=/; Max-Age=86399
///
/// Every later API call must send the session id back, e.g.:
/// curl -v --header "Cookie: id=07bbbe54-bd35-425f-8e63-618a8d8612df" --header "x-version: 1.0.0-beta1" --request GET http://localhost:4000/projects
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = domain::user::Credentials, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logs in and returns session authentication cookie"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    )
)]
pub async fn login(
    mut auth_session: AuthSession,
    Form(creds): Form<Credentials>,
) -> WebResult<impl IntoResponse> {
    let user = match auth_session.authenticate(creds.clone()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Authentication failed, invalid user: {:?}", creds.email);
            return Err(unauthenticated(None));
        }
        Err(auth_error) => {
            warn!("Authentication failed with error: {auth_error:?}");
            return Err(unauthenticated(Some(Box::new(auth_error))));
        }
    };

    start_session(&mut auth_session, &user).await?;
    info!("User {} logged in", user.id);

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        session_user_json(&user),
    )))
}

/// Opens a client account and logs it straight in, returning a session cookie
/// exactly like `/login` does.
#[utoipa::path(
    post,
    path = "/signup",
    params(ApiVersion),
    request_body = crate::params::user::SignupParams,
    responses(
        (status = 201, description = "Created the account and returns session authentication cookie"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Unprocessable Entity")
    )
)]
pub async fn signup(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    mut auth_session: AuthSession,
    Json(params): Json<SignupParams>,
) -> WebResult<impl IntoResponse> {
    debug!("POST signup for {:?}", params.email);

    let user = UserApi::signup(app_state.db_conn_ref(), params.into()).await?;
    start_session(&mut auth_session, &user).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        session_user_json(&user),
    )))
}

async fn start_session(auth_session: &mut AuthSession, user: &users::Model) -> WebResult<()> {
    auth_session.login(user).await.map_err(|login_error| {
        error!("Session login failed: {login_error:?}");
        WebError::from(DomainError {
            source: Some(Box::new(login_error)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Session login failed".to_string(),
            )),
        })
    })
}

fn session_user_json(user: &users::Model) -> serde_json::Value {
    json!({
        "id": user.id,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "display_name": user.display_name,
        "role": user.role,
    })
}

/// Logs the user out of the platform by destroying their session.
/// Test this with curl: curl -v \
/// --header "Cookie: id=07bbbe54-bd35-425f-8e63-618a8d8612df" \
/// --request DELETE http://localhost:4000/logout
#[utoipa::path(
    delete,
    path = "/logout",
    responses(
        (status = 200, description = "Successfully logged out"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(mut auth_session: AuthSession) -> impl IntoResponse {
    trace!("UserSessionController::delete()");
    match auth_session.logout().await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => {
            error!("Logout failed: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
