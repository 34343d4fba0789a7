use crate::protect::{lookup_failed, projects::authorize_project};
use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::IntoResponse,
};
use domain::{answer as AnswerApi, Id};

/// Checks that the answer in the path belongs to a project the authenticated
/// user owns, or that the user is an admin.
pub(crate) async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(answer_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    match AnswerApi::find_by_id(app_state.db_conn_ref(), answer_id).await {
        Ok(answer) => authorize_project(&app_state, user, answer.project_id, request, next).await,
        Err(err) => lookup_failed(err, "Answer", answer_id),
    }
}
