use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::answer::{CreateParams, IndexParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{answer as AnswerApi, project as ProjectApi, Id};
use log::*;
use serde_json::json;
use service::config::ApiVersion;

/// GET a Project's answers: `answers` to catalog questions (optionally only
/// those for `question_id`) and every `ai_answers` entry.
#[utoipa::path(
    get,
    path = "/projects/{id}/answers",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id"),
        IndexParams,
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Project's answers"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(project_id): Path<Id>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Answers for Project {project_id} with {params:?}");

    let answers =
        AnswerApi::find_by_project(app_state.db_conn_ref(), project_id, params.question_id)
            .await?;
    let ai_answers =
        AnswerApi::find_ai_answers_by_project(app_state.db_conn_ref(), project_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({
            "answers": answers,
            "ai_answers": ai_answers,
        }),
    )))
}

/// POST answer the question the client was shown and get the next step.
///
/// The `data` holds the stored `answer` and `next`, shaped like the response
/// of `GET /projects/{id}/next_question`.
#[utoipa::path(
    post,
    path = "/projects/{id}/answers",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id"),
    ),
    request_body = crate::params::answer::CreateParams,
    responses(
        (status = 201, description = "Answer stored"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project or Question not found"),
        (status = 422, description = "Empty answer, or the Question is not part of this Project"),
        (status = 502, description = "The language model failed while writing follow-up questions"),
        (status = 503, description = "The language model is busy or timed out")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<Id>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST Answer to {:?} Question {} for Project {project_id}",
        params.question_type, params.question_id
    );

    let project = ProjectApi::find_by_id(app_state.db_conn_ref(), project_id).await?;
    let submission = app_state
        .intake()
        .submit_answer(&project, user.id, params.into())
        .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), submission)))
}
