use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{ai_question as AiQuestionApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET the follow-up questions written for a Project, each with an `answered` flag
#[utoipa::path(
    get,
    path = "/projects/{id}/ai_questions",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the Project's AI questions"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(project_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET AI Questions for Project {project_id}");

    let questions =
        AiQuestionApi::find_by_project_with_status(app_state.db_conn_ref(), project_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), questions)))
}
