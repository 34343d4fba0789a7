use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{project as ProjectApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET what the client should be asked next.
///
/// The `data` is one of:
/// `{"state": "question", "question_type": "predefined" | "ai", "question": {...}}`,
/// `{"state": "synthesizing"}` while follow-up questions are being written (poll again), or
/// `{"state": "completed"}`.
#[utoipa::path(
    get,
    path = "/projects/{id}/next_question",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "The next step of the interview"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found"),
        (status = 502, description = "The language model failed while writing follow-up questions"),
        (status = 503, description = "The language model is busy or timed out")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(project_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET next Question for Project {project_id}");

    let project = ProjectApi::find_by_id(app_state.db_conn_ref(), project_id).await?;
    let traversal = app_state.intake().next_question(&project).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), traversal)))
}
