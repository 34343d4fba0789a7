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

/// GET a Project's requirements report, writing it on first request
#[utoipa::path(
    get,
    path = "/projects/{id}/report",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "The Project's report", body = [domain::project_reports::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "The Project has no answers yet"),
        (status = 502, description = "The language model failed to write the report"),
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
    debug!("GET Report for Project {project_id}");

    let project = ProjectApi::find_by_id(app_state.db_conn_ref(), project_id).await?;
    let report = app_state.intake().report(&project).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), report)))
}

/// POST rewrite a Project's report from its current answers
#[utoipa::path(
    post,
    path = "/projects/{id}/report/regenerate",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "The rewritten report", body = [domain::project_reports::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden, or report regeneration is disabled"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "The Project has no answers yet"),
        (status = 502, description = "The language model failed to write the report"),
        (status = 503, description = "The language model is busy or timed out")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn regenerate(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(project_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST regenerate Report for Project {project_id}");

    let project = ProjectApi::find_by_id(app_state.db_conn_ref(), project_id).await?;
    let report = app_state.intake().regenerate_report(&project).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), report)))
}
