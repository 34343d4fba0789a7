use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{project_report as ProjectReportApi, Id};
use log::*;
use serde_json::json;
use service::config::ApiVersion;

/// DELETE a report; the next `GET /projects/{id}/report` writes a fresh one
#[utoipa::path(
    delete,
    path = "/reports/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Report id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Report"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Report by id: {id}");

    ProjectReportApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    info!("Deleted Report {id}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), json!({"id": id}))))
}
