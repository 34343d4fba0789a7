use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{answer as AnswerApi, Id};
use log::*;
use serde_json::json;
use service::config::ApiVersion;

/// DELETE an answer to a catalog question
#[utoipa::path(
    delete,
    path = "/answers/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Answer id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Answer"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Answer not found")
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
    debug!("DELETE Answer by id: {id}");

    AnswerApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), json!({"id": id}))))
}
