use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::question::ReorderParams;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{question as QuestionApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET the enabled catalog questions of a Project Type in asking order
#[utoipa::path(
    get,
    path = "/project_types/{id}/questions",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project Type id"),
    ),
    responses(
        (status = 200, description = "Successfully retrieved the catalog", body = [domain::questions::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(project_type_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Questions for Project Type {project_type_id}");

    let questions =
        QuestionApi::find_enabled_by_project_type(app_state.db_conn_ref(), project_type_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), questions)))
}

/// PUT renumber a Project Type's catalog to follow the given question order
#[utoipa::path(
    put,
    path = "/project_types/{id}/questions/order",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project Type id"),
    ),
    request_body = crate::params::question::ReorderParams,
    responses(
        (status = 200, description = "Successfully reordered the catalog", body = [domain::questions::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "A question id does not belong to this Project Type")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reorder(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(project_type_id): Path<Id>,
    Json(params): Json<ReorderParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "PUT reorder {} Questions of Project Type {project_type_id}",
        params.question_ids.len()
    );

    let questions =
        QuestionApi::reorder(app_state.db_conn_ref(), project_type_id, &params.question_ids)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), questions)))
}
