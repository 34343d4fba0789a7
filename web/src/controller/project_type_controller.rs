use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{project_type as ProjectTypeApi, project_types::Model, Id};
use log::*;
use service::config::ApiVersion;

/// GET all Project Types a client can start a project with
#[utoipa::path(
    get,
    path = "/project_types",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all enabled Project Types", body = [domain::project_types::Model]),
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
) -> Result<impl IntoResponse, Error> {
    debug!("GET all enabled Project Types");

    let project_types = ProjectTypeApi::find_enabled(app_state.db_conn_ref()).await?;

    debug!("Found {} Project Types", project_types.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), project_types)))
}

/// POST create a new Project Type
#[utoipa::path(
    post,
    path = "/project_types",
    params(ApiVersion),
    request_body = domain::project_types::Model,
    responses(
        (status = 201, description = "Successfully created a new Project Type", body = [domain::project_types::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "A Project Type with this name already exists"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(project_type_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Project Type from: {project_type_model:?}");

    let project_type = ProjectTypeApi::create(app_state.db_conn_ref(), project_type_model).await?;

    info!("Created Project Type {}", project_type.id);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), project_type)))
}

/// PUT disable a Project Type so no new projects can use it
#[utoipa::path(
    put,
    path = "/project_types/{id}/disable",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of the Project Type to disable"),
    ),
    responses(
        (status = 200, description = "Successfully disabled the Project Type", body = [domain::project_types::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project Type not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn disable(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT disable Project Type {id}");

    let project_type = ProjectTypeApi::disable(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), project_type)))
}
