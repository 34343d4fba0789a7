use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::project::{IndexParams, UpdateStatusParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{project as ProjectApi, projects::Model, Id};
use log::*;
use service::config::ApiVersion;

/// GET Projects visible to the caller. Clients only ever see their own.
#[utoipa::path(
    get,
    path = "/projects",
    params(
        ApiVersion,
        IndexParams,
    ),
    responses(
        (status = 200, description = "Successfully retrieved Projects", body = [domain::projects::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Projects for User {} with {params:?}", user.id);

    let projects = ProjectApi::find_by(app_state.db_conn_ref(), &user, params.into()).await?;

    debug!("Found {} Projects", projects.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), projects)))
}

/// POST start a new Project owned by the caller
#[utoipa::path(
    post,
    path = "/projects",
    params(ApiVersion),
    request_body = domain::projects::Model,
    responses(
        (status = 201, description = "Successfully created a new Project", body = [domain::projects::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project Type not found"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(project_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Project from: {project_model:?}");

    let project = ProjectApi::create(app_state.db_conn_ref(), project_model, user.id).await?;

    info!("User {} created Project {}", user.id, project.id);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), project)))
}

/// GET a particular Project specified by its id.
#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Project", body = [domain::projects::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Project by id: {id}");

    let project = ProjectApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), project)))
}

/// DELETE soft-remove a Project. Its answers and report are kept.
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Project id to remove")
    ),
    responses(
        (status = 200, description = "Successfully removed the Project", body = [domain::projects::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found")
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
    debug!("DELETE Project by id: {id}");

    let project = ProjectApi::remove(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), project)))
}

/// PUT move a Project along the sales pipeline
#[utoipa::path(
    put,
    path = "/projects/{id}/status",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of the Project to update"),
    ),
    request_body = crate::params::project::UpdateStatusParams,
    responses(
        (status = 200, description = "Successfully updated the Project's status", body = [domain::projects::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_status(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateStatusParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Project {id} status to {}", params.status);

    let project = ProjectApi::update_status(app_state.db_conn_ref(), id, params.status).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), project)))
}
