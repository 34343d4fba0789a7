use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::question::{CreateParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{question as QuestionApi, Id};
use log::*;
use service::config::ApiVersion;

/// POST add a Question to a Project Type's catalog
#[utoipa::path(
    post,
    path = "/questions",
    params(ApiVersion),
    request_body = crate::params::question::CreateParams,
    responses(
        (status = 201, description = "Successfully created a new Question", body = [domain::questions::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project Type or successor Question not found"),
        (status = 409, description = "Another Question already has this number"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Question from: {params:?}");

    let question = QuestionApi::create(app_state.db_conn_ref(), params.into()).await?;

    info!(
        "Created Question {} as number {} of Project Type {}",
        question.id, question.question_no, question.project_type_id
    );

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), question)))
}

/// GET a particular Question specified by its id.
#[utoipa::path(
    get,
    path = "/questions/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Question id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Question", body = [domain::questions::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Question not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Question by id: {id}");

    let question = QuestionApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), question)))
}

/// PUT edit a Question's text, description, format or successor
#[utoipa::path(
    put,
    path = "/questions/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of the Question to edit"),
    ),
    request_body = crate::params::question::UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the Question", body = [domain::questions::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Question or successor Question not found"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT update Question {id} with {params:?}");

    let question = QuestionApi::update(app_state.db_conn_ref(), id, params.into()).await?;

    info!("Updated Question {}", question.id);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), question)))
}

/// PUT take a Question out of its catalog. Existing answers to it are kept.
#[utoipa::path(
    put,
    path = "/questions/{id}/disable",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of the Question to disable"),
    ),
    responses(
        (status = 200, description = "Successfully disabled the Question", body = [domain::questions::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Question not found")
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
    debug!("PUT disable Question {id}");

    let question = QuestionApi::disable(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), question)))
}
