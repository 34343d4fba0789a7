use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::user::IndexParams;
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{user as UserApi, Id};
use log::*;
use service::config::ApiVersion;

/// GET the logged in User
#[utoipa::path(
    get,
    path = "/me",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved the session's User", body = domain::users::Model),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn me(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, Error> {
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

/// GET every User matching the filters, newest first
#[utoipa::path(
    get,
    path = "/users",
    params(
        ApiVersion,
        IndexParams,
    ),
    responses(
        (status = 200, description = "Successfully retrieved Users", body = [domain::users::Model]),
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
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Users with {params:?}");

    let users = UserApi::find_by(app_state.db_conn_ref(), params.into()).await?;

    debug!("Found {} Users", users.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), users)))
}

/// PUT enable a disabled User or disable an enabled one
#[utoipa::path(
    put,
    path = "/users/{id}/toggle",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Id of the User to enable or disable"),
    ),
    responses(
        (status = 200, description = "Successfully toggled the User", body = domain::users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Admins cannot toggle their own account")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn toggle(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(admin): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT toggle User {id}");

    let user = UserApi::toggle_enabled(app_state.db_conn_ref(), admin.id, id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use crate::router::define_routes;
    use crate::test_support::{app_state, auth_layer, login, request, user};
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use domain::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(db: MockDatabase) -> Router {
        let app_state = app_state(db);
        let auth_layer = auth_layer(&app_state);
        define_routes(app_state).layer(auth_layer)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn me_returns_the_session_user_without_the_password() {
        let client = user(Role::Client);
        let app = app(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[client.clone()], [client.clone()]]));

        let cookie = login(&app, &client).await;
        let response = app
            .oneshot(request(Method::GET, "/me", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["email"], client.email.as_str());
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn clients_cannot_list_users() {
        let client = user(Role::Client);
        let app = app(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[client.clone()], [client.clone()]]));

        let cookie = login(&app, &client).await;
        let response = app
            .oneshot(request(Method::GET, "/users", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admins_list_users() {
        let admin = user(Role::Admin);
        let client = user(Role::Client);
        let app = app(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[admin.clone()], [admin.clone()]])
            .append_query_results([vec![client.clone(), admin.clone()]]));

        let cookie = login(&app, &admin).await;
        let response = app
            .oneshot(request(Method::GET, "/users?role=client", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn admins_cannot_toggle_themselves() {
        let admin = user(Role::Admin);
        let app = app(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[admin.clone()], [admin.clone()]]));

        let cookie = login(&app, &admin).await;
        let response = app
            .oneshot(request(
                Method::PUT,
                &format!("/users/{}/toggle", admin.id),
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
