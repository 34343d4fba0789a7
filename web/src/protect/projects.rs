use crate::protect::{authorize, lookup_failed, Predicate, UserIsAdmin, UserIsOwner};
use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::{project as ProjectApi, users, Id};
use log::*;

/// Checks that the authenticated user owns the project in the path, or is an admin.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn owner_or_admin(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    authorize_project(&app_state, user, project_id, request, next).await
}

/// Shared by every route that reaches a project's data through some other id.
/// A project the client removed is gone as far as they are concerned.
pub(super) async fn authorize_project(
    app_state: &AppState,
    user: users::Model,
    project_id: Id,
    request: Request,
    next: Next,
) -> Response {
    let project = match ProjectApi::find_by_id(app_state.db_conn_ref(), project_id).await {
        Ok(project) if project.enabled || user.is_admin() => project,
        Ok(_) => {
            debug!("Project {project_id} was removed, hiding it from User {}", user.id);
            return (StatusCode::NOT_FOUND, "NOT FOUND").into_response();
        }
        Err(err) => return lookup_failed(err, "Project", project_id),
    };

    let checks = if user.is_admin() {
        vec![Predicate::new(UserIsAdmin, vec![])]
    } else {
        vec![Predicate::new(UserIsOwner, vec![project.user_id])]
    };

    authorize(app_state, user, request, next, checks)
        .await
        .into_response()
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::test_support::{app_state, login, request, user, with_sessions};
    use axum::{http::Method, middleware::from_fn_with_state, routing::get, Router};
    use domain::{project_status::ProjectStatus, projects, roles::Role};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "allowed"
    }

    fn project(owner: Id, enabled: bool) -> projects::Model {
        let now = chrono::Utc::now();
        projects::Model {
            id: Id::new_v4(),
            name: "Bakery storefront".to_string(),
            description: None,
            user_id: owner,
            project_type_id: Id::new_v4(),
            status: ProjectStatus::Proposed,
            enabled,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    // Logs `user` in and requests `/projects/{project_id}` behind the guard,
    // with `lookup` queued as the result of the project query.
    async fn status_for(
        user: users::Model,
        project_id: Id,
        lookup: Vec<projects::Model>,
    ) -> StatusCode {
        let app_state = app_state(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .append_query_results([[user.clone()]])
                .append_query_results([lookup]),
        );
        let router = Router::new()
            .route("/projects/:id", get(test_handler))
            .route_layer(from_fn_with_state(app_state.clone(), owner_or_admin));
        let app = with_sessions(router, app_state);

        let cookie = login(&app, &user).await;
        app.oneshot(request(
            Method::GET,
            &format!("/projects/{project_id}"),
            Some(&cookie),
        ))
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn owner_is_allowed() {
        let client = user(Role::Client);
        let owned = project(client.id, true);

        assert_eq!(
            status_for(client, owned.id, vec![owned.clone()]).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn another_client_is_forbidden() {
        let client = user(Role::Client);
        let foreign = project(Id::new_v4(), true);

        assert_eq!(
            status_for(client, foreign.id, vec![foreign.clone()]).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn admin_is_allowed_on_any_project() {
        let admin = user(Role::Admin);
        let foreign = project(Id::new_v4(), false);

        assert_eq!(
            status_for(admin, foreign.id, vec![foreign.clone()]).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn removed_projects_are_hidden_from_their_owner() {
        let client = user(Role::Client);
        let removed = project(client.id, false);

        assert_eq!(
            status_for(client, removed.id, vec![removed.clone()]).await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        assert_eq!(
            status_for(user(Role::Client), Id::new_v4(), vec![]).await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn database_failure_is_a_server_error_not_a_missing_project() {
        let client = user(Role::Client);
        let app_state = app_state(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[client.clone()]])
                .append_query_results([[client.clone()]])
                .append_query_errors([DbErr::Custom("connection reset".to_string())]),
        );
        let router = Router::new()
            .route("/projects/:id", get(test_handler))
            .route_layer(from_fn_with_state(app_state.clone(), owner_or_admin));
        let app = with_sessions(router, app_state);

        let cookie = login(&app, &client).await;
        let status = app
            .oneshot(request(
                Method::GET,
                &format!("/projects/{}", Id::new_v4()),
                Some(&cookie),
            ))
            .await
            .unwrap()
            .status();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
