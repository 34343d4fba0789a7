use crate::{
    controller::health_check_controller, middleware::auth::require_auth, params, protect, AppState,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};

use crate::controller::{
    answer_controller, project, project_controller, project_type, project_type_controller,
    question_controller, report_controller, user_controller, user_session_controller,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Intake Platform API"
        ),
        paths(
            answer_controller::delete,
            health_check_controller::health_check,
            project_controller::index,
            project_controller::create,
            project_controller::read,
            project_controller::delete,
            project_controller::update_status,
            project::ai_question_controller::index,
            project::answer_controller::index,
            project::answer_controller::create,
            project::next_question_controller::read,
            project::report_controller::read,
            project::report_controller::regenerate,
            project_type_controller::index,
            project_type_controller::create,
            project_type_controller::disable,
            project_type::question_controller::index,
            project_type::question_controller::reorder,
            question_controller::create,
            question_controller::read,
            question_controller::update,
            question_controller::disable,
            report_controller::delete,
            user_controller::me,
            user_controller::index,
            user_controller::toggle,
            user_session_controller::login,
            user_session_controller::signup,
            user_session_controller::delete,
        ),
        components(
            schemas(
                domain::ai_answers::Model,
                domain::ai_questions::Model,
                domain::answers::Model,
                domain::project_reports::Model,
                domain::project_status::ProjectStatus,
                domain::project_types::Model,
                domain::projects::Model,
                domain::question_format::QuestionFormat,
                domain::questions::Model,
                domain::users::Model,
                domain::user::Credentials,
                params::answer::CreateParams,
                params::project::UpdateStatusParams,
                params::question::CreateParams,
                params::question::ReorderParams,
                params::question::UpdateParams,
                params::user::SignupParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "intake_platform", description = "Client intake interviews and requirements reports")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value returned from successful login via Set-Cookie header",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(answer_routes(app_state.clone()))
        .merge(health_routes())
        .merge(project_routes(app_state.clone()))
        .merge(project_interview_routes(app_state.clone()))
        .merge(project_report_routes(app_state.clone()))
        .merge(project_type_routes(app_state.clone()))
        .merge(question_routes(app_state.clone()))
        .merge(user_routes(app_state.clone()))
        .merge(user_session_routes(app_state.clone()))
        .merge(user_session_protected_routes(app_state.clone()))
        // TODO: put the OpenAPI web UI behind require_auth once the frontend logs in first
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn answer_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/answers/:id", delete(answer_controller::delete))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            protect::answers::delete,
        ))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn project_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/projects", get(project_controller::index))
        .route("/projects", post(project_controller::create))
        .merge(
            // GET, DELETE /projects/:id
            Router::new()
                .route("/projects/:id", get(project_controller::read))
                .route("/projects/:id", delete(project_controller::delete))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::projects::owner_or_admin,
                )),
        )
        .merge(
            // PUT /projects/:id/status
            Router::new()
                .route(
                    "/projects/:id/status",
                    put(project_controller::update_status),
                )
                .route_layer(from_fn_with_state(app_state.clone(), protect::admin)),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn project_interview_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(
            Router::new()
                .route(
                    "/projects/:id/next_question",
                    get(project::next_question_controller::read),
                )
                .route(
                    "/projects/:id/answers",
                    get(project::answer_controller::index),
                )
                .route(
                    "/projects/:id/answers",
                    post(project::answer_controller::create),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::projects::owner_or_admin,
                )),
        )
        .merge(
            // GET /projects/:id/ai_questions
            Router::new()
                .route(
                    "/projects/:id/ai_questions",
                    get(project::ai_question_controller::index),
                )
                .route_layer(from_fn_with_state(app_state.clone(), protect::admin)),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn project_report_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(
            // GET /projects/:id/report
            Router::new()
                .route(
                    "/projects/:id/report",
                    get(project::report_controller::read),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::projects::owner_or_admin,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/projects/:id/report/regenerate",
                    post(project::report_controller::regenerate),
                )
                .route("/reports/:id", delete(report_controller::delete))
                .route_layer(from_fn_with_state(app_state.clone(), protect::admin)),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn project_type_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/project_types", get(project_type_controller::index))
        .route(
            "/project_types/:id/questions",
            get(project_type::question_controller::index),
        )
        .merge(
            Router::new()
                .route("/project_types", post(project_type_controller::create))
                .route(
                    "/project_types/:id/disable",
                    put(project_type_controller::disable),
                )
                .route(
                    "/project_types/:id/questions/order",
                    put(project_type::question_controller::reorder),
                )
                .route_layer(from_fn_with_state(app_state.clone(), protect::admin)),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn question_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/questions/:id", get(question_controller::read))
        .merge(
            Router::new()
                .route("/questions", post(question_controller::create))
                .route("/questions/:id", put(question_controller::update))
                .route(
                    "/questions/:id/disable",
                    put(question_controller::disable),
                )
                .route_layer(from_fn_with_state(app_state.clone(), protect::admin)),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/me", get(user_controller::me))
        .merge(
            Router::new()
                .route("/users", get(user_controller::index))
                .route("/users/:id/toggle", put(user_controller::toggle))
                .route_layer(from_fn_with_state(app_state.clone(), protect::admin)),
        )
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

pub fn user_session_protected_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/logout", delete(user_session_controller::delete))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

pub fn user_session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(user_session_controller::login))
        .route("/signup", post(user_session_controller::signup))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_the_interview_routes() {
        let doc = ApiDoc::openapi();

        for path in [
            "/projects/{id}/next_question",
            "/projects/{id}/answers",
            "/projects/{id}/report",
            "/projects/{id}/report/regenerate",
            "/project_types/{id}/questions/order",
            "/signup",
            "/me",
            "/users/{id}/toggle",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn openapi_document_declares_cookie_auth() {
        let doc = ApiDoc::openapi();

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("cookie_auth"));
    }
}
