//! Builds routers with real session handling over a `MockDatabase`, and
//! logs a user in so tests can send authenticated requests.

use crate::{controller::user_session_controller, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request},
    routing::post,
    Router,
};
use axum_login::{
    tower_sessions::{Expiry, MemoryStore, SessionManagerLayer},
    AuthManagerLayer, AuthManagerLayerBuilder,
};
use chrono::Utc;
use domain::{roles::Role, user::Backend, users, Id};
use intake_ai::MockProvider;
use password_auth::generate_hash;
use sea_orm::{DatabaseConnection, MockDatabase};
use service::config::{ApiVersion, Config};
use std::sync::Arc;
use time::Duration;
use tower::ServiceExt;

pub(crate) const PASSWORD: &str = "correct horse battery staple";

pub(crate) fn user(role: Role) -> users::Model {
    let now = Utc::now();
    users::Model {
        id: Id::new_v4(),
        email: format!("{role}@intake.local"),
        first_name: "Test".to_string(),
        last_name: role.to_string(),
        display_name: None,
        password: generate_hash(PASSWORD),
        role,
        enabled: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

pub(crate) fn app_state(db: MockDatabase) -> AppState {
    let db: Arc<DatabaseConnection> = Arc::new(db.into_connection());
    AppState::new(
        service::AppState::new(Config::default(), &db),
        Arc::new(MockProvider::new()),
    )
}

/// In-memory stand-in for the Postgres session store used by `init_server`.
pub(crate) fn auth_layer(app_state: &AppState) -> AuthManagerLayer<Backend, MemoryStore> {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));
    let backend = Backend::new(&app_state.service_state.database_connection);
    AuthManagerLayerBuilder::new(backend, session_layer).build()
}

/// Adds `POST /login` plus the session and auth layers to `router`.
pub(crate) fn with_sessions(router: Router<AppState>, app_state: AppState) -> Router {
    let auth_layer = auth_layer(&app_state);

    router
        .route("/login", post(user_session_controller::login))
        .layer(auth_layer)
        .with_state(app_state)
}

/// Logs `user` in and returns the session cookie. Consumes one queued
/// `users` result from the mock database.
pub(crate) async fn login(app: &Router, user: &users::Model) -> String {
    let request = Request::builder()
        .uri("/login")
        .method(Method::POST)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "email={}&password={}",
            user.email,
            PASSWORD.replace(' ', "+")
        )))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|cookie| cookie.to_str().ok())
        .and_then(|cookie| cookie.split(';').next())
        .expect("login should set a session cookie")
        .to_string()
}

pub(crate) fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(ApiVersion::field_name(), ApiVersion::default_version());
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
