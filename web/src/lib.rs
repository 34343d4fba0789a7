use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use axum_login::AuthManagerLayerBuilder;
use domain::gateway::anthropic::AnthropicClient;
use domain::intake::{Intake, ProjectLocks, Provider};
use log::*;
use sea_orm::DatabaseConnection;
use service::config::{ApiVersion, Config};
use std::sync::Arc;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod protect;
mod router;

#[cfg(test)]
#[cfg(feature = "mock")]
mod test_support;

pub use error::{Error, Result};

/// State handed to every handler: the service infrastructure, the language
/// model used for synthesis and reports, and the per-project synthesis locks.
#[derive(Clone)]
pub struct AppState {
    pub service_state: service::AppState,
    pub llm: Arc<dyn Provider>,
    pub project_locks: ProjectLocks,
}

impl AppState {
    pub fn new(service_state: service::AppState, llm: Arc<dyn Provider>) -> Self {
        Self {
            service_state,
            llm,
            project_locks: ProjectLocks::new(),
        }
    }

    /// Builds the state with the Anthropic Messages API as the language model.
    pub fn with_anthropic(service_state: service::AppState) -> Result<Self> {
        let client = AnthropicClient::new(service_state.config_ref())?;
        Ok(Self::new(service_state, Arc::new(client)))
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.service_state.db_conn_ref()
    }

    pub fn config_ref(&self) -> &Config {
        self.service_state.config_ref()
    }

    /// The interview operations bound to this state for one request.
    pub fn intake(&self) -> Intake<'_> {
        Intake::new(
            self.db_conn_ref(),
            self.config_ref(),
            self.llm.as_ref(),
            &self.project_locks,
        )
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    debug!("Setting up the session store in the intake_platform schema");

    let session_store = PostgresStore::new(
        app_state
            .db_conn_ref()
            .get_postgres_connection_pool()
            .to_owned(),
    )
    .with_schema_name("intake_platform")
    .and_then(|store| store.with_table_name("authorized_sessions"))
    .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    session_store.migrate().await.map_err(|err| {
        error!("Failed to migrate the session store: {err}");
        std::io::Error::new(std::io::ErrorKind::Other, err)
    })?;

    let session_expiry_seconds =
        i64::try_from(app_state.config_ref().backend_session_expiry_seconds).unwrap_or(i64::MAX);
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(app_state.config_ref().is_production())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            session_expiry_seconds,
        )));

    let backend = domain::user::Backend::new(&app_state.service_state.database_connection);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let server_url = format!(
        "{}:{}",
        app_state
            .config_ref()
            .interface
            .as_deref()
            .unwrap_or("127.0.0.1"),
        app_state.config_ref().port
    );
    let listener = TcpListener::bind(&server_url).await?;

    let allowed_origins: Vec<HeaderValue> = app_state
        .config_ref()
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    info!("CORS allowed origins: {allowed_origins:?}");

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::DELETE, Method::GET, Method::POST, Method::PUT])
        .allow_credentials(true)
        .allow_headers([
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static(ApiVersion::field_name()),
        ])
        .expose_headers([HeaderName::from_static(ApiVersion::field_name())])
        .allow_origin(allowed_origins);

    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(
        listener,
        router::define_routes(app_state)
            .layer(cors_layer)
            .layer(auth_layer)
            .into_make_service(),
    )
    .await
}
