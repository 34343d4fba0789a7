use domain::project_status::ProjectStatus;
use domain::{Id, ProjectFilter};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query string for `GET /projects`. Soft-removed projects are hidden unless
/// `enabled=false` is asked for explicitly.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Case-insensitive match against name or description
    pub(crate) q: Option<String>,
    pub(crate) status: Option<ProjectStatus>,
    #[param(value_type = Option<Uuid>)]
    pub(crate) project_type_id: Option<Id>,
    pub(crate) enabled: Option<bool>,
}

impl From<IndexParams> for ProjectFilter {
    fn from(params: IndexParams) -> Self {
        ProjectFilter {
            user_id: None,
            q: params.q.filter(|q| !q.trim().is_empty()),
            status: params.status,
            project_type_id: params.project_type_id,
            enabled: Some(params.enabled.unwrap_or(true)),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusParams {
    pub(crate) status: ProjectStatus,
}
