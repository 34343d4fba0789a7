use domain::roles::Role;
use domain::user::{NewUser, UserFilter};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SignupParams {
    pub(crate) email: String,
    /// At least 8 characters
    pub(crate) password: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) display_name: Option<String>,
}

impl From<SignupParams> for NewUser {
    fn from(params: SignupParams) -> Self {
        NewUser {
            email: params.email,
            password: params.password,
            first_name: params.first_name,
            last_name: params.last_name,
            display_name: params.display_name,
        }
    }
}

/// Query string for `GET /users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    pub(crate) role: Option<Role>,
    pub(crate) enabled: Option<bool>,
    /// Case-insensitive match against email, first or last name
    pub(crate) q: Option<String>,
}

impl From<IndexParams> for UserFilter {
    fn from(params: IndexParams) -> Self {
        UserFilter {
            role: params.role,
            enabled: params.enabled,
            search: params.q,
        }
    }
}
