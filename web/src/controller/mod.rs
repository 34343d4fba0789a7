use serde::Serialize;
pub(crate) mod answer_controller;
pub(crate) mod health_check_controller;
pub(crate) mod project;
pub(crate) mod project_controller;
pub(crate) mod project_type;
pub(crate) mod project_type_controller;
pub(crate) mod question_controller;
pub(crate) mod report_controller;
pub(crate) mod user_controller;
pub(crate) mod user_session_controller;

/// Envelope for every successful JSON response.
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, data: T) -> Self {
        Self {
            status_code,
            data: Some(data),
        }
    }
}
