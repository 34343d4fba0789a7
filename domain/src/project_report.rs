//! Direct access to stored reports. Generating one goes through
//! [`crate::intake::Intake::report`].

pub use entity_api::project_report::{delete_by_id, find_by_id, find_by_project};
