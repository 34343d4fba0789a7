use uuid::Uuid;

// Accounts
pub mod roles;
pub mod users;

// Question catalog
pub mod project_types;
pub mod question_format;
pub mod questions;

// Client engagements and their interview state
pub mod ai_answers;
pub mod ai_questions;
pub mod answers;
pub mod project_reports;
pub mod project_status;
pub mod projects;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
