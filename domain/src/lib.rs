//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with records within the domain layer, while the underlying
//! implementation details remain in the `entity_api` crate.
pub use entity_api::{
    ai_answers, ai_questions, answers, project_reports, project_status, project_types, projects,
    question_format, questions, roles, users, Id,
};

pub use entity_api::project::ProjectFilter;

pub mod ai_question;
pub mod answer;
pub mod error;
pub mod intake;
pub mod project;
pub mod project_report;
pub mod project_type;
pub mod question;
pub mod user;

pub mod gateway;
