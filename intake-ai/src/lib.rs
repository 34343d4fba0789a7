//! Language model abstraction for the client intake interview.
//!
//! This crate knows how to talk *about* an interview to a text-generation
//! model but not how to reach one:
//! - [`traits::completion::Provider`] is the single `complete` operation a
//!   hosted model must offer
//! - [`prompt`] renders project details and the question/answer history into
//!   prompts
//! - [`response`] validates what comes back
//! - [`synthesizer::Synthesizer`] ties the three together
//!
//! Concrete providers live with the application (see the domain crate's
//! Anthropic gateway).

pub mod error;
pub mod prompt;
pub mod response;
pub mod synthesizer;
pub mod traits;
pub mod types;

pub use error::Error;
pub use synthesizer::Synthesizer;
pub use traits::completion::Provider;
pub use types::completion::CompletionRequest;
pub use types::interview::{AskedBy, HistoryEntry, ProjectInfo};

#[cfg(any(test, feature = "mock"))]
pub use traits::completion::MockProvider;
