//! Clients for the third-party services the domain layer calls out to.

pub mod anthropic;
pub mod http;
