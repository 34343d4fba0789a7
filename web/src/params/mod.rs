//! Typed inputs for endpoints whose query strings or bodies don't map onto an
//! entity `Model` directly.
//!
//! Each type deserializes what the client sends and converts into the
//! domain's own input type, so the domain never sees HTTP shapes.

pub(crate) mod answer;
pub(crate) mod project;
pub(crate) mod question;
pub(crate) mod user;
