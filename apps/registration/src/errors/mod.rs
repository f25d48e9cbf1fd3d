//! Error handling for the registration core.

pub mod domain;

pub use domain::{DomainError, PreconditionKind};
