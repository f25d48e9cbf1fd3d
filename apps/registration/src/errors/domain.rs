//! Domain-level error type used by the pure registration logic.
//!
//! This error type is HTTP-agnostic. The API client converts it into
//! `crate::error::ClientError` through the provided `From` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Caller-side contract violations. These point at integration bugs in the
/// presentation layer, never at bad user input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreconditionKind {
    /// A referenced bowler id is not a member of the group
    UnknownBowler,
    /// A bowler was asked to partner with themselves
    SameBowler,
    /// The group is empty, too small for the operation, or over capacity
    GroupSize,
    /// Two members of a group share an id
    DuplicateBowler,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Contract violated by the caller
    Precondition(PreconditionKind, String),
    /// Input/user validation or business rule violation
    Validation(String),
    /// A state change that isn't permitted from the current state
    InvalidTransition(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Precondition(kind, d) => write!(f, "precondition {kind:?}: {d}"),
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::InvalidTransition(d) => write!(f, "invalid transition: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn precondition(kind: PreconditionKind, detail: impl Into<String>) -> Self {
        Self::Precondition(kind, detail.into())
    }
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn invalid_transition(detail: impl Into<String>) -> Self {
        Self::InvalidTransition(detail.into())
    }

    /// True when the error signals a caller bug rather than a user-facing problem.
    pub fn is_precondition(&self) -> bool {
        matches!(self, DomainError::Precondition(..))
    }
}
