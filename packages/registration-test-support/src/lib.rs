//! Registration test support utilities
//!
//! Shared by the registration crate's unit and integration tests and by the
//! roster CLI tests: unified logging initialization, unique identifiers, and
//! API-shaped JSON fixtures.

pub mod fixtures;
pub mod logging;
pub mod unique_helpers;
