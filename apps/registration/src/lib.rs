#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod session;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use client::{DirectorClient, RegistrationClient};
pub use config::ApiConfig;
pub use domain::doubles::reconcile;
pub use domain::roster::{BowlerId, GroupMember, PartnerGroup};
pub use error::ClientError;
pub use errors::{DomainError, PreconditionKind};
pub use session::{DirectorSession, FileSessionStore, MemorySessionStore, SessionStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
