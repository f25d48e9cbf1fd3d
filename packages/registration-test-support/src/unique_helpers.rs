//! Test helpers for generating unique test data
//!
//! ULID-based so concurrently running tests never collide on identifiers
//! they hand to a shared mock server or session file.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use registration_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("team");
/// let id2 = unique_str("team");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("team-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address with the given prefix
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}

/// Generate a unique bearer-style token
pub fn unique_token() -> String {
    format!("Bearer {}", Ulid::new())
}
