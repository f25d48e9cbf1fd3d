#![cfg(test)]

//! Unified test logging initialization
//!
//! Single place where unit tests install a subscriber. A one-time guard
//! prevents double initialization; output goes through the test writer so
//! cargo captures it per test.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// This function is idempotent and race-safe. It can be called multiple times
/// without panicking. The logging level is controlled in this order of precedence:
///
/// 1. `TEST_LOG` environment variable (preferred)
/// 2. `RUST_LOG` environment variable (fallback)
/// 3. `"warn"` (default, quiet)
///
/// The subscriber is configured with:
/// - `with_test_writer()` for cargo/nextest output capture
/// - `without_time()` for stable, clean output
/// - `try_init().ok()` to never panic if already initialized
///
/// # Example Usage
///
/// ```ignore
/// use registration::test_bootstrap::logging::init;
///
/// #[test]
/// fn test_with_logs() {
///     init(); // Safe to call multiple times
///     tracing::debug!("This will be visible when TEST_LOG=debug");
/// }
/// ```
///
/// # Environment Variables
///
/// ```bash
/// # Use TEST_LOG (preferred)
/// TEST_LOG=registration=debug cargo test -p registration
///
/// # Fallback to RUST_LOG
/// RUST_LOG=debug cargo test -p registration
///
/// # Default (warn level)
/// cargo test
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        // Read log level in order: TEST_LOG -> RUST_LOG -> "warn"
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // Critical for cargo/nextest capture
            .without_time() // Stable output
            .try_init()
            .ok(); // Never panic if something else already initialized
    });
}
