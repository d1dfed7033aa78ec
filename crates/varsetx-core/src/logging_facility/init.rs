//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at host startup. Later calls are ignored, and so is a failure
/// to install because another subscriber already owns the global slot.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `varsetx=debug` unless `RUST_LOG` is set
/// - **Production**: JSON structured logs, `varsetx=info` unless `RUST_LOG` is set
/// - **Test**: Bare registry; use `init_test_capture()` to assert on events
///
/// # Example
///
/// ```
/// use varsetx_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        // A subscriber the host already installed keeps the global slot
        match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("varsetx=debug")),
                )
                .try_init()
                .ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("varsetx=info")),
                )
                .try_init()
                .ok(),
            Profile::Test => tracing_subscriber::registry().try_init().ok(),
        };
    });
}
