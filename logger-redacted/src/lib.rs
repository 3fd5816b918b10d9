//! Logging for a clinic system where patient contact details must never
//! land in log lines verbatim.
//!
//! Two pieces:
//!
//! - [`init_tracing`] installs a `tracing-subscriber` with `EnvFilter`
//!   (`RUST_LOG` controls verbosity, default `info`).
//! - [`PiiRedactor`] masks emails and phone numbers in free text before
//!   it is handed to a log macro. Callers redact at the call site — the
//!   subscriber itself stays format-agnostic.
//!
//! ```rust
//! use logger_redacted::{PiiRedactor, RedactionConfig};
//!
//! let redactor = PiiRedactor::new(RedactionConfig::default());
//! let line = redactor.redact("confirmation sent to jane.roe@example.com");
//! tracing::info!("{line}");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops so tests can
/// initialize logging without coordinating.
pub fn init_tracing(config: &LoggerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
