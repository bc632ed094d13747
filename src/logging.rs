//! Logging setup.
//!
//! Logs go to **stderr**; stdout is reserved for the handshake line the
//! engine reads on startup. `RUST_LOG` controls filtering, e.g.
//!
//! ```bash
//! RUST_LOG=readarr_provider=debug ./readarr-provider
//! ```

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LEVEL: &str = "info";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn install(default_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
}

/// Install the global subscriber at [`DEFAULT_LEVEL`].
///
/// Returns false if a subscriber was already installed.
pub fn init_logging() -> bool {
    install(DEFAULT_LEVEL).is_ok()
}

/// Like [`init_logging`] with another default level.
pub fn init_logging_with_default(default_level: &str) -> bool {
    install(default_level).is_ok()
}
