//! Tracing setup shared by both binaries
//!
//! Diagnostics go to stderr so stdout stays reserved for the tagged status
//! lines and the `__DONE__` sentinel.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the `debug` flag.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("navigator=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    // A second init (tests, embedding) is not an error
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
