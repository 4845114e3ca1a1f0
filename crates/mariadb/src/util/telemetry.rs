use tracing_subscriber::{prelude::*, EnvFilter, Registry};

use crate::util::errors::{Error, Result};

/// Initialize tracing
///
/// Logs are written to stderr so that binaries can keep stdout for their output.
/// The filter is read from `RUST_LOG` and falls back to `info`.
pub fn init() -> Result<()> {
    let logger = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| Error::TelemetryError(e.to_string()))?;

    let collector = Registry::default().with(logger).with(env_filter);

    tracing::subscriber::set_global_default(collector).map_err(|e| Error::TelemetryError(e.to_string()))
}
