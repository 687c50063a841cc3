//! Tracing setup shared by the binaries

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::env::{core::LogLevel, EnvVar};

/// Installs the global subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise the level comes from
/// `WORDCLEAN_LOG_LEVEL`, falling back to `info` if that is invalid.
pub fn init_tracing() {
    let (log_level, env_error) = match LogLevel::get() {
        Ok(level) => (level, None),
        Err(e) => ("info".to_string(), Some(e)),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();

    if let Some(e) = env_error {
        tracing::warn!("{}. Falling back to \"info\".", e);
    }
}
