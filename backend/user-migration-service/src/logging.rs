//! Process-wide tracing setup for the trigger binaries.

use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, what CloudWatch Logs Insights expects
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Deserialize)]
struct LoggingConfig {
    #[serde(default)]
    log_format: LogFormat,
}

impl LogFormat {
    /// Read `LOG_FORMAT`, falling back to JSON when unset or unknown
    pub fn from_env() -> Self {
        envy::from_env::<LoggingConfig>()
            .map(|c| c.log_format)
            .unwrap_or_default()
    }
}

/// Install the global subscriber. Must be called once, before the runtime starts.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_current_span(true)
                    .without_time(),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .init(),
    }
}
