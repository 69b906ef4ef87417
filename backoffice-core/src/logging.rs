//! Tracing subscriber setup.
//!
//! Call [`init_tracing`] once at the very start of `main`, before any tracing
//! macro. `RUST_LOG` always wins over the configured filter.

use tracing_subscriber::EnvFilter;

use crate::config::typed::read_or;
use crate::config::{BackofficeConfig, ConfigError, ConfigProperties, PropertyMeta};

const DEFAULT_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{other}` (expected `pretty` or `json`)")),
        }
    }
}

/// `app.log` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Directive string used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl ConfigProperties for LogConfig {
    fn prefix() -> &'static str {
        "app.log"
    }

    fn properties_metadata() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta::with_default(Self::prefix(), "format", "String", "pretty", "Log output format: pretty or json"),
            PropertyMeta::with_default(Self::prefix(), "filter", "String", DEFAULT_FILTER, "Fallback EnvFilter directives"),
        ]
    }

    fn from_config(config: &BackofficeConfig) -> Result<Self, ConfigError> {
        let raw_format: String = read_or(config, Self::prefix(), "format", "pretty".to_string())?;
        let format = raw_format.parse().map_err(|message| ConfigError::Invalid {
            key: format!("{}.format", Self::prefix()),
            message,
        })?;
        let filter = read_or(config, Self::prefix(), "filter", DEFAULT_FILTER.to_string())?;
        Ok(Self { format, filter })
    }
}

/// Initialise the global `tracing` subscriber with a standard `fmt` layer.
///
/// Returns `false` when a global subscriber was already installed (tests
/// commonly call this more than once).
pub fn init_tracing(config: &LogConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Pretty => builder.try_init().is_ok(),
    };
    if installed {
        tracing::debug!(format = ?config.format, "tracing initialised");
    }
    installed
}
