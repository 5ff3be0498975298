use crate::error::ProcessModelError;
use anyhow::Result;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// # Environment Variables
/// - `LOG_LEVEL`: filter directive, e.g. `info` or `infra=debug,warn` (default: info)
/// - `LOG_USE_JSON`: emit json lines instead of plain text (default: false)
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub use_json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            use_json: false,
        }
    }
}

pub fn load_logging_config_from_env() -> Result<LoggingConfig> {
    envy::prefixed("LOG_")
        .from_env::<LoggingConfig>()
        .map_err(|e| {
            ProcessModelError::RuntimeError(format!("cannot read logging config from env: {:?}", e))
                .into()
        })
}

fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.level).map_err(|e| {
        ProcessModelError::InvalidParameter(format!("invalid log level {}: {:?}", config.level, e))
            .into()
    })
}

// fails if a global subscriber is already installed
pub fn tracing_init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config)?);
    let res = if config.use_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    res.map_err(|e| {
        ProcessModelError::RuntimeError(format!("cannot initialize tracing: {:?}", e)).into()
    })
}
