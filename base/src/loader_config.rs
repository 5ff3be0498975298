use crate::error::ProcessModelError;
use anyhow::Result;
use serde::Deserialize;

/// Maximum size of a definition or log source read from disk (10MB)
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for loading process definitions and XES logs
///
/// # Environment Variables
/// - `PROCESS_LOADER_MAX_SOURCE_BYTES`: reject sources larger than this (default: 10MB)
/// - `PROCESS_LOADER_DEFAULT_PACKAGE_NAME`: package name given to definitions that declare none
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LoaderConfig {
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
    #[serde(default)]
    pub default_package_name: Option<String>,
}

fn default_max_source_bytes() -> usize {
    DEFAULT_MAX_SOURCE_BYTES
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
            default_package_name: None,
        }
    }
}

impl LoaderConfig {
    pub const ENV_PREFIX: &'static str = "PROCESS_LOADER_";

    pub fn from_env() -> Self {
        Self::from_env_prefixed(Self::ENV_PREFIX)
            .inspect_err(|e| tracing::warn!("use default LoaderConfig: {:?}", e))
            .unwrap_or_default()
    }

    pub fn from_env_prefixed(prefix: &str) -> Result<Self> {
        envy::prefixed(prefix)
            .from_env::<LoaderConfig>()
            .map_err(|e| {
                ProcessModelError::RuntimeError(format!(
                    "cannot read loader config from env: {:?}",
                    e
                ))
                .into()
            })
    }
}
