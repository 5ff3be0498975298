// XES event-log document model and its loader

use anyhow::{Context as _, Result};
use procmodel_base::{error::ProcessModelError, loader_config::LoaderConfig, LOADER_CONFIG};
use std::sync::Arc;

use crate::loader::{check_source_size, decode_json_or_yaml, UseLoadUrlOrPath};

pub mod attribute;
pub mod log;

pub use attribute::{find_attribute, Attribute, AttributeBase, AttributeKind, FloatAttribute};
pub use log::{Classifier, Event, Extension, GlobalScope, Globals, Log, Trace};

#[derive(Debug, Clone)]
pub struct XesLogLoader {
    config: Arc<LoaderConfig>,
}

impl UseLoadUrlOrPath for XesLogLoader {
    fn max_source_bytes(&self) -> usize {
        self.config.max_source_bytes
    }
}

impl XesLogLoader {
    pub fn new(config: Arc<LoaderConfig>) -> Self {
        Self { config }
    }

    pub fn new_by_env() -> Self {
        Self::new(Arc::new(LOADER_CONFIG.clone()))
    }

    pub async fn load_log(
        &self,
        url_or_path: Option<&str>,
        json_or_yaml_data: Option<&str>,
    ) -> Result<Log> {
        let log = match (url_or_path, json_or_yaml_data) {
            (Some(url_or_path), None) => self
                .load_url_or_path::<Log>(url_or_path)
                .await
                .with_context(|| format!("Failed to load log from url_or_path: {}", url_or_path))?,
            (None, Some(data)) => {
                check_source_size(data.len(), self.config.max_source_bytes)?;
                decode_json_or_yaml::<Log>(data).context("Failed to parse log from data")?
            }
            _ => {
                return Err(ProcessModelError::InvalidParameter(
                    "exactly one of url_or_path or json_or_yaml_data is required".to_string(),
                )
                .into())
            }
        };
        tracing::debug!(
            "loaded log: traces={}, events={}",
            log.traces.len(),
            log.event_count()
        );
        Ok(log)
    }
}
