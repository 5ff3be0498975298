// ProcessLoader: builds ProcessDefinition values from json/yaml sources

use anyhow::{Context as _, Result};
use procmodel_base::{error::ProcessModelError, loader_config::LoaderConfig, LOADER_CONFIG};
use std::sync::Arc;

use crate::loader::{check_source_size, decode_json_or_yaml, UseLoadUrlOrPath};

// Submodule declarations (using parent.rs + parent/ directory structure, not mod.rs)
pub mod context;
pub mod definition;
pub mod registry;

pub use context::{Context, ContextContainer, ContextContainerImpl, ContextType};
pub use definition::{Process, ProcessDefinition};
pub use registry::ProcessRegistry;

#[derive(Debug, Clone)]
pub struct ProcessLoader {
    config: Arc<LoaderConfig>,
}

impl UseLoadUrlOrPath for ProcessLoader {
    fn max_source_bytes(&self) -> usize {
        self.config.max_source_bytes
    }
}

impl ProcessLoader {
    pub fn new(config: Arc<LoaderConfig>) -> Self {
        Self { config }
    }

    /// loader configured from `PROCESS_LOADER_*` environment variables
    pub fn new_by_env() -> Self {
        Self::new(Arc::new(LOADER_CONFIG.clone()))
    }

    /// Load a definition from exactly one source.
    ///
    /// A definition loaded from a location records that location as its url
    /// unless it declares one itself.
    pub async fn load_process(
        &self,
        url_or_path: Option<&str>,
        json_or_yaml_data: Option<&str>,
    ) -> Result<ProcessDefinition> {
        let mut def = match (url_or_path, json_or_yaml_data) {
            (Some(url_or_path), None) => {
                tracing::debug!("process url_or_path: {}", url_or_path);
                let mut def = self
                    .load_url_or_path::<ProcessDefinition>(url_or_path)
                    .await
                    .with_context(|| {
                        format!("Failed to load process from url_or_path: {}", url_or_path)
                    })?;
                if def.url().is_empty() {
                    def.set_url(url_or_path.to_string());
                }
                def
            }
            (None, Some(data)) => {
                check_source_size(data.len(), self.config.max_source_bytes)?;
                decode_json_or_yaml::<ProcessDefinition>(data)
                    .context("Failed to parse process from data")?
            }
            (Some(_), Some(_)) => {
                return Err(ProcessModelError::InvalidParameter(
                    "specify only one of url_or_path or json_or_yaml_data".to_string(),
                )
                .into())
            }
            (None, None) => {
                return Err(ProcessModelError::InvalidParameter(
                    "url_or_path or json_or_yaml_data is required".to_string(),
                )
                .into())
            }
        };
        if def.package_name().is_empty() {
            if let Some(package_name) = &self.config.default_package_name {
                def.set_package_name(package_name.clone());
            }
        }
        tracing::debug!(
            "loaded process: id={}, name={}, version={}",
            def.id(),
            def.name(),
            def.version()
        );
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(default_package_name: Option<&str>) -> ProcessLoader {
        ProcessLoader::new(Arc::new(LoaderConfig {
            max_source_bytes: 1024,
            default_package_name: default_package_name.map(str::to_string),
        }))
    }

    #[tokio::test]
    async fn test_load_process_from_data() {
        let def = loader(None)
            .load_process(None, Some(r#"{"id":"proc1","imports":["a.B"]}"#))
            .await
            .unwrap();
        assert_eq!(def.id(), "proc1");
        assert_eq!(def.imports(), ["a.B"]);
        assert_eq!(def.url(), "");
        assert_eq!(def.package_name(), "");
    }

    #[tokio::test]
    async fn test_default_package_name() {
        let loader = loader(Some("org.default"));
        let def = loader.load_process(None, Some("id: p1\n")).await.unwrap();
        assert_eq!(def.package_name(), "org.default");

        let def = loader
            .load_process(None, Some("id: p2\npackageName: org.own\n"))
            .await
            .unwrap();
        assert_eq!(def.package_name(), "org.own");
    }

    #[tokio::test]
    async fn test_source_arguments() {
        let loader = loader(None);
        let err = loader.load_process(None, None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProcessModelError>(),
            Some(ProcessModelError::InvalidParameter(_))
        ));
        assert!(loader
            .load_process(Some("a.yaml"), Some("id: a"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_rejects_oversized_data() {
        let data = format!("id: {}\n", "x".repeat(2048));
        let err = loader(None).load_process(None, Some(data.as_str())).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProcessModelError>(),
            Some(ProcessModelError::InvalidParameter(_))
        ));
    }
}
