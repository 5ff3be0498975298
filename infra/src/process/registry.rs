use super::definition::{Process, ProcessDefinition};
use anyhow::Result;
use dashmap::DashMap;
use itertools::Itertools;
use procmodel_base::error::ProcessModelError;
use std::sync::Arc;

/// Registered process definitions keyed by id.
///
/// Definitions are frozen on registration: callers only get shared
/// `Arc<ProcessDefinition>` handles back.
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    processes: Arc<DashMap<String, Arc<ProcessDefinition>>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, definition: ProcessDefinition) -> Result<Arc<ProcessDefinition>> {
        if definition.id().is_empty() {
            return Err(ProcessModelError::InvalidParameter(format!(
                "process id must not be empty: name={}",
                definition.name()
            ))
            .into());
        }
        match self.processes.entry(definition.id().to_string()) {
            dashmap::mapref::entry::Entry::Occupied(e) => Err(ProcessModelError::AlreadyExists(
                format!("process already registered: id={}", e.key()),
            )
            .into()),
            dashmap::mapref::entry::Entry::Vacant(e) => {
                tracing::debug!(
                    "register process: id={}, version={}",
                    definition.id(),
                    definition.version()
                );
                let definition = Arc::new(definition);
                e.insert(definition.clone());
                Ok(definition)
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<Arc<ProcessDefinition>> {
        self.processes.get(id).map(|r| r.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<Arc<ProcessDefinition>> {
        self.processes.remove(id).map(|(_, v)| {
            tracing::debug!("removed process: id={}", id);
            v
        })
    }

    pub fn ids(&self) -> Vec<String> {
        self.processes
            .iter()
            .map(|r| r.key().clone())
            .sorted()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
