use super::attribute::{find_attribute, Attribute};
use serde::{Deserialize, Serialize};

/// standard key naming traces and events (concept extension)
pub const CONCEPT_NAME_KEY: &str = "concept:name";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    pub prefix: String,
    pub uri: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GlobalScope {
    Trace,
    Event,
}

/// default attributes every trace or event of the log carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    pub scope: GlobalScope,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    pub name: String,
    /// whitespace separated attribute keys
    pub keys: String,
}

impl Classifier {
    pub fn key_list(&self) -> Vec<&str> {
        self.keys.split_whitespace().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Event {
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        find_attribute(&self.attributes, key)
    }
    pub fn name(&self) -> Option<&str> {
        self.attribute(CONCEPT_NAME_KEY).and_then(Attribute::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Trace {
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        find_attribute(&self.attributes, key)
    }
    pub fn name(&self) -> Option<&str> {
        self.attribute(CONCEPT_NAME_KEY).and_then(Attribute::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xes_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xes_features: Option<String>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub globals: Vec<Globals>,
    #[serde(default)]
    pub classifiers: Vec<Classifier>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub traces: Vec<Trace>,
}

impl Log {
    pub fn globals_for(&self, scope: GlobalScope) -> Vec<&Attribute> {
        self.globals
            .iter()
            .filter(|g| g.scope == scope)
            .flat_map(|g| g.attributes.iter())
            .collect()
    }

    pub fn classifier(&self, name: &str) -> Option<&Classifier> {
        self.classifiers.iter().find(|c| c.name == name)
    }

    pub fn extension(&self, prefix: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.prefix == prefix)
    }

    pub fn event_count(&self) -> usize {
        self.traces.iter().map(|t| t.events.len()).sum()
    }
}
