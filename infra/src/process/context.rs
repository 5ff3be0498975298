// Scoped contexts attached to a process definition (variable and exception scopes)

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ContextType {
    VariableScope,
    ExceptionScope,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    /// declared type name of the variable
    #[serde(default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub meta_data: HashMap<String, serde_json::Value>,
}

impl Variable {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableScope {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl VariableScope {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self { id: 0, variables }
    }
    pub fn find_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionHandler {
    /// variable receiving the fault data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExceptionScope {
    #[serde(default)]
    pub id: i64,
    /// exception name -> handler
    #[serde(default)]
    pub handlers: HashMap<String, ExceptionHandler>,
}

impl ExceptionScope {
    pub fn handler(&self, exception: &str) -> Option<&ExceptionHandler> {
        self.handlers.get(exception)
    }
    pub fn set_handler(&mut self, exception: impl Into<String>, handler: ExceptionHandler) {
        self.handlers.insert(exception.into(), handler);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Context {
    VariableScope(VariableScope),
    ExceptionScope(ExceptionScope),
}

impl Context {
    pub fn context_type(&self) -> ContextType {
        match self {
            Context::VariableScope(_) => ContextType::VariableScope,
            Context::ExceptionScope(_) => ContextType::ExceptionScope,
        }
    }
    pub fn id(&self) -> i64 {
        match self {
            Context::VariableScope(s) => s.id,
            Context::ExceptionScope(s) => s.id,
        }
    }
    pub fn set_id(&mut self, id: i64) {
        match self {
            Context::VariableScope(s) => s.id = id,
            Context::ExceptionScope(s) => s.id = id,
        }
    }
    /// whether this context declares `name` (a variable or a handled exception)
    pub fn resolve(&self, name: &str) -> bool {
        match self {
            Context::VariableScope(s) => s.find_variable(name).is_some(),
            Context::ExceptionScope(s) => s.handler(name).is_some(),
        }
    }
}

pub trait ContextContainer {
    /// contexts of the given type in insertion order
    fn contexts(&self, context_type: ContextType) -> Vec<&Context>;
    /// Adds a context and returns its id.
    /// A context with id 0 gets the next free id; a context whose type and id are
    /// already present replaces the existing one.
    fn add_context(&mut self, context: Context) -> i64;
    fn context(&self, context_type: ContextType, id: i64) -> Option<&Context>;
    /// Adds (or replaces) the context and marks it as the default of its type.
    fn set_default_context(&mut self, context: Context) -> i64;
    fn default_context(&self, context_type: ContextType) -> Option<&Context>;

    /// the default context when it declares `name`, else the first context that does
    fn resolve_context(&self, context_type: ContextType, name: &str) -> Option<&Context> {
        self.default_context(context_type)
            .filter(|c| c.resolve(name))
            .or_else(|| {
                self.contexts(context_type)
                    .into_iter()
                    .find(|c| c.resolve(name))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextContainerImpl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    default_contexts: HashMap<ContextType, i64>,
}

impl ContextContainerImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    // ids are unique across context types and never 0 (0 means "assign one")
    fn next_id(&self) -> i64 {
        let max_id = self
            .contexts
            .iter()
            .map(Context::id)
            .max()
            .unwrap_or(0)
            .max(0);
        max_id.checked_add(1).unwrap_or_else(|| {
            // i64::MAX is taken: reuse the smallest free positive id
            let used: HashSet<i64> = self.contexts.iter().map(Context::id).collect();
            (1..i64::MAX).find(|id| !used.contains(id)).unwrap_or(i64::MAX)
        })
    }
}

impl ContextContainer for ContextContainerImpl {
    fn contexts(&self, context_type: ContextType) -> Vec<&Context> {
        self.contexts
            .iter()
            .filter(|c| c.context_type() == context_type)
            .collect()
    }

    fn add_context(&mut self, mut context: Context) -> i64 {
        if context.id() == 0 {
            context.set_id(self.next_id());
        }
        let id = context.id();
        let context_type = context.context_type();
        match self
            .contexts
            .iter_mut()
            .find(|c| c.context_type() == context_type && c.id() == id)
        {
            Some(existing) => {
                tracing::debug!("replace context: type={}, id={}", context_type, id);
                *existing = context;
            }
            None => self.contexts.push(context),
        }
        id
    }

    fn context(&self, context_type: ContextType, id: i64) -> Option<&Context> {
        self.contexts
            .iter()
            .find(|c| c.context_type() == context_type && c.id() == id)
    }

    fn set_default_context(&mut self, context: Context) -> i64 {
        let context_type = context.context_type();
        let id = self.add_context(context);
        self.default_contexts.insert(context_type, id);
        id
    }

    fn default_context(&self, context_type: ContextType) -> Option<&Context> {
        self.default_contexts
            .get(&context_type)
            .and_then(|id| self.context(context_type, *id))
    }
}
