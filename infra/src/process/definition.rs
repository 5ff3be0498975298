use super::context::{Context, ContextContainer, ContextContainerImpl, ContextType};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity and compile-time metadata of a process definition.
///
/// Setters never validate: uniqueness and non-empty ids are checked by
/// [`super::registry::ProcessRegistry`] on registration.
pub trait Process: ContextContainer {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);

    fn version(&self) -> &str;
    fn set_version(&mut self, version: String);

    /// process type (e.g. "RuleFlow")
    fn process_type(&self) -> &str;
    fn set_type(&mut self, process_type: String);

    /// where the definition was loaded from
    fn url(&self) -> &str;
    fn set_url(&mut self, url: String);

    fn package_name(&self) -> &str;
    fn set_package_name(&mut self, package_name: String);

    fn meta_data(&self) -> &HashMap<String, serde_json::Value>;
    fn meta_data_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.meta_data().get(name)
    }
    fn set_meta_data(&mut self, name: String, value: serde_json::Value);

    /// fully-qualified type names visible to expressions in the process
    fn imports(&self) -> &[String];
    fn set_imports(&mut self, imports: Vec<String>);

    fn function_imports(&self) -> &[String];
    fn set_function_imports(&mut self, function_imports: Vec<String>);

    /// global variable name -> declared type name
    fn globals(&self) -> &HashMap<String, String>;
    fn set_globals(&mut self, globals: HashMap<String, String>);

    /// Key set of [`Process::globals`], computed on every call (sorted).
    fn global_names(&self) -> Vec<String> {
        self.globals().keys().sorted().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default, rename = "type")]
    process_type: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    package_name: String,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    function_imports: Vec<String>,
    #[serde(default)]
    globals: HashMap<String, String>,
    #[serde(default)]
    meta_data: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "ContextContainerImpl::is_empty")]
    contexts: ContextContainerImpl,
}

impl ProcessDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Process for ProcessDefinition {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn version(&self) -> &str {
        &self.version
    }
    fn set_version(&mut self, version: String) {
        self.version = version;
    }

    fn process_type(&self) -> &str {
        &self.process_type
    }
    fn set_type(&mut self, process_type: String) {
        self.process_type = process_type;
    }

    fn url(&self) -> &str {
        &self.url
    }
    fn set_url(&mut self, url: String) {
        self.url = url;
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }
    fn set_package_name(&mut self, package_name: String) {
        self.package_name = package_name;
    }

    fn meta_data(&self) -> &HashMap<String, serde_json::Value> {
        &self.meta_data
    }
    fn set_meta_data(&mut self, name: String, value: serde_json::Value) {
        self.meta_data.insert(name, value);
    }

    fn imports(&self) -> &[String] {
        &self.imports
    }
    fn set_imports(&mut self, imports: Vec<String>) {
        self.imports = imports;
    }

    fn function_imports(&self) -> &[String] {
        &self.function_imports
    }
    fn set_function_imports(&mut self, function_imports: Vec<String>) {
        self.function_imports = function_imports;
    }

    fn globals(&self) -> &HashMap<String, String> {
        &self.globals
    }
    fn set_globals(&mut self, globals: HashMap<String, String>) {
        self.globals = globals;
    }
}

impl ContextContainer for ProcessDefinition {
    fn contexts(&self, context_type: ContextType) -> Vec<&Context> {
        self.contexts.contexts(context_type)
    }
    fn add_context(&mut self, context: Context) -> i64 {
        self.contexts.add_context(context)
    }
    fn context(&self, context_type: ContextType, id: i64) -> Option<&Context> {
        self.contexts.context(context_type, id)
    }
    fn set_default_context(&mut self, context: Context) -> i64 {
        self.contexts.set_default_context(context)
    }
    fn default_context(&self, context_type: ContextType) -> Option<&Context> {
        self.contexts.default_context(context_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::context::{Variable, VariableScope};
    use serde_json::json;

    #[test]
    fn test_scenario_imports_and_globals() {
        let mut def = ProcessDefinition::default();
        def.set_id("proc1".to_string());
        def.set_imports(vec![
            "java.util.List".to_string(),
            "java.util.Map".to_string(),
        ]);
        def.set_globals(HashMap::from([("counter".to_string(), "int".to_string())]));

        assert_eq!(def.id(), "proc1");
        assert_eq!(def.imports(), ["java.util.List", "java.util.Map"]);
        assert_eq!(def.global_names(), vec!["counter".to_string()]);
    }

    #[test]
    fn test_imports_replace_and_keep_order() {
        let mut def = ProcessDefinition::new("p");
        def.set_imports(vec!["b".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(def.imports(), ["b", "a", "b"]);

        def.set_imports(vec!["c".to_string()]);
        assert_eq!(def.imports(), ["c"]);

        def.set_function_imports(vec!["org.example.Util.max".to_string()]);
        assert_eq!(def.function_imports(), ["org.example.Util.max"]);
        // separate namespace
        assert_eq!(def.imports(), ["c"]);
    }

    #[test]
    fn test_global_names_follow_latest_globals() {
        let mut def = ProcessDefinition::new("p");
        assert!(def.global_names().is_empty());

        def.set_globals(HashMap::from([
            ("list".to_string(), "java.util.List".to_string()),
            ("count".to_string(), "int".to_string()),
        ]));
        assert_eq!(def.global_names(), vec!["count", "list"]);

        def.set_globals(HashMap::from([("other".to_string(), "String".to_string())]));
        assert_eq!(def.global_names(), vec!["other"]);

        def.set_globals(HashMap::new());
        assert!(def.global_names().is_empty());
    }

    #[test]
    fn test_meta_data_overwrites() {
        let mut def = ProcessDefinition::new("p");
        def.set_meta_data("author".to_string(), json!("alice"));
        def.set_meta_data("author".to_string(), json!({"name": "bob"}));
        assert_eq!(def.meta_data().len(), 1);
        assert_eq!(def.meta_data_value("author"), Some(&json!({"name": "bob"})));
        assert!(def.meta_data_value("missing").is_none());
    }

    #[test]
    fn test_setters_accept_empty_values() {
        let mut def = ProcessDefinition::new("p");
        def.set_id(String::new());
        def.set_name("order".to_string());
        def.set_version("1.0".to_string());
        def.set_type("RuleFlow".to_string());
        def.set_url(String::new());
        def.set_package_name("org.example".to_string());
        assert_eq!(def.id(), "");
        assert_eq!(def.name(), "order");
        assert_eq!(def.version(), "1.0");
        assert_eq!(def.process_type(), "RuleFlow");
        assert_eq!(def.url(), "");
        assert_eq!(def.package_name(), "org.example");
    }

    #[test]
    fn test_contexts_through_process() {
        let mut def = ProcessDefinition::new("p");
        def.set_default_context(Context::VariableScope(VariableScope::new(vec![
            Variable::new("counter", "int"),
        ])));
        let ctx = def
            .resolve_context(ContextType::VariableScope, "counter")
            .unwrap();
        assert_eq!(ctx.id(), 1);
    }

    #[test]
    fn test_yaml_field_names() {
        let yaml = r#"
id: order-process
name: Order
version: "2"
type: RuleFlow
packageName: org.example.orders
imports:
  - org.example.Order
functionImports:
  - org.example.Util.total
globals:
  logger: org.example.Logger
metaData:
  priority: 3
contexts:
  contexts:
    - type: variableScope
      id: 1
      variables:
        - name: order
          typeName: org.example.Order
  defaultContexts:
    variableScope: 1
"#;
        let def: ProcessDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id(), "order-process");
        assert_eq!(def.process_type(), "RuleFlow");
        assert_eq!(def.package_name(), "org.example.orders");
        assert_eq!(def.function_imports(), ["org.example.Util.total"]);
        assert_eq!(def.global_names(), vec!["logger"]);
        assert_eq!(def.meta_data_value("priority"), Some(&json!(3)));
        assert!(def
            .default_context(ContextType::VariableScope)
            .unwrap()
            .resolve("order"));

        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "RuleFlow");
        assert_eq!(json["packageName"], "org.example.orders");
    }
}
