//! The output document schemas are written into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every schema reference handed out by the registry.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Reference string for the schema named `name`.
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{name}")
}

/// An OpenAPI document, reduced to the parts the registry writes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub components: Components,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    /// Schema bodies by name (sorted for deterministic output).
    #[serde(default)]
    pub schemas: BTreeMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.components.schemas.get(name)
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.components.schemas.contains_key(name)
    }

    /// Write a schema body, returning the body it replaced.
    pub fn insert_schema(&mut self, name: impl Into<String>, body: Value) -> Option<Value> {
        self.components.schemas.insert(name.into(), body)
    }

    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.components.schemas.keys().map(String::as_str)
    }

    pub fn schema_count(&self) -> usize {
        self.components.schemas.len()
    }
}
