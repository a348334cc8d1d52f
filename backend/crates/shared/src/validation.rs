//! Validation error tree
//!
//! Request bodies are validated field by field and every failure is kept, so
//! a client can highlight all offending inputs at once. The serialised shape:
//!
//! ```json
//! { "errors": ["root level messages"],
//!   "properties": { "email": { "errors": ["Invalid email address"] } } }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

/// Tree of validation messages, one node per object level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ValidationErrors>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree holding a single root-level message
    pub fn root(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(message);
        errors
    }

    /// Add a root-level message
    pub fn add(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Add a message to a direct child property
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field(field).add(message);
    }

    /// Child node for `field`, created on first access
    pub fn field(&mut self, field: &str) -> &mut ValidationErrors {
        self.properties.entry(field.to_string()).or_default()
    }

    /// Graft a nested tree (e.g. one element of an array) under `field`
    pub fn merge_field(&mut self, field: &str, nested: ValidationErrors) {
        if nested.is_empty() {
            return;
        }
        let node = self.field(field);
        node.errors.extend(nested.errors);
        for (key, child) in nested.properties {
            node.merge_field(&key, child);
        }
    }

    /// Messages recorded for a direct child property
    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.properties.get(field).map(|node| node.errors.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.properties.values().all(ValidationErrors::is_empty)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Semantic validation run after a body has been deserialised
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
