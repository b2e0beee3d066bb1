//! Item: one record bound to a namespace
//!
//! An `Item` is obtained from a store with `new_item`, filled through
//! `set` or `from_json`, and handed back to the store for writing. Its field
//! list is fixed at allocation: field 0 is the internal `-tuple` column
//! (the whole document), followed by the namespace's indexes in declaration
//! order. Non-indexed fields live in the document and are still reachable by
//! name through `get` and `field_as_text`.

use docfix_core::{StoreError, StoreResult};
use serde_json::{Map, Value};

/// Name of the internal column holding the whole document
pub const TUPLE_FIELD: &str = "-tuple";

/// Store-owned handle to one record
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    namespace: String,
    fields: Vec<String>,
    doc: Map<String, Value>,
}

impl Item {
    /// Empty item whose payload columns are `indexed`
    pub fn new(namespace: impl Into<String>, indexed: impl IntoIterator<Item = String>) -> Self {
        let mut fields = vec![TUPLE_FIELD.to_string()];
        fields.extend(indexed);
        Item {
            namespace: namespace.into(),
            fields,
            doc: Map::new(),
        }
    }

    /// Namespace this item is bound to
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of payload columns, including `-tuple`
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Name of the i-th payload column
    pub fn field_name(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// Assign a top-level field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.doc.insert(field.into(), value.into());
        self
    }

    /// Read a top-level field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.doc.get(field)
    }

    /// Field rendered as display text; absent and null render empty
    pub fn field_as_text(&self, field: &str) -> String {
        if field == TUPLE_FIELD {
            return self.to_json();
        }
        self.doc.get(field).map(value_as_text).unwrap_or_default()
    }

    /// Replace the document with a parsed JSON object
    #[allow(clippy::wrong_self_convention)]
    pub fn from_json(&mut self, text: &str) -> StoreResult<()> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(doc) => {
                self.doc = doc;
                Ok(())
            }
            other => Err(StoreError::Parse(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Document serialized as compact JSON
    pub fn to_json(&self) -> String {
        Value::Object(self.doc.clone()).to_string()
    }

    /// Borrow the document
    pub fn document(&self) -> &Map<String, Value> {
        &self.doc
    }

    pub(crate) fn with_document(mut self, doc: Map<String, Value>) -> Self {
        self.doc = doc;
        self
    }
}

/// Text form of a JSON value for display
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON type name used in diagnostics
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
