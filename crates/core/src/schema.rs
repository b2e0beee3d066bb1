//! Namespace schema types
//!
//! A namespace is declared by a `NamespaceDef`: its name plus an ordered
//! list of `IndexDef`s. Declaration order matters: indexes are added to the
//! store in this order, and an item's field list follows it.

use serde::{Deserialize, Serialize};

/// Value type carried by an indexed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Int64,
    /// Floating point number
    Double,
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
}

impl FieldType {
    /// Whether a JSON scalar is acceptable for this type
    pub fn accepts(&self, value: &serde_json::Value) -> bool {
        match self {
            FieldType::Int => value
                .as_i64()
                .map(|v| i32::try_from(v).is_ok())
                .unwrap_or(false),
            FieldType::Int64 => value.is_i64() || value.is_u64(),
            FieldType::Double => value.is_number(),
            FieldType::String => value.is_string(),
            FieldType::Bool => value.is_boolean(),
        }
    }

    /// Name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Int64 => "int64",
            FieldType::Double => "double",
            FieldType::String => "string",
            FieldType::Bool => "bool",
        }
    }
}

/// Access structure backing an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Unordered, equality lookups
    Hash,
    /// Ordered, range lookups
    Tree,
    /// Column storage only, not searchable through an index
    Store,
}

/// Constraints attached to an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexOpts {
    /// Primary key: identity of an item within its namespace
    #[serde(default)]
    pub pk: bool,
    /// No two items may share a value
    #[serde(default)]
    pub unique: bool,
    /// Field holds an array of values
    #[serde(default)]
    pub array: bool,
}

/// One index declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name, also the top-level field it covers
    pub name: String,
    /// Access structure
    pub kind: IndexKind,
    /// Field value type
    pub field_type: FieldType,
    /// Constraints
    #[serde(default)]
    pub opts: IndexOpts,
}

impl IndexDef {
    /// Declare an index without constraints
    pub fn new(name: impl Into<String>, kind: IndexKind, field_type: FieldType) -> Self {
        IndexDef {
            name: name.into(),
            kind,
            field_type,
            opts: IndexOpts::default(),
        }
    }

    /// Mark as primary key
    pub fn pk(mut self) -> Self {
        self.opts.pk = true;
        self
    }

    /// Mark as unique
    pub fn unique(mut self) -> Self {
        self.opts.unique = true;
        self
    }

    /// Mark as array-valued
    pub fn array(mut self) -> Self {
        self.opts.array = true;
        self
    }

    /// True for pk or unique indexes
    pub fn is_identity(&self) -> bool {
        self.opts.pk || self.opts.unique
    }
}

/// Schema of one namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceDef {
    /// Unique namespace name
    pub name: String,
    /// Index declarations, in the order they are added
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
}

impl NamespaceDef {
    /// Empty schema for `name`
    pub fn new(name: impl Into<String>) -> Self {
        NamespaceDef {
            name: name.into(),
            indexes: Vec::new(),
        }
    }

    /// Append an index declaration
    pub fn add_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Find an index by name
    pub fn index(&self, name: &str) -> Option<&IndexDef> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// The primary-key index, if one is declared
    pub fn pk_index(&self) -> Option<&IndexDef> {
        self.indexes.iter().find(|i| i.opts.pk)
    }
}
