//! Query description
//!
//! A `Query` targets one namespace and holds a conjunction of field
//! conditions, an optional sort and an offset/limit window. Evaluation of a
//! single condition against a document field lives here so every store
//! applies the same comparison rules.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Comparison applied by a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CondType {
    /// Equal to any of the values
    Eq,
    /// Member of the value set
    Set,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Between two values, inclusive
    Range,
    /// Field present and not null
    Any,
    /// Field absent or null
    Empty,
}

/// One `field <cond> values` term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Top-level field name
    pub field: String,
    /// Comparison
    pub cond: CondType,
    /// Operands
    pub values: Vec<Value>,
}

impl Condition {
    /// Check operand arity
    pub fn validate(&self) -> StoreResult<()> {
        let arity_ok = match self.cond {
            CondType::Eq | CondType::Set => !self.values.is_empty(),
            CondType::Lt | CondType::Le | CondType::Gt | CondType::Ge => self.values.len() == 1,
            CondType::Range => self.values.len() == 2,
            CondType::Any | CondType::Empty => self.values.is_empty(),
        };
        if arity_ok {
            Ok(())
        } else {
            Err(StoreError::InvalidQuery(format!(
                "condition {:?} on '{}' does not take {} value(s)",
                self.cond,
                self.field,
                self.values.len()
            )))
        }
    }

    /// Evaluate against the field's value in a document
    ///
    /// Array fields match when any element matches.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        let field = match field {
            None | Some(Value::Null) => return self.cond == CondType::Empty,
            Some(v) => v,
        };
        match field {
            Value::Array(elems) => match self.cond {
                CondType::Any => true,
                CondType::Empty => elems.is_empty(),
                _ => elems.iter().any(|e| self.matches_scalar(e)),
            },
            scalar => self.matches_scalar(scalar),
        }
    }

    fn matches_scalar(&self, v: &Value) -> bool {
        let cmp = |operand: &Value| compare_values(v, operand);
        match self.cond {
            CondType::Eq | CondType::Set => self
                .values
                .iter()
                .any(|operand| cmp(operand) == Some(Ordering::Equal)),
            CondType::Lt => cmp(&self.values[0]) == Some(Ordering::Less),
            CondType::Le => matches!(cmp(&self.values[0]), Some(Ordering::Less | Ordering::Equal)),
            CondType::Gt => cmp(&self.values[0]) == Some(Ordering::Greater),
            CondType::Ge => matches!(
                cmp(&self.values[0]),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CondType::Range => {
                matches!(cmp(&self.values[0]), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(cmp(&self.values[1]), Some(Ordering::Less | Ordering::Equal))
            }
            CondType::Any => true,
            CondType::Empty => false,
        }
    }
}

/// Order two JSON scalars of the same kind
///
/// Numbers compare numerically regardless of integer/float representation.
/// Values of different kinds are unordered.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Sort request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    /// Field to sort on
    pub field: String,
    /// Descending order
    pub desc: bool,
}

/// Query against one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Target namespace
    pub namespace: String,
    /// Conditions, all of which must hold
    pub conditions: Vec<Condition>,
    /// Optional sort
    pub sort: Option<SortBy>,
    /// Number of leading matches to skip
    pub offset: usize,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl Query {
    /// Select everything in `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Query {
            namespace: namespace.into(),
            conditions: Vec::new(),
            sort: None,
            offset: 0,
            limit: None,
        }
    }

    /// Add a condition
    pub fn where_cond<I, V>(mut self, field: impl Into<String>, cond: CondType, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.conditions.push(Condition {
            field: field.into(),
            cond,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add `field == value`
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_cond(field, CondType::Eq, [value.into()])
    }

    /// Sort results by `field`
    pub fn sort(mut self, field: impl Into<String>, desc: bool) -> Self {
        self.sort = Some(SortBy {
            field: field.into(),
            desc,
        });
        self
    }

    /// Skip the first `offset` matches
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Return at most `limit` matches
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check every condition's arity
    pub fn validate(&self) -> StoreResult<()> {
        self.conditions.iter().try_for_each(Condition::validate)
    }
}
