//! Core types for docfix
//!
//! This crate defines the vocabulary shared by stores and the harness:
//! - NamespaceDef / IndexDef: declared schema of a namespace
//! - Query / Condition: what a select asks for
//! - StoreError: every failure a store can report

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod query;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use query::{compare_values, CondType, Condition, Query, SortBy};
pub use schema::{FieldType, IndexDef, IndexKind, IndexOpts, NamespaceDef};
