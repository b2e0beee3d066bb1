//! Capability set of a backing document store
//!
//! The harness drives a database only through this trait. Implementations
//! report every failure as a `StoreError`; callers pass those through
//! unchanged.

use crate::item::Item;
use crate::results::QueryResults;
use docfix_core::{IndexDef, NamespaceDef, Query, StoreResult};

/// Narrow API of a schema-bearing document store
///
/// Every call is a blocking round trip. Writes made by `upsert` are only
/// guaranteed visible to `select` after `commit` for the same namespace
/// returns `Ok`.
pub trait DocumentStore: Send + Sync {
    /// Open (create if absent) a namespace
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the namespace.
    fn open_namespace(&self, name: &str) -> StoreResult<()>;

    /// Add an index to an open namespace
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is unknown or the definition
    /// conflicts with what the namespace already has.
    fn add_index(&self, namespace: &str, index: &IndexDef) -> StoreResult<()>;

    /// Allocate an empty item bound to `namespace`
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is unknown.
    fn new_item(&self, namespace: &str) -> StoreResult<Item>;

    /// Insert or replace an item, keyed by the namespace's primary key
    ///
    /// # Errors
    ///
    /// Returns an error if the item violates the namespace schema.
    fn upsert(&self, namespace: &str, item: &Item) -> StoreResult<()>;

    /// Make every write to `namespace` visible to subsequent selects
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is unknown or the checkpoint fails.
    fn commit(&self, namespace: &str) -> StoreResult<()>;

    /// Run a query
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is unknown or the query is malformed.
    fn select(&self, query: &Query) -> StoreResult<QueryResults>;

    /// Remove a namespace and everything in it
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is unknown.
    fn drop_namespace(&self, name: &str) -> StoreResult<()>;

    /// Schema the store currently holds for `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is unknown.
    fn describe_namespace(&self, name: &str) -> StoreResult<NamespaceDef>;
}
