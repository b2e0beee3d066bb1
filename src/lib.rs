//! docfix - test harness for schema-bearing document stores
//!
//! docfix lets a test suite exercise a database's indexing and query
//! behavior without re-deriving schema setup or fixture data in every test:
//! declare a namespace once, provision it from the cache anywhere, write
//! synthetic records that are committed before the next query, and inspect
//! results as a table.
//!
//! # Quick Start
//!
//! ```
//! use docfix::{assert_ok, FieldType, Fixture, IndexDef, IndexKind, NamespaceDef, Query};
//!
//! let mut fixture = Fixture::new();
//! let def = NamespaceDef::new("items")
//!     .add_index(IndexDef::new("id", IndexKind::Hash, FieldType::Int).pk())
//!     .add_index(IndexDef::new("name", IndexKind::Hash, FieldType::String));
//! assert_ok(fixture.create_namespace(&def));
//!
//! let written = assert_ok(fixture.insert_random("items", 5));
//! let first = &written[0];
//! let results = assert_ok(fixture.select(&Query::new("items").where_eq("id", first.id), true));
//! assert!(!results.is_empty());
//! ```
//!
//! # Architecture
//!
//! - `docfix-core`: schema, query and store error types
//! - `docfix-store`: the `DocumentStore` trait and the in-memory engine
//! - `docfix-harness`: cache, provisioner, generator, round trip, query runner

pub use docfix_core::{
    CondType, Condition, FieldType, IndexDef, IndexKind, IndexOpts, NamespaceDef, Query, SortBy,
    StoreError, StoreResult,
};
pub use docfix_harness::{
    assert_ok, format_pattern, format_results, init_test_logging, item_from_pattern,
    item_from_record, item_from_serialize, select, upsert_and_commit, ErrorKind, Fixture,
    FixtureGenerator, FixtureRecord, GeneratorConfig, HarnessConfig, HarnessError, HarnessResult,
    IntRange, NamespaceDefs, PartialIndexPolicy, PatternItem, Provisioner, SharedDefs, TestOutput,
};
pub use docfix_store::{
    DocumentStore, FaultyStore, Item, MemoryStore, QueryResults, StoreCall, TUPLE_FIELD,
};
