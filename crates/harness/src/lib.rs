//! Test harness for a schema-bearing document store
//!
//! Drives a `DocumentStore` the way an indexing/query test suite needs:
//! - NamespaceDefs: registry of schemas, written only after full provisioning
//! - Provisioner: opens namespaces and adds their indexes, fail-fast
//! - FixtureGenerator: synthetic records from bounded pools and ranges
//! - roundtrip: item builders plus write-then-commit
//! - query: select with optional tab-separated rendering
//! - Fixture: all of the above bound to one store for one test
//!
//! # Example
//!
//! ```
//! use docfix_core::{FieldType, IndexDef, IndexKind, NamespaceDef, Query};
//! use docfix_harness::{assert_ok, Fixture, FixtureRecord};
//!
//! let mut fixture = Fixture::new();
//! let def = NamespaceDef::new("items")
//!     .add_index(IndexDef::new("id", IndexKind::Hash, FieldType::Int).pk());
//! assert_ok(fixture.create_namespace(&def));
//!
//! let record = FixtureRecord::new(42, 700001, "dog", "blue", 10, 20);
//! let item = assert_ok(fixture.item_from_record("items", &record));
//! assert_ok(fixture.upsert_and_commit("items", &item));
//!
//! let results = assert_ok(fixture.select(&Query::new("items").where_eq("id", 42), false));
//! assert_eq!(results.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod logging;
pub mod provision;
pub mod query;
pub mod roundtrip;

pub use cache::{NamespaceDefs, SharedDefs};
pub use config::{GeneratorConfig, HarnessConfig, IntRange, PartialIndexPolicy};
pub use error::{ErrorKind, HarnessError, HarnessResult};
pub use fixture::{assert_ok, Fixture};
pub use generator::{FixtureGenerator, FixtureRecord};
pub use logging::{init_test_logging, TestOutput};
pub use provision::Provisioner;
pub use query::{format_results, select};
pub use roundtrip::{
    format_pattern, item_from_pattern, item_from_record, item_from_serialize, upsert_and_commit,
    PatternItem,
};
