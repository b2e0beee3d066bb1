//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

pub use docfix::{
    assert_ok, DocumentStore, FaultyStore, FieldType, Fixture, FixtureRecord, HarnessConfig,
    IndexDef, IndexKind, Item, MemoryStore, NamespaceDef, Query, StoreCall, StoreError,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Fresh harness over an in-memory store, with test logging installed.
pub fn fixture() -> Fixture {
    docfix::init_test_logging();
    Fixture::new()
}

/// Harness over a fault-injecting store.
pub fn faulty_fixture() -> Fixture<FaultyStore<MemoryStore>> {
    docfix::init_test_logging();
    Fixture::with_store(FaultyStore::new(MemoryStore::new()), HarnessConfig::default())
        .expect("default config is valid")
}

// ============================================================================
// Schemas and records
// ============================================================================

/// `name` with a primary key on `id` and a hash index on `name`.
pub fn keyed_def(name: &str) -> NamespaceDef {
    NamespaceDef::new(name)
        .add_index(IndexDef::new("id", IndexKind::Hash, FieldType::Int).pk())
        .add_index(IndexDef::new("name", IndexKind::Hash, FieldType::String))
}

/// Every fixture attribute indexed, with a foreign key on `fk_id`.
pub fn full_def(name: &str) -> NamespaceDef {
    keyed_def(name)
        .add_index(IndexDef::new("fk_id", IndexKind::Tree, FieldType::Int))
        .add_index(IndexDef::new("color", IndexKind::Hash, FieldType::String))
        .add_index(IndexDef::new("weight", IndexKind::Tree, FieldType::Int))
        .add_index(IndexDef::new("height", IndexKind::Tree, FieldType::Int))
}

/// Pattern with placeholders in substitution order.
pub const RECORD_PATTERN: &str =
    r#"{"id":%d,"fk_id":%d,"name":"%s","color":"%s","weight":%d,"height":%d}"#;

/// The record from the reference scenario.
pub fn dog() -> FixtureRecord {
    FixtureRecord::new(42, 700001, "dog", "blue", 10, 20)
}

/// Assert every fixture attribute of `item` equals `record`.
pub fn assert_item_matches(item: &Item, record: &FixtureRecord) {
    assert_eq!(item.get("id"), Some(&record.id.into()));
    assert_eq!(item.get("fk_id"), Some(&record.fk_id.into()));
    assert_eq!(item.field_as_text("name"), record.name);
    assert_eq!(item.field_as_text("color"), record.color);
    assert_eq!(item.get("weight"), Some(&record.weight.into()));
    assert_eq!(item.get("height"), Some(&record.height.into()));
    assert_eq!(item.document().len(), 6, "unexpected extra fields: {}", item.to_json());
}
