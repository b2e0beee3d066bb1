//! Namespace provisioning through the definition cache

use crate::common::*;

#[test]
fn test_cached_schema_reprovisions_same_indexes() {
    let first = fixture();
    let def = full_def("prov_reuse");
    assert_ok(first.create_namespace(&def));

    // A later test with a fresh store reuses the declaration by name only
    let second = fixture().with_defs(first.defs());
    assert_ok(second.create_namespace_from_cache("prov_reuse"));
    assert_eq!(second.store().describe_namespace("prov_reuse").unwrap(), def);
}

#[test]
fn test_ghost_namespace_is_schema_not_found_without_store_calls() {
    let fixture = faulty_fixture();
    let err = fixture.create_namespace_from_cache("ghost").unwrap_err();
    assert_eq!(err.kind(), docfix::ErrorKind::SchemaNotFound);
    assert!(fixture.store().calls().is_empty());
}

#[test]
fn test_failed_index_is_never_cached() {
    let def = full_def("prov_partial");
    for (k, index) in def.indexes.iter().enumerate() {
        let fixture = faulty_fixture();
        fixture
            .store()
            .fail_add_index(index.name.clone(), StoreError::injected("index rejected"));

        let err = fixture.create_namespace(&def).unwrap_err();
        assert_eq!(err.store_error(), Some(&StoreError::injected("index rejected")));
        assert!(fixture.cached_def("prov_partial").is_none(), "cached after failure at {}", k);

        // Namespace exists with exactly the indexes before the failing one
        let partial = fixture.store().inner().describe_namespace("prov_partial").unwrap();
        assert_eq!(partial.indexes, def.indexes[..k].to_vec());
    }
}

#[test]
fn test_failed_reprovision_keeps_previous_cache_entry() {
    let fixture = faulty_fixture();
    let original = keyed_def("prov_keep");
    assert_ok(fixture.create_namespace(&original));

    let extended = full_def("prov_keep");
    fixture
        .store()
        .fail_add_index("color", StoreError::injected("index rejected"));
    assert!(fixture.create_namespace(&extended).is_err());
    assert_eq!(fixture.cached_def("prov_keep"), Some(original));
}

#[test]
fn test_second_create_overwrites_cached_schema() {
    let harness = fixture();
    let first = keyed_def("prov_overwrite");
    let second = NamespaceDef::new("prov_overwrite")
        .add_index(IndexDef::new("id", IndexKind::Tree, FieldType::Int64).pk())
        .add_index(IndexDef::new("color", IndexKind::Hash, FieldType::String));

    assert_ok(harness.create_namespace(&first));
    let later = fixture_with(harness.defs());
    assert_ok(later.create_namespace(&second));
    assert_eq!(harness.cached_def("prov_overwrite"), Some(second.clone()));

    let fresh = fixture_with(harness.defs());
    assert_ok(fresh.create_namespace_from_cache("prov_overwrite"));
    let provisioned = fresh.store().describe_namespace("prov_overwrite").unwrap();
    assert_eq!(provisioned, second);
    assert!(provisioned.index("name").is_none());
}

#[test]
fn test_second_create_on_same_store_adds_indexes() {
    let harness = fixture();
    let first = keyed_def("prov_same_store");
    let second = NamespaceDef::new("prov_same_store")
        .add_index(IndexDef::new("id", IndexKind::Hash, FieldType::Int).pk())
        .add_index(IndexDef::new("color", IndexKind::Hash, FieldType::String));

    assert_ok(harness.create_namespace(&first));
    assert_ok(harness.create_namespace(&second));
    assert_eq!(harness.cached_def("prov_same_store"), Some(second));

    // Indexes are only ever added, so the store keeps "name" from the first schema
    let held = harness.store().describe_namespace("prov_same_store").unwrap();
    let names: Vec<&str> = held.indexes.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "color"]);
}

#[test]
fn test_process_wide_registry_spans_fixtures() {
    let declaring = fixture().with_process_defs();
    assert_ok(declaring.create_namespace(&keyed_def("prov_process_wide")));

    let reusing = fixture().with_process_defs();
    assert_ok(reusing.create_namespace_from_cache("prov_process_wide"));
    assert!(reusing
        .store()
        .describe_namespace("prov_process_wide")
        .is_ok());
}

fn fixture_with(defs: docfix::SharedDefs) -> Fixture {
    fixture().with_defs(defs)
}
