//! Building records and writing them durably

use crate::common::*;
use serde::Serialize;

#[test]
fn test_pattern_item_returns_the_record_it_used() {
    let mut fixture = fixture();
    assert_ok(fixture.create_namespace(&full_def("rt_pattern")));

    let built = assert_ok(fixture.new_item_from_pattern("rt_pattern", RECORD_PATTERN, None));
    assert_item_matches(&built.item, &built.record);

    let explicit = dog();
    let built = assert_ok(fixture.new_item_from_pattern("rt_pattern", RECORD_PATTERN, Some(&explicit)));
    assert_eq!(built.record, explicit);
    assert_item_matches(&built.item, &explicit);
}

#[test]
fn test_pattern_with_bad_payload_is_format_error() {
    let mut fixture = fixture();
    assert_ok(fixture.create_namespace(&keyed_def("rt_bad_pattern")));

    let err = fixture
        .new_item_from_pattern("rt_bad_pattern", r#"{"id":%d,"fk_id":%d,"name":%s}"#, Some(&dog()))
        .unwrap_err();
    assert_eq!(err.kind(), docfix::ErrorKind::Format);
}

#[test]
fn test_pattern_on_unknown_namespace_is_store_error() {
    let mut fixture = fixture();
    let err = fixture
        .new_item_from_pattern("rt_nowhere", RECORD_PATTERN, None)
        .unwrap_err();
    assert_eq!(
        err.store_error(),
        Some(&StoreError::NamespaceNotFound("rt_nowhere".to_string()))
    );
}

#[test]
fn test_typed_builder_accepts_any_serializable_record() {
    #[derive(Serialize)]
    struct Order<'a> {
        id: i64,
        fk_id: i64,
        name: &'a str,
        lines: Vec<u32>,
    }

    let mut fixture = fixture();
    assert_ok(fixture.create_namespace(&keyed_def("rt_typed")));
    let order = Order {
        id: 5,
        fk_id: 700005,
        name: "dinner",
        lines: vec![1, 2],
    };
    let item = assert_ok(fixture.item_from_serialize("rt_typed", &order));
    assert_ok(fixture.upsert_and_commit("rt_typed", &item));

    let found = assert_ok(fixture.select(&Query::new("rt_typed").where_eq("id", 5), false));
    assert_eq!(found.get_item(0).map(|i| i.field_as_text("lines")), Some("[1,2]".to_string()));
}

#[test]
fn test_upsert_failure_never_commits() {
    let fixture = faulty_fixture();
    assert_ok(fixture.create_namespace(&keyed_def("rt_upsert_fail")));
    let item = assert_ok(fixture.item_from_record("rt_upsert_fail", &dog()));

    fixture.store().fail_upsert(StoreError::injected("write refused"));
    fixture.store().clear_calls();
    let err = fixture.upsert_and_commit("rt_upsert_fail", &item).unwrap_err();

    assert_eq!(err.store_error(), Some(&StoreError::injected("write refused")));
    assert!(!fixture
        .store()
        .calls()
        .iter()
        .any(|c| matches!(c, StoreCall::Commit(_))));
}

#[test]
fn test_commit_failure_surfaces_and_write_stays_staged() {
    let mut fixture = faulty_fixture();
    assert_ok(fixture.create_namespace(&keyed_def("rt_commit_fail")));
    let item = assert_ok(fixture.item_from_record("rt_commit_fail", &dog()));

    fixture.store().fail_commit(StoreError::injected("checkpoint failed"));
    let err = fixture.upsert_and_commit("rt_commit_fail", &item).unwrap_err();
    assert_eq!(err.store_error(), Some(&StoreError::injected("checkpoint failed")));

    // Written but not committed: not visible yet, and not rolled back
    fixture.store().heal();
    let before = assert_ok(fixture.select(&Query::new("rt_commit_fail"), false));
    assert!(before.is_empty());
    assert!(fixture.store().inner().has_pending_writes("rt_commit_fail"));
}

#[test]
fn test_store_schema_violation_passes_through() {
    let fixture = fixture();
    assert_ok(fixture.create_namespace(&keyed_def("rt_types")));
    let mut item = assert_ok(fixture.item_from_record("rt_types", &dog()));
    item.set("name", 17);

    let err = fixture.upsert_and_commit("rt_types", &item).unwrap_err();
    assert!(matches!(
        err.store_error(),
        Some(StoreError::FieldType { field, .. }) if field == "name"
    ));
}

#[test]
fn test_random_records_are_written_and_counted() {
    let mut fixture = fixture();
    assert_ok(fixture.create_namespace(&full_def("rt_bulk")));
    let written = assert_ok(fixture.insert_random("rt_bulk", 50));

    let distinct: std::collections::HashSet<i64> = written.iter().map(|r| r.id).collect();
    let all = assert_ok(fixture.select(&Query::new("rt_bulk"), false));
    assert_eq!(all.len(), distinct.len());
}
