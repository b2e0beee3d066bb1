//! Querying committed records

use crate::common::*;
use docfix::CondType;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

#[test]
fn test_reference_scenario() {
    let mut fixture = fixture();
    let def = NamespaceDef::new("items")
        .add_index(IndexDef::new("id", IndexKind::Hash, FieldType::Int).pk())
        .add_index(IndexDef::new("name", IndexKind::Hash, FieldType::String));
    assert_ok(fixture.create_namespace(&def));

    let record = dog();
    let item = assert_ok(fixture.item_from_record("items", &record));
    assert_ok(fixture.upsert_and_commit("items", &item));

    let results = assert_ok(fixture.select(&Query::new("items").where_eq("id", 42), true));
    assert_eq!(results.len(), 1);
    assert_item_matches(results.get_item(0).unwrap(), &record);
}

#[test]
fn test_round_trip_law_for_random_records() {
    let mut fixture = fixture();
    assert_ok(fixture.create_namespace(&keyed_def("q_law")));

    for _ in 0..25 {
        let record = fixture.random_record();
        let item = assert_ok(fixture.item_from_record("q_law", &record));
        assert_ok(fixture.upsert_and_commit("q_law", &item));

        let found = assert_ok(fixture.select(&Query::new("q_law").where_eq("id", record.id), false));
        assert_eq!(found.len(), 1);
        assert_item_matches(found.get_item(0).unwrap(), &record);
    }
}

#[test]
fn test_foreign_key_lookup() {
    let mut fixture = fixture();
    assert_ok(fixture.create_namespace(&full_def("q_fk")));

    let records = [
        FixtureRecord::new(1, 700001, "dog", "red", 1, 1),
        FixtureRecord::new(2, 700001, "car", "blue", 2, 2),
        FixtureRecord::new(3, 700002, "dish", "green", 3, 3),
    ];
    for record in &records {
        let item = assert_ok(fixture.item_from_record("q_fk", record));
        assert_ok(fixture.upsert_and_commit("q_fk", &item));
    }

    let q = Query::new("q_fk").where_eq("fk_id", 700001).sort("id", false);
    let found = assert_ok(fixture.select(&q, false));
    let ids: Vec<String> = found.iter().map(|i| i.field_as_text("id")).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let q = Query::new("q_fk").where_cond("fk_id", CondType::Set, [700002, 700003]);
    assert_eq!(assert_ok(fixture.select(&q, false)).len(), 1);
}

#[test]
fn test_rendered_table_elides_tuple_column() {
    let sink = Captured::default();
    let mut fixture = fixture().with_sink(sink.clone());
    assert_ok(fixture.create_namespace(&keyed_def("q_render")));
    let item = assert_ok(fixture.item_from_record("q_render", &dog()));
    assert_ok(fixture.upsert_and_commit("q_render", &item));

    let results = assert_ok(fixture.select(&Query::new("q_render"), true));
    assert_eq!(results.len(), 1);
    assert_eq!(sink.text(), "\tid\tname\n\t42\tdog\n\n");
}

#[test]
fn test_no_table_unless_asked() {
    let sink = Captured::default();
    let mut fixture = fixture().with_sink(sink.clone());
    assert_ok(fixture.create_namespace(&keyed_def("q_quiet")));
    assert_ok(fixture.select(&Query::new("q_quiet"), false));
    assert!(sink.text().is_empty());
}

#[test]
fn test_failed_select_returns_no_results() {
    let mut fixture = faulty_fixture();
    assert_ok(fixture.create_namespace(&keyed_def("q_fail")));
    fixture.store().fail_select(StoreError::injected("planner crashed"));

    let err = fixture.select(&Query::new("q_fail"), true).unwrap_err();
    assert_eq!(err.store_error(), Some(&StoreError::injected("planner crashed")));
}

#[test]
fn test_query_on_unknown_namespace() {
    let mut fixture = fixture();
    let err = fixture.select(&Query::new("q_missing"), false).unwrap_err();
    assert_eq!(
        err.store_error(),
        Some(&StoreError::NamespaceNotFound("q_missing".to_string()))
    );
}
