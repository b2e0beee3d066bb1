//! Query runner and result rendering
//!
//! `select` submits a query and hands the results back untouched. When
//! asked, it also writes them to a sink as a tab-separated table: the header
//! is every payload column of a fresh item for the namespace except column
//! 0 (`-tuple`), and each row shows the same columns for one result. Every
//! line starts with a tab, and the table ends with a blank line.

use crate::error::HarnessResult;
use docfix_core::Query;
use docfix_store::{DocumentStore, Item, QueryResults};
use std::io::Write;
use tracing::{debug, warn};

/// Run `query`; render the results into `sink` when one is given
///
/// Rendering problems are logged and never change what is returned.
///
/// # Errors
///
/// The store's error, unchanged. No partial results are returned with it.
pub fn select<S: DocumentStore + ?Sized>(
    store: &S,
    query: &Query,
    sink: Option<&mut dyn Write>,
) -> HarnessResult<QueryResults> {
    let results = store.select(query)?;
    debug!(
        target: "docfix::query",
        namespace = %query.namespace,
        results = results.len(),
        "Query returned"
    );

    if let Some(sink) = sink {
        match format_results(store, &query.namespace, &results) {
            Ok(table) => {
                if let Err(e) = sink.write_all(table.as_bytes()).and_then(|_| sink.flush()) {
                    warn!(target: "docfix::query", error = %e, "Could not write result table");
                }
            }
            Err(e) => {
                warn!(target: "docfix::query", error = %e, "Could not render result table");
            }
        }
    }
    Ok(results)
}

/// Render results as a tab-separated table
///
/// # Errors
///
/// The store's error if no template item can be allocated for `namespace`.
pub fn format_results<S: DocumentStore + ?Sized>(
    store: &S,
    namespace: &str,
    results: &QueryResults,
) -> HarnessResult<String> {
    let template = store.new_item(namespace)?;
    let mut out = String::new();
    push_row(&mut out, &template, |name| name.to_string());
    for item in results {
        push_row(&mut out, item, |name| item.field_as_text(name));
    }
    out.push('\n');
    Ok(out)
}

fn push_row(out: &mut String, item: &Item, cell: impl Fn(&str) -> String) {
    for name in (1..item.field_count()).filter_map(|idx| item.field_name(idx)) {
        out.push('\t');
        out.push_str(&cell(name));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfix_core::{FieldType, IndexDef, IndexKind, StoreError};
    use docfix_store::{FaultyStore, MemoryStore};
    use std::io;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.open_namespace("items").unwrap();
        store
            .add_index("items", &IndexDef::new("id", IndexKind::Hash, FieldType::Int).pk())
            .unwrap();
        store
            .add_index("items", &IndexDef::new("name", IndexKind::Tree, FieldType::String))
            .unwrap();
        for (id, name) in [(1, "dog"), (2, "car")] {
            let mut item = store.new_item("items").unwrap();
            item.set("id", id).set("name", name).set("color", "red");
            store.upsert("items", &item).unwrap();
        }
        store.commit("items").unwrap();
        store
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_table_layout() {
        let store = store();
        let mut sink = Vec::new();
        let results = select(&store, &Query::new("items"), Some(&mut sink)).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "\tid\tname\n\t1\tdog\n\t2\tcar\n\n"
        );
    }

    #[test]
    fn test_empty_results_render_header_only() {
        let store = store();
        let table = format_results(&store, "items", &QueryResults::default()).unwrap();
        assert_eq!(table, "\tid\tname\n\n");
    }

    #[test]
    fn test_rendering_failure_does_not_change_results() {
        let store = store();
        let mut sink = BrokenSink;
        let results = select(&store, &Query::new("items").where_eq("id", 2), Some(&mut sink))
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_select_failure_returns_error_only() {
        let store = FaultyStore::new(store());
        store.fail_select(StoreError::injected("planner crashed"));
        let mut sink = Vec::new();
        let err = select(&store, &Query::new("items"), Some(&mut sink)).unwrap_err();
        assert_eq!(err.store_error(), Some(&StoreError::injected("planner crashed")));
        assert!(sink.is_empty());
    }
}
