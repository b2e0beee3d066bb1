//! MemoryStore: in-memory reference engine
//!
//! Holds every namespace in a single map behind a `parking_lot::RwLock`.
//! Each namespace keeps two row sets: `committed`, which `select` reads,
//! and `staged`, a copy-on-first-write of `committed` that `upsert` mutates.
//! `commit` publishes `staged` in one swap, so a write is never visible to a
//! query before its namespace has been committed.

use crate::item::{json_type_name, Item};
use crate::results::QueryResults;
use crate::traits::DocumentStore;
use docfix_core::{
    compare_values, IndexDef, IndexKind, NamespaceDef, Query, StoreError, StoreResult,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::debug;

type Document = Map<String, Value>;

/// Documents in insertion order, addressed by rendered key
#[derive(Debug, Clone, Default)]
struct Rows {
    docs: Vec<Document>,
    by_key: FxHashMap<String, usize>,
}

impl Rows {
    fn put(&mut self, key: String, doc: Document) {
        match self.by_key.get(&key) {
            Some(&pos) => self.docs[pos] = doc,
            None => {
                self.by_key.insert(key, self.docs.len());
                self.docs.push(doc);
            }
        }
    }
}

#[derive(Debug)]
struct NamespaceState {
    def: NamespaceDef,
    committed: Rows,
    staged: Option<Rows>,
}

impl NamespaceState {
    fn new(name: &str) -> Self {
        NamespaceState {
            def: NamespaceDef::new(name),
            committed: Rows::default(),
            staged: None,
        }
    }

    /// Index whose value identifies an item: the pk, else the first unique index
    fn key_index(&self) -> Option<&IndexDef> {
        self.def
            .pk_index()
            .or_else(|| self.def.indexes.iter().find(|i| i.is_identity()))
    }

    fn new_item(&self) -> Item {
        Item::new(
            self.def.name.clone(),
            self.def.indexes.iter().map(|i| i.name.clone()),
        )
    }

    fn check_index(&self, index: &IndexDef) -> StoreResult<()> {
        let invalid = |reason: &str| StoreError::InvalidIndex {
            namespace: self.def.name.clone(),
            index: index.name.clone(),
            reason: reason.to_string(),
        };
        if index.name.is_empty() {
            return Err(invalid("index name is empty"));
        }
        if index.opts.pk {
            if let Some(existing) = self.def.pk_index() {
                return Err(invalid(&format!(
                    "namespace already has primary key '{}'",
                    existing.name
                )));
            }
            if index.opts.array {
                return Err(invalid("primary key cannot be an array"));
            }
            if index.kind == IndexKind::Store {
                return Err(invalid("primary key must be a hash or tree index"));
            }
        }
        Ok(())
    }

    fn check_types(&self, doc: &Document) -> StoreResult<()> {
        for index in &self.def.indexes {
            let value = match doc.get(&index.name) {
                None | Some(Value::Null) => continue,
                Some(v) => v,
            };
            let ok = match (index.opts.array, value) {
                (true, Value::Array(elems)) => elems.iter().all(|e| index.field_type.accepts(e)),
                (true, _) => false,
                (false, v) => index.field_type.accepts(v),
            };
            if !ok {
                let expected = if index.opts.array {
                    format!("array of {}", index.field_type.name())
                } else {
                    index.field_type.name().to_string()
                };
                return Err(StoreError::FieldType {
                    field: index.name.clone(),
                    expected,
                    found: json_type_name(value).to_string(),
                });
            }
        }
        Ok(())
    }
}

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: RwLock<FxHashMap<String, NamespaceState>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every open namespace, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<String> = self.namespaces.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of committed items in `namespace`
    pub fn committed_len(&self, namespace: &str) -> StoreResult<usize> {
        let guard = self.namespaces.read();
        let ns = guard
            .get(namespace)
            .ok_or_else(|| StoreError::NamespaceNotFound(namespace.to_string()))?;
        Ok(ns.committed.docs.len())
    }

    /// Whether `namespace` holds writes not yet committed
    pub fn has_pending_writes(&self, namespace: &str) -> bool {
        self.namespaces
            .read()
            .get(namespace)
            .map(|ns| ns.staged.is_some())
            .unwrap_or(false)
    }
}

/// Row key for a key-index value
///
/// Numbers that compare equal render the same key: integral values as
/// `i64`, everything else as `f64`.
fn key_text(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    (f as i64).to_string()
                }
                Some(f) => f.to_string(),
                None => n.to_string(),
            },
        },
        other => other.to_string(),
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    compare_values(a, b) == Some(Ordering::Equal) || a == b
}

fn not_found(name: &str) -> StoreError {
    StoreError::NamespaceNotFound(name.to_string())
}

impl DocumentStore for MemoryStore {
    fn open_namespace(&self, name: &str) -> StoreResult<()> {
        let mut guard = self.namespaces.write();
        if !guard.contains_key(name) {
            debug!(target: "docfix::store", namespace = name, "Namespace created");
            guard.insert(name.to_string(), NamespaceState::new(name));
        }
        Ok(())
    }

    fn add_index(&self, namespace: &str, index: &IndexDef) -> StoreResult<()> {
        let mut guard = self.namespaces.write();
        let ns = guard.get_mut(namespace).ok_or_else(|| not_found(namespace))?;

        if let Some(existing) = ns.def.index(&index.name) {
            if existing == index {
                return Ok(());
            }
            return Err(StoreError::IndexConflict {
                namespace: namespace.to_string(),
                index: index.name.clone(),
            });
        }
        ns.check_index(index)?;
        ns.def.indexes.push(index.clone());
        debug!(target: "docfix::store", namespace, index = %index.name, "Index added");
        Ok(())
    }

    fn new_item(&self, namespace: &str) -> StoreResult<Item> {
        let guard = self.namespaces.read();
        let ns = guard.get(namespace).ok_or_else(|| not_found(namespace))?;
        Ok(ns.new_item())
    }

    fn upsert(&self, namespace: &str, item: &Item) -> StoreResult<()> {
        let mut guard = self.namespaces.write();
        let ns = guard.get_mut(namespace).ok_or_else(|| not_found(namespace))?;
        let doc = item.document();
        ns.check_types(doc)?;

        let key_index = ns
            .key_index()
            .ok_or_else(|| StoreError::NoPrimaryKey(namespace.to_string()))?
            .name
            .clone();
        let key = match doc.get(&key_index) {
            None | Some(Value::Null) => {
                return Err(StoreError::MissingPrimaryKey {
                    namespace: namespace.to_string(),
                    field: key_index,
                })
            }
            Some(v) => key_text(v),
        };

        let current = ns.staged.as_ref().unwrap_or(&ns.committed);
        for index in ns.def.indexes.iter().filter(|i| i.opts.unique && i.name != key_index) {
            let value = match doc.get(&index.name) {
                None | Some(Value::Null) => continue,
                Some(v) => v,
            };
            let taken = current.by_key.iter().any(|(other, &pos)| {
                *other != key
                    && current.docs[pos]
                        .get(&index.name)
                        .map_or(false, |held| same_value(held, value))
            });
            if taken {
                return Err(StoreError::UniqueViolation {
                    namespace: namespace.to_string(),
                    index: index.name.clone(),
                    value: value.to_string(),
                });
            }
        }

        let staged = ns.staged.get_or_insert_with(|| ns.committed.clone());
        staged.put(key, doc.clone());
        debug!(target: "docfix::store", namespace, "Item staged");
        Ok(())
    }

    fn commit(&self, namespace: &str) -> StoreResult<()> {
        let mut guard = self.namespaces.write();
        let ns = guard.get_mut(namespace).ok_or_else(|| not_found(namespace))?;
        if let Some(staged) = ns.staged.take() {
            ns.committed = staged;
            debug!(
                target: "docfix::store",
                namespace,
                items = ns.committed.docs.len(),
                "Namespace committed"
            );
        }
        Ok(())
    }

    fn select(&self, query: &Query) -> StoreResult<QueryResults> {
        query.validate()?;
        let guard = self.namespaces.read();
        let ns = guard
            .get(&query.namespace)
            .ok_or_else(|| not_found(&query.namespace))?;

        let mut hits: Vec<&Document> = ns
            .committed
            .docs
            .iter()
            .filter(|doc| {
                query
                    .conditions
                    .iter()
                    .all(|c| c.matches(doc.get(&c.field)))
            })
            .collect();

        if let Some(sort) = &query.sort {
            hits.sort_by(|a, b| {
                let ord = match (a.get(&sort.field), b.get(&sort.field)) {
                    (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                if sort.desc {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let items = hits
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|doc| ns.new_item().with_document(doc.clone()))
            .collect::<Vec<_>>();
        debug!(
            target: "docfix::store",
            namespace = %query.namespace,
            hits = items.len(),
            "Select complete"
        );
        Ok(QueryResults::new(query.namespace.clone(), items))
    }

    fn drop_namespace(&self, name: &str) -> StoreResult<()> {
        self.namespaces
            .write()
            .remove(name)
            .map(|_| debug!(target: "docfix::store", namespace = name, "Namespace dropped"))
            .ok_or_else(|| not_found(name))
    }

    fn describe_namespace(&self, name: &str) -> StoreResult<NamespaceDef> {
        self.namespaces
            .read()
            .get(name)
            .map(|ns| ns.def.clone())
            .ok_or_else(|| not_found(name))
    }
}
