//! FaultyStore: a recording, fault-injecting wrapper around any store
//!
//! Tests arm a `FaultyStore` to fail one kind of call with a chosen
//! `StoreError`, then check both what the caller got back and the journal
//! of calls that actually reached the store. A failed call is journaled but
//! never forwarded.

use crate::item::Item;
use crate::results::QueryResults;
use crate::traits::DocumentStore;
use docfix_core::{IndexDef, NamespaceDef, Query, StoreError, StoreResult};
use parking_lot::Mutex;

/// One call observed by a `FaultyStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `open_namespace(name)`
    OpenNamespace(String),
    /// `add_index(namespace, index.name)`
    AddIndex {
        /// Namespace
        namespace: String,
        /// Index name
        index: String,
    },
    /// `new_item(namespace)`
    NewItem(String),
    /// `upsert(namespace, _)`
    Upsert(String),
    /// `commit(namespace)`
    Commit(String),
    /// `select(query)` against the named namespace
    Select(String),
    /// `drop_namespace(name)`
    DropNamespace(String),
    /// `describe_namespace(name)`
    DescribeNamespace(String),
}

#[derive(Debug, Default)]
struct Faults {
    open_namespace: Option<StoreError>,
    add_index: Option<(String, StoreError)>,
    upsert: Option<StoreError>,
    commit: Option<StoreError>,
    select: Option<StoreError>,
    drop_namespace: Option<StoreError>,
}

/// Store wrapper that journals calls and fails them on demand
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    faults: Mutex<Faults>,
    calls: Mutex<Vec<StoreCall>>,
}

impl<S: DocumentStore> FaultyStore<S> {
    /// Wrap `inner` with no faults armed
    pub fn new(inner: S) -> Self {
        FaultyStore {
            inner,
            faults: Mutex::new(Faults::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Fail every `open_namespace`
    pub fn fail_open_namespace(&self, err: StoreError) {
        self.faults.lock().open_namespace = Some(err);
    }

    /// Fail `add_index` for the index named `index`
    pub fn fail_add_index(&self, index: impl Into<String>, err: StoreError) {
        self.faults.lock().add_index = Some((index.into(), err));
    }

    /// Fail every `upsert`
    pub fn fail_upsert(&self, err: StoreError) {
        self.faults.lock().upsert = Some(err);
    }

    /// Fail every `commit`
    pub fn fail_commit(&self, err: StoreError) {
        self.faults.lock().commit = Some(err);
    }

    /// Fail every `select`
    pub fn fail_select(&self, err: StoreError) {
        self.faults.lock().select = Some(err);
    }

    /// Fail every `drop_namespace`
    pub fn fail_drop_namespace(&self, err: StoreError) {
        self.faults.lock().drop_namespace = Some(err);
    }

    /// Disarm every fault
    pub fn heal(&self) {
        *self.faults.lock() = Faults::default();
    }

    /// Calls observed so far, oldest first
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Forget the journal
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().push(call);
    }
}

fn armed(slot: &Option<StoreError>) -> StoreResult<()> {
    match slot {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}

impl<S: DocumentStore> DocumentStore for FaultyStore<S> {
    fn open_namespace(&self, name: &str) -> StoreResult<()> {
        self.record(StoreCall::OpenNamespace(name.to_string()));
        armed(&self.faults.lock().open_namespace)?;
        self.inner.open_namespace(name)
    }

    fn add_index(&self, namespace: &str, index: &IndexDef) -> StoreResult<()> {
        self.record(StoreCall::AddIndex {
            namespace: namespace.to_string(),
            index: index.name.clone(),
        });
        if let Some((name, err)) = &self.faults.lock().add_index {
            if *name == index.name {
                return Err(err.clone());
            }
        }
        self.inner.add_index(namespace, index)
    }

    fn new_item(&self, namespace: &str) -> StoreResult<Item> {
        self.record(StoreCall::NewItem(namespace.to_string()));
        self.inner.new_item(namespace)
    }

    fn upsert(&self, namespace: &str, item: &Item) -> StoreResult<()> {
        self.record(StoreCall::Upsert(namespace.to_string()));
        armed(&self.faults.lock().upsert)?;
        self.inner.upsert(namespace, item)
    }

    fn commit(&self, namespace: &str) -> StoreResult<()> {
        self.record(StoreCall::Commit(namespace.to_string()));
        armed(&self.faults.lock().commit)?;
        self.inner.commit(namespace)
    }

    fn select(&self, query: &Query) -> StoreResult<QueryResults> {
        self.record(StoreCall::Select(query.namespace.clone()));
        armed(&self.faults.lock().select)?;
        self.inner.select(query)
    }

    fn drop_namespace(&self, name: &str) -> StoreResult<()> {
        self.record(StoreCall::DropNamespace(name.to_string()));
        armed(&self.faults.lock().drop_namespace)?;
        self.inner.drop_namespace(name)
    }

    fn describe_namespace(&self, name: &str) -> StoreResult<NamespaceDef> {
        self.record(StoreCall::DescribeNamespace(name.to_string()));
        self.inner.describe_namespace(name)
    }
}
