//! Fixture: one test's view of the harness
//!
//! A `Fixture` owns the store handle for the lifetime of a test (set up in
//! the constructor, released on drop), a handle to a namespace definition
//! registry, a record generator and the sink result tables are printed to.
//! Its methods are the harness operations a test calls, in the order a test
//! uses them: provision, build and write records, query.

use crate::cache::{NamespaceDefs, SharedDefs};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::generator::{FixtureGenerator, FixtureRecord};
use crate::logging::TestOutput;
use crate::provision::Provisioner;
use crate::query;
use crate::roundtrip::{self, PatternItem};
use docfix_core::{NamespaceDef, Query};
use docfix_store::{DocumentStore, Item, MemoryStore, QueryResults};
use serde::Serialize;
use std::io::Write;

/// Test harness bound to one store
pub struct Fixture<S: DocumentStore = MemoryStore> {
    store: S,
    defs: SharedDefs,
    generator: FixtureGenerator,
    config: HarnessConfig,
    sink: Box<dyn Write + Send>,
}

impl Fixture<MemoryStore> {
    /// Fresh in-memory store, private registry, reference configuration
    pub fn new() -> Self {
        Fixture {
            store: MemoryStore::new(),
            defs: NamespaceDefs::shared(),
            generator: FixtureGenerator::default(),
            config: HarnessConfig::default(),
            sink: Box::new(TestOutput::new()),
        }
    }
}

impl Default for Fixture<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DocumentStore> Fixture<S> {
    /// Harness over `store` configured by `config`
    ///
    /// # Errors
    ///
    /// `Config` if the configuration does not validate.
    pub fn with_store(store: S, config: HarnessConfig) -> HarnessResult<Self> {
        let generator = FixtureGenerator::from_config(&config.generator)?;
        Ok(Fixture {
            store,
            defs: NamespaceDefs::shared(),
            generator,
            config,
            sink: Box::new(TestOutput::new()),
        })
    }

    /// Use `defs` as the namespace definition registry
    pub fn with_defs(mut self, defs: SharedDefs) -> Self {
        self.defs = defs;
        self
    }

    /// Use the registry shared by the whole process
    pub fn with_process_defs(self) -> Self {
        self.with_defs(NamespaceDefs::process_wide())
    }

    /// Print result tables into `sink` instead of the test output
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// The store handle
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The registry handle
    pub fn defs(&self) -> SharedDefs {
        SharedDefs::clone(&self.defs)
    }

    /// Schema cached under `name`
    pub fn cached_def(&self, name: &str) -> Option<NamespaceDef> {
        self.defs.lock().lookup(name).cloned()
    }

    /// Active configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Provision `def` and cache it on success
    pub fn create_namespace(&self, def: &NamespaceDef) -> HarnessResult<()> {
        let mut defs = self.defs.lock();
        Provisioner::new(&self.store, &mut defs)
            .with_policy(self.config.partial_index_policy)
            .create(def)
    }

    /// Provision the schema cached under `name`
    pub fn create_namespace_from_cache(&self, name: &str) -> HarnessResult<()> {
        let mut defs = self.defs.lock();
        Provisioner::new(&self.store, &mut defs)
            .with_policy(self.config.partial_index_policy)
            .create_from_cache(name)
    }

    /// Draw a random record
    pub fn random_record(&mut self) -> FixtureRecord {
        self.generator.generate()
    }

    /// Item for `namespace` with every record attribute assigned by name
    pub fn item_from_record(&self, namespace: &str, record: &FixtureRecord) -> HarnessResult<Item> {
        roundtrip::item_from_record(&self.store, namespace, record)
    }

    /// Item for `namespace` filled from a serialized value
    pub fn item_from_serialize<T: Serialize + ?Sized>(
        &self,
        namespace: &str,
        value: &T,
    ) -> HarnessResult<Item> {
        roundtrip::item_from_serialize(&self.store, namespace, value)
    }

    /// Item for `namespace` from a JSON pattern; random record when `record` is `None`
    pub fn new_item_from_pattern(
        &mut self,
        namespace: &str,
        pattern: &str,
        record: Option<&FixtureRecord>,
    ) -> HarnessResult<PatternItem> {
        let record = match record {
            Some(r) => r.clone(),
            None => self.generator.generate(),
        };
        roundtrip::item_from_pattern(&self.store, namespace, pattern, record)
    }

    /// Write `item` and commit `namespace`
    pub fn upsert_and_commit(&self, namespace: &str, item: &Item) -> HarnessResult<()> {
        roundtrip::upsert_and_commit(&self.store, namespace, item)
    }

    /// Generate, write and commit `count` random records
    pub fn insert_random(&mut self, namespace: &str, count: usize) -> HarnessResult<Vec<FixtureRecord>> {
        let mut written = Vec::with_capacity(count);
        for _ in 0..count {
            let record = self.generator.generate();
            let item = self.item_from_record(namespace, &record)?;
            self.upsert_and_commit(namespace, &item)?;
            written.push(record);
        }
        Ok(written)
    }

    /// Run `query`; print the table when `print` or `print_results` is set
    pub fn select(&mut self, query: &Query, print: bool) -> HarnessResult<QueryResults> {
        if print || self.config.print_results {
            query::select(&self.store, query, Some(&mut *self.sink))
        } else {
            query::select(&self.store, query, None)
        }
    }
}

/// Unwrap a harness result, failing the test with the error message
#[track_caller]
pub fn assert_ok<T>(result: HarnessResult<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => fail(e),
    }
}

#[track_caller]
fn fail(err: HarnessError) -> ! {
    panic!("harness operation failed ({:?}): {}", err.kind(), err)
}
