//! Namespace definition cache
//!
//! Maps a namespace name to the schema it was last successfully provisioned
//! with. Tests declare a schema once through `Provisioner::create` and later
//! tests re-provision it by name with `create_from_cache`.
//!
//! The registry is an ordinary value: a `Fixture` owns one, and the
//! provisioner borrows it mutably. Suites that want the declare-once
//! behavior to span every test in the process share the lazily initialized
//! registry returned by [`NamespaceDefs::process_wide`].

use docfix_core::NamespaceDef;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Shared handle to a registry
pub type SharedDefs = Arc<Mutex<NamespaceDefs>>;

// Never torn down; lives as long as the test process.
static PROCESS_DEFS: Lazy<SharedDefs> = Lazy::new(|| Arc::new(Mutex::new(NamespaceDefs::new())));

/// Registry of namespace schemas, keyed by name
///
/// No eviction and no expiry. `put` overwrites: the last writer wins.
#[derive(Debug, Clone, Default)]
pub struct NamespaceDefs {
    defs: FxHashMap<String, NamespaceDef>,
}

impl NamespaceDefs {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry shared by everything in this process
    pub fn process_wide() -> SharedDefs {
        Arc::clone(&PROCESS_DEFS)
    }

    /// Wrap a fresh registry for sharing
    pub fn shared() -> SharedDefs {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Schema last put under `name`
    pub fn lookup(&self, name: &str) -> Option<&NamespaceDef> {
        self.defs.get(name)
    }

    /// Insert or replace by `def.name`, returning the replaced schema
    pub fn put(&mut self, def: NamespaceDef) -> Option<NamespaceDef> {
        self.defs.insert(def.name.clone(), def)
    }

    /// Whether `name` is present
    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// Number of cached schemas
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Cached names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.defs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.defs.clear();
    }
}
