//! Namespace provisioner
//!
//! Creates a namespace and its indexes in the store, and records the schema
//! in the definition cache only after every step succeeded. A name present
//! in the cache therefore always matches a fully indexed namespace.
//!
//! When an index fails part way, the namespace stays in the store with the
//! indexes added so far (`PartialIndexPolicy::Keep`), or is dropped
//! (`PartialIndexPolicy::DropNamespace`). Either way the index error is
//! returned and the cache is left untouched.
//!
//! Provisioning only adds indexes. Creating a namespace the store already
//! holds with a different index set succeeds and caches the new schema,
//! while the store keeps every index from both: the cached schema then
//! lists a subset of what the store has.

use crate::cache::NamespaceDefs;
use crate::config::PartialIndexPolicy;
use crate::error::{HarnessError, HarnessResult};
use docfix_core::NamespaceDef;
use docfix_store::DocumentStore;
use tracing::{debug, warn};

/// Drives namespace creation against one store and one registry
pub struct Provisioner<'a, S: ?Sized> {
    store: &'a S,
    defs: &'a mut NamespaceDefs,
    policy: PartialIndexPolicy,
}

impl<'a, S: DocumentStore + ?Sized> Provisioner<'a, S> {
    /// Provisioner that leaves partly indexed namespaces in place
    pub fn new(store: &'a S, defs: &'a mut NamespaceDefs) -> Self {
        Provisioner {
            store,
            defs,
            policy: PartialIndexPolicy::Keep,
        }
    }

    /// Choose how partial index failures are cleaned up
    pub fn with_policy(mut self, policy: PartialIndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Provision the schema cached under `name`
    ///
    /// # Errors
    ///
    /// `SchemaNotFound` if nothing was cached under `name`; the store is not
    /// touched. Otherwise whatever [`Provisioner::create`] returns.
    pub fn create_from_cache(&mut self, name: &str) -> HarnessResult<()> {
        let def = self
            .defs
            .lookup(name)
            .cloned()
            .ok_or_else(|| HarnessError::SchemaNotFound(name.to_string()))?;
        self.create(&def)
    }

    /// Open the namespace, add every index in order, then cache the schema
    ///
    /// # Errors
    ///
    /// The first store error from `open_namespace` or `add_index`, unchanged.
    pub fn create(&mut self, def: &NamespaceDef) -> HarnessResult<()> {
        self.store.open_namespace(&def.name)?;

        for (added, index) in def.indexes.iter().enumerate() {
            if let Err(err) = self.store.add_index(&def.name, index) {
                debug!(
                    target: "docfix::provision",
                    namespace = %def.name,
                    index = %index.name,
                    added,
                    "Index failed; schema not cached"
                );
                if self.policy == PartialIndexPolicy::DropNamespace {
                    if let Err(drop_err) = self.store.drop_namespace(&def.name) {
                        warn!(
                            target: "docfix::provision",
                            namespace = %def.name,
                            error = %drop_err,
                            "Could not drop partly indexed namespace"
                        );
                    }
                }
                return Err(err.into());
            }
        }

        debug!(
            target: "docfix::provision",
            namespace = %def.name,
            indexes = def.indexes.len(),
            "Namespace provisioned"
        );
        self.defs.put(def.clone());
        Ok(())
    }
}
