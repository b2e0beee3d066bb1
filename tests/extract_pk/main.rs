//! Primary-key / foreign-key extraction suite
//!
//! Exercises the harness end to end against the in-memory store:
//! - provisioning: cache population, cache reuse, partial index failures
//! - roundtrip: record builders, write-then-commit, failure short-circuits
//! - query: round-trip law, fk lookups, result rendering

#[path = "../common/mod.rs"]
mod common;

mod provisioning;
mod query;
mod roundtrip;
