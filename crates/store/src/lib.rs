//! Backing-store layer for docfix
//!
//! - DocumentStore: the capability set the harness drives
//! - Item / QueryResults: store-owned record and result handles
//! - MemoryStore: in-memory reference engine with commit-gated visibility
//! - FaultyStore: call-journaling wrapper that fails calls on demand

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod faults;
pub mod item;
pub mod memory;
pub mod results;
pub mod traits;

pub use faults::{FaultyStore, StoreCall};
pub use item::{value_as_text, Item, TUPLE_FIELD};
pub use memory::MemoryStore;
pub use results::QueryResults;
pub use traits::DocumentStore;
