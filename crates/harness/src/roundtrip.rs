//! Record round-tripper
//!
//! Builds store items from fixture records and writes them durably. Three
//! ways in: assign each record attribute by field name, serialize any
//! `Serialize` value and parse it into the item, or substitute a record into
//! a printf-style JSON pattern. One way out: `upsert_and_commit`.

use crate::error::{HarnessError, HarnessResult};
use crate::generator::FixtureRecord;
use docfix_core::StoreError;
use docfix_store::{DocumentStore, Item};
use serde::Serialize;
use tracing::debug;

/// Item built from a pattern, with the record that filled it
#[derive(Debug, Clone, PartialEq)]
pub struct PatternItem {
    /// Item ready to be written
    pub item: Item,
    /// Values substituted into the pattern
    pub record: FixtureRecord,
}

/// Allocate an item and assign every record attribute by name
///
/// # Errors
///
/// The store's error if the item cannot be allocated.
pub fn item_from_record<S: DocumentStore + ?Sized>(
    store: &S,
    namespace: &str,
    record: &FixtureRecord,
) -> HarnessResult<Item> {
    let mut item = store.new_item(namespace)?;
    item.set("id", record.id)
        .set("fk_id", record.fk_id)
        .set("name", record.name.as_str())
        .set("color", record.color.as_str())
        .set("weight", record.weight)
        .set("height", record.height);
    Ok(item)
}

/// Allocate an item and fill it from a serialized value
///
/// # Errors
///
/// The store's error if the item cannot be allocated, or `Format` if the
/// value does not serialize to a JSON object the store accepts.
pub fn item_from_serialize<S, T>(store: &S, namespace: &str, value: &T) -> HarnessResult<Item>
where
    S: DocumentStore + ?Sized,
    T: Serialize + ?Sized,
{
    let mut item = store.new_item(namespace)?;
    let payload = serde_json::to_string(value).map_err(|e| HarnessError::Format {
        payload: String::new(),
        source: StoreError::from(e),
    })?;
    item.from_json(&payload)
        .map_err(|source| HarnessError::Format { payload, source })?;
    Ok(item)
}

/// Allocate an item and fill it from `pattern` with `record` substituted
///
/// Placeholders are consumed in the order id, fk_id, name, color, weight,
/// height; see [`format_pattern`].
///
/// # Errors
///
/// The store's error if the item cannot be allocated, or `Format` if the
/// substituted payload does not parse.
pub fn item_from_pattern<S: DocumentStore + ?Sized>(
    store: &S,
    namespace: &str,
    pattern: &str,
    record: FixtureRecord,
) -> HarnessResult<PatternItem> {
    let mut item = store.new_item(namespace)?;
    let payload = format_pattern(pattern, &record);
    match item.from_json(&payload) {
        Ok(()) => Ok(PatternItem { item, record }),
        Err(source) => Err(HarnessError::Format { payload, source }),
    }
}

/// Substitute a record into a printf-style pattern
///
/// `%d`, `%i`, `%u` and `%s` each take the next value in the order id,
/// fk_id, name, color, weight, height; `%%` is a literal `%`. The conversion
/// letter only marks a placeholder, it does not check the value's type.
/// Placeholders beyond the sixth are left as written.
pub fn format_pattern(pattern: &str, record: &FixtureRecord) -> String {
    let args = [
        record.id.to_string(),
        record.fk_id.to_string(),
        record.name.clone(),
        record.color.clone(),
        record.weight.to_string(),
        record.height.to_string(),
    ];
    let mut args = args.iter();
    let mut out = String::with_capacity(pattern.len() + 32);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(conv @ ('d' | 'i' | 'u' | 's')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('%');
                        out.push(conv);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Write an item, then commit its namespace
///
/// The commit is skipped when the write fails. A failed commit is returned
/// as is; the write is not rolled back.
///
/// # Errors
///
/// The `upsert` error, or the `commit` error if the write succeeded.
pub fn upsert_and_commit<S: DocumentStore + ?Sized>(
    store: &S,
    namespace: &str,
    item: &Item,
) -> HarnessResult<()> {
    store.upsert(namespace, item)?;
    store.commit(namespace)?;
    debug!(target: "docfix::roundtrip", namespace, "Item written and committed");
    Ok(())
}
