//! QueryResults: items returned by a select

use crate::item::Item;

/// Items satisfying a query, in the store's result order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResults {
    namespace: String,
    items: Vec<Item>,
}

impl QueryResults {
    /// Wrap the items a store produced for `namespace`
    pub fn new(namespace: impl Into<String>, items: Vec<Item>) -> Self {
        QueryResults {
            namespace: namespace.into(),
            items,
        }
    }

    /// Namespace the query ran against; empty for a default result set
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item matched
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The i-th item
    pub fn get_item(&self, idx: usize) -> Option<&Item> {
        self.items.get(idx)
    }

    /// Iterate in result order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl IntoIterator for QueryResults {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResults {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
