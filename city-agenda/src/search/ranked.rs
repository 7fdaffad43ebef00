//! Key-ordered candidate lists.
//!
//! Both the proximity search (keyed by distance) and the period filter
//! (keyed by closeness in days) collect results here and read them back
//! best-first.

/// A list of `(key, payload)` pairs kept in ascending key order.
///
/// Elements with equal keys end up adjacent, in no particular order.
/// The list has no size bound; callers that want a top-k stop inserting.
#[derive(Debug, Clone)]
pub struct RankedList<K, T> {
    items: Vec<(K, T)>,
}

impl<K: PartialOrd, T> RankedList<K, T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert a payload at the position its key belongs to.
    pub fn insert(&mut self, key: K, payload: T) {
        let idx = self.items.partition_point(|(k, _)| *k <= key);
        self.items.insert(idx, (key, payload));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(key, payload)` pairs, smallest key first.
    pub fn iter(&self) -> impl Iterator<Item = &(K, T)> {
        self.items.iter()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.iter().map(|(k, _)| k)
    }

    /// Drop the keys and return the payloads, smallest key first.
    pub fn into_payloads(self) -> Vec<T> {
        self.items.into_iter().map(|(_, t)| t).collect()
    }
}

impl<K: PartialOrd, T> Default for RankedList<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialOrd, T> FromIterator<(K, T)> for RankedList<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (k, t) in iter {
            list.insert(k, t);
        }
        list
    }
}
