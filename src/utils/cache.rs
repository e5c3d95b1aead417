//! Query-keyed result cache
//!
//! Listing queries are re-run on every state change in the applications this
//! library serves. The cache keys cached result sets by the query options
//! value itself, so two structurally equal queries share an entry. It is an
//! explicit object rather than a module global so it can be constructed and
//! inspected in tests.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

/// Cache mapping query options to their most recent result set
///
/// Thread safe; interior mutability keeps read paths usable behind `&self`.
#[derive(Debug)]
pub struct QueryCache<Q, T> {
    entries: Mutex<HashMap<Q, Vec<T>>>,
}

impl<Q, T> QueryCache<Q, T>
where
    Q: Eq + Hash + Clone,
    T: Clone,
{
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cached rows for a query, if present
    pub fn get(&self, query: &Q) -> Option<Vec<T>> {
        self.entries.lock().unwrap().get(query).cloned()
    }

    /// Store the rows for a query, replacing any previous entry
    pub fn put(&self, query: Q, rows: Vec<T>) {
        self.entries.lock().unwrap().insert(query, rows);
    }

    /// Drop every cached entry
    ///
    /// Called after any mutation; resolving which queries a change affects
    /// is not worth the bookkeeping at this scale.
    pub fn invalidate_all(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of cached result sets
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl<Q, T> Default for QueryCache<Q, T>
where
    Q: Eq + Hash + Clone,
    T: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_after_put() {
        let cache: QueryCache<String, i32> = QueryCache::new();
        assert!(cache.get(&"a".to_string()).is_none());

        cache.put("a".to_string(), vec![1, 2, 3]);
        assert_eq!(cache.get(&"a".to_string()), Some(vec![1, 2, 3]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_structurally_equal_keys_share_an_entry() {
        let cache: QueryCache<(Option<String>, bool), i32> = QueryCache::new();
        cache.put((Some("c1".to_string()), true), vec![7]);
        assert_eq!(cache.get(&(Some("c1".to_string()), true)), Some(vec![7]));
        assert_eq!(cache.get(&(Some("c1".to_string()), false)), None);
    }

    #[test]
    fn test_invalidate_all_clears_everything() {
        let cache: QueryCache<String, i32> = QueryCache::new();
        cache.put("a".to_string(), vec![1]);
        cache.put("b".to_string(), vec![2]);
        cache.invalidate_all();
        assert!(cache.is_empty());
        assert!(cache.get(&"a".to_string()).is_none());
    }
}
