//! Caching of completed tables.
//!
//! Completion is a pure function of the row set, the widths and the strictness
//! flag, so a completed table can be reused whenever the same [`CacheKey`] comes
//! up again. Caches are passed explicitly to
//! [`Completer::complete_cached`](crate::complete::Completer::complete_cached);
//! there is no global memoization.
//!
//! # Example
//!
//! ```
//! use pla_rs::cache::HashMapCache;
//! use pla_rs::complete::Completer;
//! use pla_rs::types::Row;
//!
//! let completer = Completer::default();
//! let mut cache = HashMapCache::new();
//! let rows = vec![Row::parse("1-", "1").unwrap()];
//!
//! let first = completer.complete_cached(&mut cache, &rows, 2, 1).unwrap();
//! let second = completer.complete_cached(&mut cache, &rows, 2, 1).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(cache.hits(), 1);
//! assert_eq!(cache.misses(), 1);
//! ```

use std::collections::HashMap;

use crate::table::CompleteTable;
use crate::types::Row;

/// Identity of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    rows: Vec<Row>,
    input_width: usize,
    output_width: usize,
    strict: bool,
}

impl CacheKey {
    pub fn new(rows: Vec<Row>, input_width: usize, output_width: usize, strict: bool) -> Self {
        Self {
            rows,
            input_width,
            output_width,
            strict,
        }
    }
}

/// Storage for completed tables.
pub trait CompletionCache {
    /// Looks up a completed table.
    fn get(&mut self, key: &CacheKey) -> Option<&CompleteTable>;

    /// Stores a completed table.
    fn insert(&mut self, key: CacheKey, table: CompleteTable);
}

/// A cache backed by [HashMap], with hit/miss counters.
#[derive(Debug, Default)]
pub struct HashMapCache {
    map: HashMap<CacheKey, CompleteTable>,
    hits: usize,
    misses: usize,
}

impl HashMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Clears all entries. Counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl CompletionCache for HashMapCache {
    fn get(&mut self, key: &CacheKey) -> Option<&CompleteTable> {
        match self.map.get(key) {
            Some(table) => {
                self.hits += 1;
                Some(table)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn insert(&mut self, key: CacheKey, table: CompleteTable) {
        self.map.insert(key, table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::complete::{Completer, CompletionConfig};

    fn rows(spec: &[(&str, &str)]) -> Vec<Row> {
        spec.iter().map(|(i, o)| Row::parse(i, o).unwrap()).collect()
    }

    #[test]
    fn test_hit_after_miss() {
        let completer = Completer::default();
        let mut cache = HashMapCache::new();
        let rs = rows(&[("0-1", "1")]);

        let a = completer.complete_cached(&mut cache, &rs, 3, 1).unwrap();
        let b = completer.complete_cached(&mut cache, &rs, 3, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_key_includes_widths_and_strictness() {
        let mut cache = HashMapCache::new();
        let rs = rows(&[("1-", "1")]);

        Completer::default().complete_cached(&mut cache, &rs, 2, 1).unwrap();
        Completer::new(CompletionConfig::default().with_strict(true))
            .complete_cached(&mut cache, &rs, 2, 1)
            .unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_row_order_is_part_of_identity() {
        let mut cache = HashMapCache::new();
        let completer = Completer::default();

        completer
            .complete_cached(&mut cache, &rows(&[("1-", "0"), ("11", "1")]), 2, 1)
            .unwrap();
        completer
            .complete_cached(&mut cache, &rows(&[("11", "1"), ("1-", "0")]), 2, 1)
            .unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_ceiling_checked_before_lookup() {
        let mut cache = HashMapCache::new();
        let rs = rows(&[("1---", "1")]);
        Completer::default().complete_cached(&mut cache, &rs, 4, 1).unwrap();

        let narrow = Completer::new(CompletionConfig::default().with_max_input_width(3));
        assert!(narrow.complete_cached(&mut cache, &rs, 4, 1).is_err());
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = HashMapCache::new();
        let rs = rows(&[("1", "1")]);
        assert!(Completer::default().complete_cached(&mut cache, &rs, 2, 1).is_err());
        assert!(cache.is_empty());
    }
}
