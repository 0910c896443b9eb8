//! Enumeration of the full input space.
//!
//! Bitstrings of width `n` are produced by counting from `0` to `2^n - 1` and rendering
//! each counter value most significant bit first. This yields the same order as the
//! recursive doubling construction (all `0`-prefixed strings, then all `1`-prefixed
//! ones) without recursion or intermediate vectors.
//!
//! ```text
//! n = 2:  00, 01, 10, 11
//! ```
//!
//! The `k`-th item is always `Pattern::from_index(k, n)`, which callers may rely on
//! to index per-input bookkeeping.

use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::types::Pattern;

/// Largest width the counter can represent.
pub const MAX_WIDTH: usize = 63;

/// Iterator over all concrete patterns of a given width.
#[derive(Debug, Clone)]
pub struct Bitstrings {
    width: usize,
    next: u64,
    end: u64,
}

impl Bitstrings {
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Iterator for Bitstrings {
    type Item = Pattern;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let item = Pattern::from_index(self.next, self.width);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Bitstrings {}

/// All `2^width` bitstrings of `width` bits.
///
/// Fails with [`Error::InvalidWidth`] if `width` is zero or exceeds [`MAX_WIDTH`].
pub fn all_bitstrings(width: usize) -> Result<Bitstrings> {
    all_bitstrings_bounded(width, MAX_WIDTH)
}

/// Same as [`all_bitstrings`], with a caller-imposed ceiling on `width`.
///
/// The ceiling is clamped to [`MAX_WIDTH`].
pub fn all_bitstrings_bounded(width: usize, max: usize) -> Result<Bitstrings> {
    let max = max.min(MAX_WIDTH);
    if width < 1 || width > max {
        return Err(Error::InvalidWidth {
            what: "input",
            width,
            max: Some(max),
        });
    }
    Ok(Bitstrings {
        width,
        next: 0,
        end: 1u64 << width,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    fn strings(width: usize) -> Vec<String> {
        all_bitstrings(width).unwrap().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_width_one() {
        assert_eq!(strings(1), vec!["0", "1"]);
    }

    #[test]
    fn test_doubling_order() {
        assert_eq!(strings(2), vec!["00", "01", "10", "11"]);
        assert_eq!(strings(3), vec!["000", "001", "010", "011", "100", "101", "110", "111"]);
    }

    #[test]
    fn test_count_and_uniqueness() {
        for n in 1..=10 {
            let all = strings(n);
            assert_eq!(all.len(), 1 << n);
            assert!(all.iter().all(|s| s.len() == n));
            let unique: HashSet<_> = all.iter().collect();
            assert_eq!(unique.len(), all.len());
        }
    }

    #[test]
    fn test_exact_size() {
        let it = all_bitstrings(12).unwrap();
        assert_eq!(it.size_hint(), (4096, Some(4096)));
        assert_eq!(it.count(), 4096);
    }

    #[test]
    fn test_index_matches_position() {
        for (k, p) in all_bitstrings(6).unwrap().enumerate() {
            assert_eq!(p.to_index(), Some(k as u64));
        }
    }

    #[test]
    fn test_zero_width() {
        assert!(matches!(
            all_bitstrings(0),
            Err(Error::InvalidWidth { width: 0, .. })
        ));
    }

    #[test]
    fn test_ceiling() {
        assert!(all_bitstrings_bounded(20, 20).is_ok());
        assert!(matches!(
            all_bitstrings_bounded(21, 20),
            Err(Error::InvalidWidth {
                width: 21,
                max: Some(20),
                ..
            })
        ));
        assert!(all_bitstrings(64).is_err());
    }
}
