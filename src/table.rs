//! The completed truth table.
//!
//! Entries are kept in two blocks: explicit rows in the order their pattern was
//! first inserted, followed by synthesized "unspecified" rows in enumeration order.
//! Keys are unique: re-inserting an explicit pattern replaces its output in place.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::types::{Pattern, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTable {
    input_width: usize,
    output_width: usize,
    rows: Vec<Row>,
    index: HashMap<Pattern, usize>,
    explicit: usize,
    covered: usize,
}

impl CompleteTable {
    pub(crate) fn new(input_width: usize, output_width: usize) -> Self {
        Self {
            input_width,
            output_width,
            rows: Vec::new(),
            index: HashMap::new(),
            explicit: 0,
            covered: 0,
        }
    }

    /// Inserts an explicit row. Returns the previous output if the pattern was already a key.
    ///
    /// Must be called before any [`CompleteTable::insert_unspecified`].
    pub(crate) fn insert_explicit(&mut self, row: Row) -> Option<Pattern> {
        debug_assert_eq!(self.explicit, self.rows.len());
        match self.index.get(&row.input) {
            Some(&i) => Some(std::mem::replace(&mut self.rows[i].output, row.output)),
            None => {
                self.index.insert(row.input.clone(), self.rows.len());
                self.rows.push(row);
                self.explicit += 1;
                None
            }
        }
    }

    /// Inserts `input -> unspecified` unless `input` is already a key.
    pub(crate) fn insert_unspecified(&mut self, input: Pattern) -> bool {
        if self.index.contains_key(&input) {
            return false;
        }
        self.index.insert(input.clone(), self.rows.len());
        self.rows.push(Row::new(input, Pattern::dont_care(self.output_width)));
        true
    }

    pub(crate) fn set_covered(&mut self, covered: usize) {
        self.covered = covered;
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn output_width(&self) -> usize {
        self.output_width
    }

    /// Number of keys (explicit plus synthesized).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output for an exact key, if present.
    ///
    /// This is a lookup by key identity, not by matching: a concrete input covered
    /// only through a wildcard row is not a key.
    pub fn get(&self, input: &Pattern) -> Option<&Pattern> {
        self.index.get(input).map(|&i| &self.rows[i].output)
    }

    pub fn contains_key(&self, input: &Pattern) -> bool {
        self.index.contains_key(input)
    }

    /// All rows, explicit first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn explicit_rows(&self) -> &[Row] {
        &self.rows[..self.explicit]
    }

    /// Rows synthesized for inputs no explicit pattern covers.
    pub fn unspecified_rows(&self) -> &[Row] {
        &self.rows[self.explicit..]
    }

    /// Number of concrete inputs covered by at least one explicit pattern.
    pub fn covered_count(&self) -> usize {
        self.covered
    }

    /// Size of the input space, `2^input_width`.
    pub fn input_space_size(&self) -> BigUint {
        BigUint::from(1u8) << self.input_width
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a CompleteTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(input: &str, output: &str) -> Row {
        Row::parse(input, output).unwrap()
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut table = CompleteTable::new(2, 1);
        assert_eq!(table.insert_explicit(row("0-", "1")), None);
        assert_eq!(table.insert_explicit(row("11", "0")), None);
        assert_eq!(table.insert_explicit(row("0-", "0")), Some("1".parse().unwrap()));

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], row("0-", "0"));
        assert_eq!(table.rows()[1], row("11", "0"));
    }

    #[test]
    fn test_unspecified_does_not_overwrite() {
        let mut table = CompleteTable::new(2, 2);
        table.insert_explicit(row("10", "01"));
        assert!(!table.insert_unspecified("10".parse().unwrap()));
        assert!(table.insert_unspecified("00".parse().unwrap()));

        assert_eq!(table.get(&"10".parse().unwrap()), Some(&"01".parse().unwrap()));
        assert_eq!(table.get(&"00".parse().unwrap()), Some(&"--".parse().unwrap()));
        assert_eq!(table.explicit_rows().len(), 1);
        assert_eq!(table.unspecified_rows().len(), 1);
    }

    #[test]
    fn test_input_space_size() {
        let table = CompleteTable::new(20, 1);
        assert_eq!(table.input_space_size(), BigUint::from(1u32 << 20));
    }
}
