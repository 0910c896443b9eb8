//! Table completion engine.
//!
//! Given explicit rows (patterns may contain don't-cares), [`Completer::complete`]
//! builds a [`CompleteTable`] in which every point of the input space is either
//! covered by an explicit pattern or present as its own key with the all-don't-care
//! ("unspecified") output.
//!
//! ```text
//! rows:    0- -> 1
//! table:   0- -> 1      (explicit, kept verbatim)
//!          10 -> -      (uncovered)
//!          11 -> -      (uncovered)
//! ```
//!
//! Explicit rows are never expanded into their concrete inputs, and `00`/`01` get no
//! key of their own: they are covered by `0-`.
//!
//! Overlapping patterns with different outputs are accepted by default. With
//! [`CompletionConfig::strict`] enabled, such overlaps are reported as
//! [`Error::ConflictingCoverage`].

use log::{debug, info, warn};

use crate::bitset::BitSet;
use crate::cache::{CacheKey, CompletionCache};
use crate::enumerate::{all_bitstrings_bounded, Bitstrings};
use crate::error::{Error, Position, Result};
use crate::matcher::matches;
use crate::table::CompleteTable;
use crate::types::{Pattern, Row};

/// Default ceiling on the input width, keeping the input space at `2^20` points.
pub const DEFAULT_MAX_INPUT_WIDTH: usize = 20;

/// Configuration of a [`Completer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompletionConfig {
    /// Widths above this are rejected before any enumeration happens.
    pub max_input_width: usize,
    /// Report overlapping rows with conflicting outputs instead of accepting them.
    pub strict: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_input_width: DEFAULT_MAX_INPUT_WIDTH,
            strict: false,
        }
    }
}

impl CompletionConfig {
    pub fn with_max_input_width(mut self, max_input_width: usize) -> Self {
        self.max_input_width = max_input_width;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Stateless completion engine. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Completer {
    config: CompletionConfig,
}

impl Completer {
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Completes `rows` over the full input space of `input_width` bits.
    pub fn complete(&self, rows: &[Row], input_width: usize, output_width: usize) -> Result<CompleteTable> {
        debug!(
            "complete(rows = {}, input_width = {}, output_width = {}, strict = {})",
            rows.len(),
            input_width,
            output_width,
            self.config.strict
        );

        let space = self.input_space(input_width, output_width)?;
        validate_rows(rows, input_width, output_width)?;

        let mut table = CompleteTable::new(input_width, output_width);
        for row in rows {
            if let Some(previous) = table.insert_explicit(row.clone()) {
                if previous != row.output {
                    warn!("pattern {} redefined: output {} replaced by {}", row.input, previous, row.output);
                }
            }
        }

        let covered = self.coverage(table.explicit_rows(), space)?;
        table.set_covered(covered.len());

        let mut synthesized = 0;
        if covered.is_full() {
            debug!("explicit rows cover the whole input space");
        }
        for index in covered.iter_unset() {
            if table.insert_unspecified(Pattern::from_index(index as u64, input_width)) {
                synthesized += 1;
            }
        }

        info!(
            "completed table: {} explicit rows covering {} of {} inputs, {} unspecified rows",
            table.explicit_rows().len(),
            covered.len(),
            covered.capacity(),
            synthesized
        );
        Ok(table)
    }

    /// Like [`Completer::complete`], consulting `cache` first.
    ///
    /// Width checks run before the lookup, so a cached table is never returned for
    /// a width this completer would reject.
    pub fn complete_cached<C>(
        &self,
        cache: &mut C,
        rows: &[Row],
        input_width: usize,
        output_width: usize,
    ) -> Result<CompleteTable>
    where
        C: CompletionCache + ?Sized,
    {
        self.input_space(input_width, output_width)?;

        let key = CacheKey::new(rows.to_vec(), input_width, output_width, self.config.strict);
        if let Some(table) = cache.get(&key) {
            debug!("complete_cached: hit for {} rows", rows.len());
            return Ok(table.clone());
        }

        let table = self.complete(rows, input_width, output_width)?;
        cache.insert(key, table.clone());
        Ok(table)
    }

    fn input_space(&self, input_width: usize, output_width: usize) -> Result<Bitstrings> {
        if output_width < 1 {
            return Err(Error::InvalidWidth {
                what: "output",
                width: output_width,
                max: None,
            });
        }
        all_bitstrings_bounded(input_width, self.config.max_input_width)
    }

    /// Marks every input matched by some row.
    ///
    /// In strict mode every matching row is checked against all rows matched before it,
    /// and the first disagreeing pair (in row order) is reported.
    fn coverage(&self, rows: &[Row], space: Bitstrings) -> Result<BitSet> {
        let mut covered = BitSet::new(1usize << space.width());
        let mut matched: Vec<&Row> = Vec::new();

        for (index, input) in space.enumerate() {
            matched.clear();
            for row in rows {
                if !matches(&row.input, &input)? {
                    continue;
                }
                if !self.config.strict {
                    matched.push(row);
                    break;
                }
                if let Some(prev) = matched.iter().find(|prev| outputs_conflict(&prev.output, &row.output)) {
                    return Err(Error::ConflictingCoverage {
                        input,
                        first: (*prev).clone(),
                        second: row.clone(),
                    });
                }
                matched.push(row);
            }
            if !matched.is_empty() {
                covered.insert(index);
            }
        }

        Ok(covered)
    }
}

/// Completes `rows` with the default configuration.
pub fn complete(rows: &[Row], input_width: usize, output_width: usize) -> Result<CompleteTable> {
    Completer::default().complete(rows, input_width, output_width)
}

fn validate_rows(rows: &[Row], input_width: usize, output_width: usize) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.input.width() != input_width {
            return Err(Error::WidthMismatch {
                what: "pattern",
                expected: input_width,
                found: row.input.width(),
                at: Some(Position::Row(i)),
            });
        }
        if row.output.width() != output_width {
            return Err(Error::WidthMismatch {
                what: "output",
                expected: output_width,
                found: row.output.width(),
                at: Some(Position::Row(i)),
            });
        }
    }
    Ok(())
}

/// Two outputs conflict if some position is specified in both with different bits.
fn outputs_conflict(a: &Pattern, b: &Pattern) -> bool {
    a.symbols()
        .iter()
        .zip(b.symbols())
        .any(|(x, y)| !x.is_dont_care() && !y.is_dont_care() && x != y)
}
