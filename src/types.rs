//! Ternary patterns and truth-table rows.
//!
//! A [`Pattern`] is a fixed-width sequence of [`Symbol`]s over `{0, 1, don't-care}`.
//! The same type is used for input cubes and for output labels.
//!
//! The don't-care symbol has two textual spellings: `-` in PLA files
//! ([`Pattern::DONT_CARE`]) and `#` in classifier conditions
//! ([`Pattern::CONDITION_DONT_CARE`]). Both parse to [`Symbol::DontCare`],
//! so the spelling never leaks into matching or completion.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// A single position of a [`Pattern`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Symbol {
    Zero,
    One,
    DontCare,
}

impl Symbol {
    /// Parses a character, treating `wildcard` as the don't-care symbol.
    pub fn from_char(c: char, wildcard: char) -> Option<Self> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            _ if c == wildcard => Some(Symbol::DontCare),
            _ => None,
        }
    }

    /// Renders the symbol, spelling don't-care as `wildcard`.
    pub fn to_char(self, wildcard: char) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::DontCare => wildcard,
        }
    }

    pub fn is_dont_care(self) -> bool {
        self == Symbol::DontCare
    }
}

impl From<bool> for Symbol {
    fn from(bit: bool) -> Self {
        if bit {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }
}

/// A fixed-width ternary pattern (cube).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Pattern(Vec<Symbol>);

impl Pattern {
    /// Don't-care spelling in PLA files.
    pub const DONT_CARE: char = '-';
    /// Don't-care spelling in classifier conditions.
    pub const CONDITION_DONT_CARE: char = '#';

    pub fn new(symbols: Vec<Symbol>) -> Self {
        Pattern(symbols)
    }

    /// The all-don't-care pattern of the given width.
    ///
    /// As an output label this means "unspecified".
    pub fn dont_care(width: usize) -> Self {
        Pattern(vec![Symbol::DontCare; width])
    }

    /// The concrete pattern for `index`, most significant bit first.
    ///
    /// # Panics
    ///
    /// Panics if `width > 64`.
    pub fn from_index(index: u64, width: usize) -> Self {
        assert!(width <= 64, "Width should be in the range 0..=64");
        Pattern(
            (0..width)
                .rev()
                .map(|bit| Symbol::from((index >> bit) & 1 == 1))
                .collect(),
        )
    }

    /// One-hot label: a single `1` at `index`, `0` everywhere else.
    ///
    /// Used to encode a niche or cluster number as an output label.
    ///
    /// # Panics
    ///
    /// Panics if `index >= width`.
    pub fn one_hot(index: usize, width: usize) -> Self {
        assert!(index < width, "One-hot index {} out of range for width {}", index, width);
        let mut symbols = vec![Symbol::Zero; width];
        symbols[index] = Symbol::One;
        Pattern(symbols)
    }

    /// Parses a pattern spelled with `wildcard` as the don't-care symbol.
    ///
    /// Fails with [`Error::Format`] if `wildcard` is `0` or `1`.
    pub fn parse_with(s: &str, wildcard: char) -> Result<Self> {
        check_wildcard(wildcard)?;
        s.chars()
            .map(|c| {
                Symbol::from_char(c, wildcard).ok_or_else(|| Error::Format {
                    line: None,
                    message: format!("invalid symbol {:?} in pattern {:?}", c, s),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Pattern)
    }

    /// Parses a classifier condition, where don't-care is spelled `#`.
    pub fn parse_condition(s: &str) -> Result<Self> {
        Self::parse_with(s, Self::CONDITION_DONT_CARE)
    }

    /// Renders the pattern with `wildcard` as the don't-care symbol.
    pub fn to_string_with(&self, wildcard: char) -> String {
        self.0.iter().map(|s| s.to_char(wildcard)).collect()
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Returns `true` if the pattern contains no don't-care.
    pub fn is_concrete(&self) -> bool {
        self.0.iter().all(|s| !s.is_dont_care())
    }

    /// Returns `true` if every position is a don't-care.
    pub fn is_dont_care(&self) -> bool {
        self.0.iter().all(|s| s.is_dont_care())
    }

    /// Number of positions that are not don't-care.
    pub fn specificity(&self) -> usize {
        self.0.iter().filter(|s| !s.is_dont_care()).count()
    }

    /// Number of concrete inputs this pattern covers, `2^(don't-cares)`.
    pub fn coverage_size(&self) -> BigUint {
        BigUint::from(1u8) << (self.width() - self.specificity())
    }

    /// Index of a concrete pattern (inverse of [`Pattern::from_index`]).
    ///
    /// Returns `None` if the pattern has a don't-care or is wider than 64.
    pub fn to_index(&self) -> Option<u64> {
        if self.width() > 64 {
            return None;
        }
        self.0.iter().try_fold(0u64, |acc, s| match s {
            Symbol::Zero => Some(acc << 1),
            Symbol::One => Some((acc << 1) | 1),
            Symbol::DontCare => None,
        })
    }

    /// Returns `true` if `self` matches every concrete input that `other` matches.
    pub fn subsumes(&self, other: &Pattern) -> Result<bool> {
        if self.width() != other.width() {
            return Err(Error::WidthMismatch {
                what: "pattern",
                expected: self.width(),
                found: other.width(),
                at: None,
            });
        }
        Ok(self.0.iter().zip(&other.0).all(|(a, b)| a.is_dont_care() || a == b))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.to_char(Pattern::DONT_CARE))?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Parses PLA spelling (`0`, `1`, `-`).
    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse_with(s, Pattern::DONT_CARE)
    }
}

impl From<Vec<Symbol>> for Pattern {
    fn from(symbols: Vec<Symbol>) -> Self {
        Pattern(symbols)
    }
}

/// A truth-table row: input pattern and output label.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Row {
    pub input: Pattern,
    pub output: Pattern,
}

impl Row {
    pub fn new(input: Pattern, output: Pattern) -> Self {
        Row { input, output }
    }

    /// Parses a row from PLA-spelled input and output strings.
    pub fn parse(input: &str, output: &str) -> Result<Self> {
        Ok(Row::new(input.parse()?, output.parse()?))
    }

    /// Builds a row from a classifier condition (`#` for don't-care) and an output label.
    pub fn from_condition(condition: &str, output: Pattern) -> Result<Self> {
        Ok(Row::new(Pattern::parse_condition(condition)?, output))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.input, self.output)
    }
}

/// A wildcard spelled as a bit would shadow that bit.
pub(crate) fn check_wildcard(wildcard: char) -> Result<()> {
    if wildcard == '0' || wildcard == '1' {
        return Err(Error::Format {
            line: None,
            message: format!("wildcard {:?} collides with a bit symbol", wildcard),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let p: Pattern = "01-".parse().unwrap();
        assert_eq!(p.symbols(), &[Symbol::Zero, Symbol::One, Symbol::DontCare]);
        assert_eq!(p.to_string(), "01-");
        assert_eq!(p.to_string_with('#'), "01#");
    }

    #[test]
    fn test_bit_wildcard_rejected() {
        assert!(matches!(Pattern::parse_with("01", '0'), Err(Error::Format { .. })));
        assert!(matches!(Pattern::parse_with("01", '1'), Err(Error::Format { .. })));
        assert_eq!(Symbol::from_char('0', '0'), Some(Symbol::Zero));
    }

    #[test]
    fn test_parse_condition() {
        let p = Pattern::parse_condition("1#0").unwrap();
        assert_eq!(p.to_string(), "1-0");
        assert!(Pattern::parse_condition("1-0").is_err());
    }

    #[test]
    fn test_parse_invalid_symbol() {
        let err = "0x1".parse::<Pattern>().unwrap_err();
        assert!(matches!(err, Error::Format { line: None, .. }));
    }

    #[test]
    fn test_index_roundtrip() {
        let p = Pattern::from_index(5, 4);
        assert_eq!(p.to_string(), "0101");
        assert_eq!(p.to_index(), Some(5));
        assert_eq!("01-1".parse::<Pattern>().unwrap().to_index(), None);
    }

    #[test]
    fn test_one_hot() {
        assert_eq!(Pattern::one_hot(0, 3).to_string(), "100");
        assert_eq!(Pattern::one_hot(2, 3).to_string(), "001");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_one_hot_out_of_range() {
        Pattern::one_hot(3, 3);
    }

    #[test]
    fn test_specificity_and_coverage() {
        let p: Pattern = "1--0-".parse().unwrap();
        assert_eq!(p.specificity(), 2);
        assert_eq!(p.coverage_size(), BigUint::from(8u32));
        assert!(!p.is_concrete());
        assert!(Pattern::dont_care(4).is_dont_care());

        let wide = Pattern::dont_care(100);
        assert_eq!(wide.coverage_size(), BigUint::from(1u8) << 100usize);
    }

    #[test]
    fn test_subsumes() {
        let general: Pattern = "1-".parse().unwrap();
        let specific: Pattern = "10".parse().unwrap();
        assert!(general.subsumes(&specific).unwrap());
        assert!(!specific.subsumes(&general).unwrap());
        assert!(general.subsumes(&general).unwrap());
        assert!(general.subsumes(&"1--".parse().unwrap()).is_err());
    }
}
