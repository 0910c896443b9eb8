//! Wildcard matching of concrete inputs against patterns.
//!
//! A pattern matches a candidate iff at every position the pattern symbol is a
//! don't-care or equal to the candidate symbol. This is plain symbol equality:
//! a don't-care in the *candidate* only matches a don't-care in the pattern.

use crate::error::{Error, Result};
use crate::types::{check_wildcard, Pattern};

/// Returns `true` if `candidate` is consistent with `pattern`.
///
/// Fails with [`Error::WidthMismatch`] if the widths differ.
pub fn matches(pattern: &Pattern, candidate: &Pattern) -> Result<bool> {
    if pattern.width() != candidate.width() {
        return Err(Error::WidthMismatch {
            what: "candidate",
            expected: pattern.width(),
            found: candidate.width(),
            at: None,
        });
    }
    Ok(pattern
        .symbols()
        .iter()
        .zip(candidate.symbols())
        .all(|(p, c)| p.is_dont_care() || p == c))
}

/// String-level variant of [`matches`] with an explicit wildcard character.
///
/// Works on characters, so any alphabet is accepted. The wildcard must not be `0` or `1`.
pub fn matches_str(pattern: &str, candidate: &str, wildcard: char) -> Result<bool> {
    check_wildcard(wildcard)?;
    let expected = pattern.chars().count();
    let found = candidate.chars().count();
    if expected != found {
        return Err(Error::WidthMismatch {
            what: "candidate",
            expected,
            found,
            at: None,
        });
    }
    Ok(pattern
        .chars()
        .zip(candidate.chars())
        .all(|(p, c)| p == wildcard || p == c))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::enumerate::all_bitstrings;

    fn pat(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_concrete_is_equality() {
        for p in all_bitstrings(3).unwrap() {
            for c in all_bitstrings(3).unwrap() {
                assert_eq!(matches(&p, &c).unwrap(), p == c);
            }
        }
    }

    #[test]
    fn test_all_wildcard_matches_everything() {
        let p = Pattern::dont_care(4);
        assert!(all_bitstrings(4).unwrap().all(|c| matches(&p, &c).unwrap()));
    }

    #[test]
    fn test_partial_wildcard() {
        assert!(matches(&pat("0-"), &pat("00")).unwrap());
        assert!(matches(&pat("0-"), &pat("01")).unwrap());
        assert!(!matches(&pat("0-"), &pat("10")).unwrap());
    }

    #[test]
    fn test_wildcard_in_candidate() {
        assert!(!matches(&pat("01"), &pat("0-")).unwrap());
        assert!(matches(&pat("0-"), &pat("0-")).unwrap());
    }

    #[test]
    fn test_width_mismatch() {
        let err = matches(&pat("01"), &pat("011")).unwrap_err();
        assert!(matches!(
            err,
            Error::WidthMismatch {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_str_hash_wildcard() {
        assert!(matches_str("1#0", "110", '#').unwrap());
        assert!(!matches_str("1#0", "111", '#').unwrap());
        assert!(!matches_str("1-0", "110", '#').unwrap());
        assert!(matches_str("1-0", "110", '-').unwrap());
        assert!(matches_str("1#", "101", '#').is_err());
    }

    #[test]
    fn test_str_rejects_bit_wildcard() {
        assert!(matches!(matches_str("0", "1", '0'), Err(Error::Format { .. })));
        assert!(matches!(matches_str("1", "1", '1'), Err(Error::Format { .. })));
    }
}
