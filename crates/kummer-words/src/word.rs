//! Words and tensor words.
//!
//! A [`Word`] is a short sequence of byte-sized letters stored inline. It
//! is the monomial of the shuffle algebra. A [`MultiWord`] is an ordered
//! tuple of words, the monomial of tensor powers such as coproducts.

use smallvec::SmallVec;

use kummer_linear::{FormalSum, SimpleParam, VectorParam};
use kummer_packed::{PackedSequence, Sequence};

/// A word over an alphabet of at most 256 letters.
pub type Word = PackedSequence<u8, 14>;

/// Parameter of sums of words.
pub type WordParam = SimpleParam<Word>;

/// A formal sum of words.
pub type WordExpr = FormalSum<WordParam>;

/// An ordered tuple of words.
pub type MultiWord = SmallVec<[Word; 2]>;

/// Parameter of sums of tensor words.
pub type CoWordParam = SimpleParam<MultiWord>;

/// A formal sum of tensor words.
pub type WordCoExpr = FormalSum<CoWordParam>;

/// Builds a word from letters.
#[must_use]
pub fn word(letters: &[u8]) -> Word {
    Word::from_slice(letters)
}

/// Builds the sum `1 * word`.
#[must_use]
pub fn word_expr(letters: &[u8]) -> WordExpr {
    WordExpr::single_key(word(letters))
}

/// Builds a tensor word from its parts.
#[must_use]
pub fn multi_word(parts: &[&[u8]]) -> MultiWord {
    parts.iter().map(|letters| word(letters)).collect()
}

/// Builds the sum `1 * (parts[0] (x) parts[1] (x) ...)`.
#[must_use]
pub fn co_expr(parts: &[&[u8]]) -> WordCoExpr {
    WordCoExpr::single_key(multi_word(parts))
}

/// Returns the common length of all words in `expr`.
///
/// Returns `None` for the zero sum.
///
/// # Panics
///
/// Panics if the words have different lengths.
#[must_use]
pub fn uniform_length<P: VectorParam>(expr: &FormalSum<P>) -> Option<usize> {
    let mut length = None;
    for (key, _) in expr.iter() {
        let len = P::key_to_vector(key).len();
        match length {
            None => length = Some(len),
            Some(expected) => assert_eq!(
                expected, len,
                "expected words of a single length, found {expected} and {len}"
            ),
        }
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_stays_inline() {
        let w = word(&[1; 14]);
        assert!(w.is_inline());
        assert!(!word(&[1; 15]).is_inline());
    }

    #[test]
    fn test_multi_word() {
        let mw = multi_word(&[&[1, 2], &[3]]);
        assert_eq!(mw.len(), 2);
        assert_eq!(mw[1], word(&[3]));
        assert!(multi_word(&[&[1], &[2]]) < multi_word(&[&[1, 2], &[]]));
    }

    #[test]
    fn test_uniform_length() {
        assert_eq!(uniform_length(&(word_expr(&[1, 2]) + word_expr(&[3, 1]))), Some(2));
        assert_eq!(uniform_length(&WordExpr::zero()), None);
    }

    #[test]
    #[should_panic(expected = "single length")]
    fn test_mixed_length_is_fatal() {
        let _ = uniform_length(&(word_expr(&[1]) + word_expr(&[1, 2])));
    }
}
