//! Letters standing for pairs of points.
//!
//! Symbols of polylogarithms on configurations of `n` points use letters
//! `(a, b)` with `1 <= a < b <= n`. They are numbered column by column:
//!
//! ```text
//! (1,2) -> 0, (1,3) -> 1, (2,3) -> 2, (1,4) -> 3, ...
//! ```
//!
//! so the numbering of a smaller dimension is a prefix of the numbering of
//! a larger one.

use std::fmt::Write as _;
use std::sync::OnceLock;

use kummer_linear::{FormalSum, LinearParam, VectorParam};

use crate::word::Word;

/// A pair of point indices `(a, b)` with `a < b`.
pub type PointPair = (u8, u8);

/// Largest dimension whose pairs fit in a byte-sized alphabet.
pub const MAX_PAIR_DIMENSION: u8 = 23;

/// Bijection between point pairs and letters for a fixed dimension.
#[derive(Debug, Clone)]
pub struct AlphabetMapping {
    dimension: u8,
    pairs: Vec<PointPair>,
}

impl AlphabetMapping {
    /// Builds the mapping for points `1..=dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` exceeds [`MAX_PAIR_DIMENSION`].
    #[must_use]
    pub fn new(dimension: u8) -> Self {
        assert!(
            dimension <= MAX_PAIR_DIMENSION,
            "dimension {dimension} exceeds {MAX_PAIR_DIMENSION}"
        );
        let pairs = (2..=dimension)
            .flat_map(|b| (1..b).map(move |a| (a, b)))
            .collect();
        Self { dimension, pairs }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    /// Returns the number of letters.
    #[must_use]
    pub fn alphabet_size(&self) -> usize {
        self.pairs.len()
    }

    /// Returns the letter of `pair`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= a < b <= dimension`.
    #[must_use]
    pub fn to_alphabet(&self, pair: PointPair) -> u8 {
        let (a, b) = pair;
        assert!(
            1 <= a && a < b && b <= self.dimension,
            "invalid pair ({a}, {b}) for dimension {}",
            self.dimension
        );
        let (za, zb) = (u16::from(a - 1), u16::from(b - 1));
        let letter = zb * (zb - 1) / 2 + za;
        u8::try_from(letter).unwrap_or_else(|_| unreachable!("letter {letter} out of range"))
    }

    /// Returns the pair of `letter`.
    ///
    /// # Panics
    ///
    /// Panics if `letter` is not in the alphabet.
    #[must_use]
    pub fn from_alphabet(&self, letter: u8) -> PointPair {
        match self.pairs.get(usize::from(letter)) {
            Some(&pair) => pair,
            None => panic!(
                "letter {letter} outside alphabet of size {}",
                self.pairs.len()
            ),
        }
    }
}

/// The mapping of the largest supported dimension.
///
/// Built on first use and shared afterwards.
pub fn pair_alphabet() -> &'static AlphabetMapping {
    static MAPPING: OnceLock<AlphabetMapping> = OnceLock::new();
    MAPPING.get_or_init(|| AlphabetMapping::new(MAX_PAIR_DIMENSION))
}

/// Parameter of sums over words of point pairs.
///
/// Objects are lists of pairs; keys are the corresponding words.
pub struct PairParam;

impl LinearParam for PairParam {
    type Object = Vec<PointPair>;
    type Key = Word;

    fn object_to_key(object: &Vec<PointPair>) -> Word {
        let mapping = pair_alphabet();
        object.iter().map(|&pair| mapping.to_alphabet(pair)).collect()
    }

    fn key_to_object(key: &Word) -> Vec<PointPair> {
        let mapping = pair_alphabet();
        key.iter().map(|letter| mapping.from_alphabet(letter)).collect()
    }

    fn object_to_string(object: &Vec<PointPair>) -> String {
        let mut out = String::new();
        for (a, b) in object {
            let _ = write!(out, "({a},{b})");
        }
        out
    }
}

impl VectorParam for PairParam {
    type Vector = Word;

    fn key_to_vector(key: &Word) -> Word {
        key.clone()
    }

    fn vector_to_key(vector: &Word) -> Word {
        vector.clone()
    }
}

/// A formal sum of words of point pairs.
pub type PairExpr = FormalSum<PairParam>;
