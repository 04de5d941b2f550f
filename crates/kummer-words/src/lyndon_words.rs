//! Enumeration of Lyndon words.
//!
//! Lyndon words of a fixed length over a finite alphabet span the
//! Lie coalgebra in that weight, which makes them the natural column space
//! for rank computations. They are generated with Duval's successor
//! algorithm and cached per `(alphabet size, length)`.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use kummer_linear::MatrixBuilder;

use crate::word::{Word, WordParam};

/// Returns all Lyndon words of `length` over letters `0..alphabet_size`,
/// in increasing lexicographic order.
///
/// # Panics
///
/// Panics if `alphabet_size` exceeds 256.
#[must_use]
pub fn generate_lyndon_words(alphabet_size: usize, length: usize) -> Vec<Word> {
    assert!(
        alphabet_size <= 256,
        "alphabet of {alphabet_size} letters does not fit in a word"
    );
    if alphabet_size == 0 || length == 0 {
        return Vec::new();
    }
    let max_letter = alphabet_size - 1;
    let mut words = Vec::new();
    let mut current: Vec<usize> = vec![0];
    loop {
        if current.len() == length {
            words.push(current.iter().map(|&letter| letter_to_u8(letter)).collect());
        }
        // Successor: repeat periodically to full length, drop maximal
        // trailing letters, then increment the last one.
        let mut next: Vec<usize> = (0..length).map(|i| current[i % current.len()]).collect();
        while next.last() == Some(&max_letter) {
            next.pop();
        }
        let Some(last) = next.last_mut() else {
            break;
        };
        *last += 1;
        current = next;
    }
    words
}

#[allow(clippy::cast_possible_truncation)]
fn letter_to_u8(letter: usize) -> u8 {
    debug_assert!(letter < 256);
    letter as u8
}

/// Number of Lyndon words of `length` over `alphabet_size` letters.
///
/// Witt's necklace formula: `(1/n) * sum over d | n of mu(d) * k^(n/d)`.
///
/// Saturates at `u64::MAX` when the count does not fit.
#[must_use]
pub fn count_lyndon_words(alphabet_size: u64, length: u32) -> u64 {
    if length == 0 {
        return 0;
    }
    witt_sum(alphabet_size, length)
        .and_then(|total| u64::try_from(total / i128::from(length)).ok())
        .unwrap_or(u64::MAX)
}

fn witt_sum(alphabet_size: u64, length: u32) -> Option<i128> {
    let mut total: i128 = 0;
    for d in (1..=length).filter(|d| length % d == 0) {
        let term = i128::from(alphabet_size).checked_pow(length / d)?;
        total = total.checked_add(i128::from(mobius(d)).checked_mul(term)?)?;
    }
    Some(total)
}

fn mobius(mut n: u32) -> i32 {
    let mut result = 1;
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            n /= p;
            if n % p == 0 {
                return 0;
            }
            result = -result;
        }
        p += 1;
    }
    if n > 1 {
        result = -result;
    }
    result
}

/// Append-only cache of generated Lyndon words.
///
/// Lookups take a shared lock; generation happens outside any lock and the
/// first inserted result wins.
#[derive(Debug, Default)]
pub struct LyndonWordCache {
    words: RwLock<FxHashMap<(usize, usize), Arc<[Word]>>>,
}

impl LyndonWordCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the Lyndon words of `length` over `alphabet_size` letters.
    pub fn get(&self, alphabet_size: usize, length: usize) -> Arc<[Word]> {
        let key = (alphabet_size, length);
        if let Some(words) = self.words.read().get(&key) {
            return Arc::clone(words);
        }
        let generated: Arc<[Word]> = generate_lyndon_words(alphabet_size, length).into();
        Arc::clone(self.words.write().entry(key).or_insert(generated))
    }

    /// Returns the number of cached `(alphabet, length)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}

/// Creates a matrix builder whose columns are the Lyndon words of `length`.
///
/// Rows built from sums in the Lyndon basis of that weight then share one
/// column layout regardless of which words they use.
#[must_use]
pub fn lyndon_matrix_builder(
    cache: &LyndonWordCache,
    alphabet_size: usize,
    length: usize,
) -> MatrixBuilder<WordParam> {
    MatrixBuilder::with_columns(cache.get(alphabet_size, length).iter().cloned())
}
