//! Lyndon factorization and the Lyndon basis of the shuffle algebra.
//!
//! By the Chen-Fox-Lyndon theorem every word factors uniquely as a
//! non-increasing concatenation of Lyndon words `l1 >= l2 >= ... >= lk`.
//! Over the integers the shuffle algebra is freely generated by Lyndon
//! words (up to the factorial normalization below), so every sum of words
//! has a unique expression in which no non-Lyndon word appears.
//!
//! # Algorithm
//!
//! Terms are kept in an ordered work-list, largest word first. For a
//! non-Lyndon word `w` with factorization `l1^m1 ... lr^mr`:
//!
//! ```text
//! l1 ш ... ш lk = (m1! ... mr!) * w + (strictly smaller words)
//! ```
//!
//! so `w` is replaced by the smaller words with the opposite sign. The
//! largest pending word strictly decreases, and there are finitely many
//! words of a given length, so the loop terminates.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use smallvec::SmallVec;

use kummer_linear::{Coeff, FormalSum, SimpleParam, VectorParam};
use kummer_packed::Sequence;

use crate::shuffle::shuffle_product_multi;

/// Lyndon factors of a word, in order.
pub type LyndonFactorization<S> = SmallVec<[S; 4]>;

/// Splits `word` into non-increasing Lyndon words (Duval's algorithm).
///
/// Runs in linear time. The empty word has no factors.
pub fn lyndon_factorize<S, F>(word: &S, mut compare: F) -> LyndonFactorization<S>
where
    S: Sequence,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    let n = word.len();
    let mut factors = LyndonFactorization::new();
    let mut start = 0;
    while start < n {
        let mut k = start;
        let mut m = start + 1;
        while m < n {
            match compare(&word.get(k), &word.get(m)) {
                Ordering::Less => k = start,
                Ordering::Equal => k += 1,
                Ordering::Greater => break,
            }
            m += 1;
        }
        let period = m - k;
        while start <= k {
            factors.push(word.slice(start..start + period));
            start += period;
        }
    }
    factors
}

/// Returns true if `word` is a Lyndon word: non-empty and strictly smaller
/// than each of its proper rotations.
pub fn is_lyndon_word<S, F>(word: &S, compare: F) -> bool
where
    S: Sequence,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    !word.is_empty() && lyndon_factorize(word, compare).len() == 1
}

/// Lexicographic order on words induced by [`VectorParam::lyndon_compare`].
///
/// A proper prefix sorts first.
pub fn lyndon_word_compare<P: VectorParam>(lhs: &P::Vector, rhs: &P::Vector) -> Ordering {
    for i in 0..lhs.len().min(rhs.len()) {
        match P::lyndon_compare(&lhs.get(i), &rhs.get(i)) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    lhs.len().cmp(&rhs.len())
}

/// Work-list entry ordered largest word first.
struct Pending<P: VectorParam> {
    word: P::Vector,
    _param: PhantomData<fn() -> P>,
}

impl<P: VectorParam> Pending<P> {
    fn new(word: P::Vector) -> Self {
        Self {
            word,
            _param: PhantomData,
        }
    }
}

impl<P: VectorParam> PartialEq for Pending<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P: VectorParam> Eq for Pending<P> {}

impl<P: VectorParam> PartialOrd for Pending<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: VectorParam> Ord for Pending<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        lyndon_word_compare::<P>(&other.word, &self.word)
    }
}

/// One rewrite performed while converting to the Lyndon basis.
#[derive(Debug, Clone)]
pub struct RewriteStep<S> {
    /// The non-Lyndon word that was replaced.
    pub word: S,
    /// Its pending coefficient when it was replaced.
    pub coeff: Coeff,
    /// Number of Lyndon factors.
    pub num_factors: usize,
    /// Number of smaller words it was replaced with.
    pub num_replacements: usize,
}

/// Record of a Lyndon basis conversion.
#[derive(Debug, Clone)]
pub struct LyndonTrace<S> {
    /// Rewrites in processing order.
    pub steps: Vec<RewriteStep<S>>,
    /// Number of terms emitted unchanged or through a shortcut.
    pub num_direct: usize,
    /// Wall time of the conversion.
    pub duration: Duration,
}

impl<S> Default for LyndonTrace<S> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            num_direct: 0,
            duration: Duration::ZERO,
        }
    }
}

impl<S: Sequence> LyndonTrace<S> {
    /// Returns true if every rewritten word is smaller than the one before,
    /// under the letter order of `P`.
    #[must_use]
    pub fn is_strictly_decreasing<P: VectorParam<Vector = S>>(&self) -> bool {
        self.steps
            .windows(2)
            .all(|pair| lyndon_word_compare::<P>(&pair[1].word, &pair[0].word) == Ordering::Less)
    }
}

/// Rewrites `expr` so that only Lyndon words appear.
///
/// The result equals `expr` in the shuffle algebra. Annotations of `expr`
/// are copied onto the result unchanged.
#[must_use]
pub fn to_lyndon_basis<P: VectorParam>(expr: &FormalSum<P>) -> FormalSum<P> {
    convert(expr, None)
}

/// Same as [`to_lyndon_basis`], also returning a record of the rewrites.
#[must_use]
pub fn to_lyndon_basis_traced<P: VectorParam>(expr: &FormalSum<P>) -> (FormalSum<P>, LyndonTrace<P::Vector>) {
    let mut trace = LyndonTrace::default();
    let ret = convert(expr, Some(&mut trace));
    (ret, trace)
}

fn factorial(n: Coeff) -> Coeff {
    (2..=n).product()
}

/// Product of `m!` over the multiplicities `m` of distinct factors.
fn multiplicity_factorials<S: Sequence>(factors: &[S]) -> Coeff {
    // Factors are non-increasing, so equal factors are adjacent.
    let mut denominator = 1;
    let mut run = 1;
    for pair in factors.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
        } else {
            denominator *= factorial(run);
            run = 1;
        }
    }
    denominator * factorial(run)
}

fn convert<P: VectorParam>(
    expr: &FormalSum<P>,
    mut trace: Option<&mut LyndonTrace<P::Vector>>,
) -> FormalSum<P> {
    let start = Instant::now();
    let mut pending: BTreeMap<Pending<P>, Coeff> = BTreeMap::new();
    for (key, coeff) in expr.iter() {
        *pending.entry(Pending::new(P::key_to_vector(key))).or_insert(0) += coeff;
    }
    let mut converted: FormalSum<SimpleParam<P::Vector>> = FormalSum::zero();
    let mut num_direct = 0;
    #[cfg(debug_assertions)]
    let mut last_rewritten: Option<P::Vector> = None;

    while let Some((Pending { word, .. }, coeff)) = pending.pop_first() {
        if coeff == 0 {
            continue;
        }
        if word.len() <= 2 {
            num_direct += 1;
            if word.len() < 2 {
                converted.add_to_key(word, coeff);
                continue;
            }
            let (a, b) = (word.get(0), word.get(1));
            match P::lyndon_compare(&a, &b) {
                Ordering::Less => converted.add_to_key(word, coeff),
                Ordering::Greater => {
                    let negated = coeff
                        .checked_neg()
                        .unwrap_or_else(|| panic!("coefficient overflow while rewriting {word:?}"));
                    converted.add_to_key(<P::Vector as Sequence>::from_items(&[b, a]), negated);
                }
                // ab = ba: the term vanishes
                Ordering::Equal => {}
            }
            continue;
        }

        let factors = lyndon_factorize(&word, P::lyndon_compare);
        assert!(!factors.is_empty(), "empty Lyndon factorization of {word:?}");
        if factors.len() == 1 {
            num_direct += 1;
            converted.add_to_key(word, coeff);
            continue;
        }

        #[cfg(debug_assertions)]
        {
            if let Some(prev) = &last_rewritten {
                debug_assert_eq!(
                    lyndon_word_compare::<P>(&word, prev),
                    Ordering::Less,
                    "Lyndon rewrite did not decrease: {word:?} after {prev:?}"
                );
            }
            last_rewritten = Some(word.clone());
        }

        let denominator = multiplicity_factorials(&factors);
        let mut replacement = shuffle_product_multi(&factors);
        if let Err(err) = replacement.div_int(denominator) {
            panic!("shuffle of the Lyndon factors of {word:?} is not divisible: {err}");
        }
        assert_eq!(
            replacement.coeff_for_key(&word),
            1,
            "{word:?} does not lead the shuffle of its Lyndon factors"
        );
        replacement.add_to_key(word.clone(), -1);

        if let Some(trace) = trace.as_deref_mut() {
            trace.steps.push(RewriteStep {
                word: word.clone(),
                coeff,
                num_factors: factors.len(),
                num_replacements: replacement.num_terms(),
            });
        }
        for (smaller, inner) in replacement {
            debug_assert_eq!(converted.coeff_for_key(&smaller), 0);
            let slot = pending.entry(Pending::new(smaller)).or_insert(0);
            let current = *slot;
            *slot = coeff
                .checked_mul(inner)
                .and_then(|delta| current.checked_sub(delta))
                .unwrap_or_else(|| panic!("coefficient overflow while rewriting {word:?}"));
        }
    }

    if let Some(trace) = trace {
        trace.num_direct = num_direct;
        trace.duration = start.elapsed();
    }
    let mut ret: FormalSum<P> = converted.mapped_key(P::vector_to_key);
    ret.copy_annotations(expr);
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::{shuffle_product, shuffle_product_expr};
    use crate::word::{word, word_expr, Word, WordExpr, WordParam};

    fn w(letters: &[u8]) -> WordExpr {
        word_expr(letters)
    }

    fn factor_letters(letters: &[u8]) -> Vec<Vec<u8>> {
        lyndon_factorize(&word(letters), u8::cmp)
            .into_iter()
            .map(|f| f.to_vec())
            .collect()
    }

    #[test]
    fn test_factorize() {
        assert_eq!(factor_letters(&[1, 2, 3, 2, 1]), vec![vec![1, 2, 3, 2], vec![1]]);
        assert_eq!(factor_letters(&[1, 2, 2, 1, 1, 2]), vec![vec![1, 2, 2], vec![1, 1, 2]]);
        assert_eq!(factor_letters(&[2, 1, 1]), vec![vec![2], vec![1], vec![1]]);
        assert_eq!(factor_letters(&[0, 1, 0, 1]), vec![vec![0, 1], vec![0, 1]]);
        assert!(factor_letters(&[]).is_empty());
    }

    #[test]
    fn test_factorize_with_reversed_order() {
        let factors = lyndon_factorize(&word(&[1, 2, 3]), |a: &u8, b: &u8| b.cmp(a));
        assert_eq!(factors.len(), 3);
        assert!(is_lyndon_word(&word(&[3, 2, 1]), |a: &u8, b: &u8| b.cmp(a)));
    }

    #[test]
    fn test_is_lyndon_word() {
        assert!(is_lyndon_word(&word(&[0]), u8::cmp));
        assert!(is_lyndon_word(&word(&[0, 0, 1]), u8::cmp));
        assert!(is_lyndon_word(&word(&[0, 1, 1]), u8::cmp));
        assert!(!is_lyndon_word(&word(&[0, 1, 0]), u8::cmp));
        assert!(!is_lyndon_word(&word(&[1, 1]), u8::cmp));
        assert!(!is_lyndon_word(&Word::new(), u8::cmp));
    }

    #[test]
    fn test_lyndon_words_are_fixed_points() {
        for letters in [&[0][..], &[0, 0, 1], &[1, 3, 2], &[0, 1, 0, 1, 1]] {
            assert_eq!(to_lyndon_basis(&w(letters)), w(letters));
        }
    }

    #[test]
    fn test_two_letter_shortcut() {
        assert_eq!(to_lyndon_basis(&(w(&[1, 2]) + w(&[7, 5]))), w(&[1, 2]) - w(&[5, 7]));
        assert!(to_lyndon_basis(&w(&[3, 3])).is_zero());
    }

    #[test]
    fn test_three_letters() {
        assert_eq!(
            to_lyndon_basis(&(w(&[2, 1, 3]) + w(&[7, 6, 5]))),
            -w(&[1, 2, 3]) - w(&[1, 3, 2]) + w(&[5, 6, 7])
        );
    }

    #[test]
    fn test_repeated_letter_word() {
        // [0,1] ш [0] = [0,1,0] + 2 [0,0,1], and the left side vanishes
        assert_eq!(to_lyndon_basis(&w(&[0, 1, 0])), w(&[0, 0, 1]) * -2);
    }

    #[test]
    #[should_panic(expected = "coefficient overflow while rewriting")]
    fn test_coefficient_overflow_is_fatal() {
        // [1,0,0] pushes -MAX onto [0,1,0], whose rewrite doubles it
        let _ = to_lyndon_basis(&(w(&[1, 0, 0]) * Coeff::MAX));
    }

    #[test]
    #[should_panic(expected = "coefficient overflow while rewriting")]
    fn test_two_letter_overflow_is_fatal() {
        let _ = to_lyndon_basis(&(w(&[1, 0]) * Coeff::MIN));
    }

    #[test]
    fn test_shuffles_vanish() {
        let prod = shuffle_product(&word(&[0, 1]), &word(&[2]));
        assert!(to_lyndon_basis(&prod).is_zero());
        let prod = shuffle_product_expr(&(w(&[0]) - w(&[1, 2])), &w(&[0, 3]));
        assert!(to_lyndon_basis(&prod).is_zero());
    }

    #[test]
    fn test_idempotent() {
        let expr = w(&[3, 1, 2, 0]) + w(&[2, 2, 1, 1]) * 3 - w(&[1, 0, 1, 0]);
        let once = to_lyndon_basis(&expr);
        assert_eq!(to_lyndon_basis(&once), once);
        once.foreach_key(|key, _| assert!(is_lyndon_word(key, u8::cmp)));
    }

    #[test]
    fn test_difference_is_in_shuffle_ideal() {
        // x - L(x) is a sum of shuffles, so it must have the same Lyndon image as 0
        let expr = w(&[2, 1, 0, 1]) - w(&[1, 1, 0, 0]) * 2;
        let diff = &expr - &to_lyndon_basis(&expr);
        assert!(to_lyndon_basis(&diff).is_zero());
    }

    #[test]
    fn test_custom_letter_order() {
        struct Reversed;

        impl kummer_linear::LinearParam for Reversed {
            type Object = Word;
            type Key = Word;

            fn object_to_key(object: &Word) -> Word {
                object.clone()
            }

            fn key_to_object(key: &Word) -> Word {
                key.clone()
            }
        }

        impl VectorParam for Reversed {
            type Vector = Word;

            fn key_to_vector(key: &Word) -> Word {
                key.clone()
            }

            fn vector_to_key(vector: &Word) -> Word {
                vector.clone()
            }

            fn lyndon_compare(lhs: &u8, rhs: &u8) -> Ordering {
                rhs.cmp(lhs)
            }
        }

        let expr = FormalSum::<Reversed>::single_key(word(&[1, 2])) + FormalSum::single_key(word(&[7, 5]));
        assert_eq!(
            to_lyndon_basis(&expr),
            FormalSum::single_key(word(&[7, 5])) - FormalSum::single_key(word(&[2, 1]))
        );
    }

    #[test]
    fn test_annotations_copied() {
        let expr = w(&[1, 0]).annotated("swap");
        let ret = to_lyndon_basis(&expr);
        assert_eq!(ret, -w(&[0, 1]));
        assert_eq!(ret.annotations(), expr.annotations());
    }

    #[test]
    fn test_trace_is_strictly_decreasing() {
        let expr = w(&[3, 2, 1, 0]) + w(&[2, 2, 1, 1, 0]) - w(&[1, 0, 1, 0, 0]);
        let (ret, trace) = to_lyndon_basis_traced(&expr);
        assert_eq!(ret, to_lyndon_basis(&expr));
        assert!(!trace.steps.is_empty());
        assert!(trace.is_strictly_decreasing::<WordParam>());
        assert_eq!(trace.steps[0].word, word(&[3, 2, 1, 0]));
        assert_eq!(trace.steps[0].num_factors, 4);
    }
}
