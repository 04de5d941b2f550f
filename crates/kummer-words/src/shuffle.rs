//! Shuffle, quasi-shuffle and concatenation products.
//!
//! The shuffle product of two words is the sum of all their interleavings
//! that preserve the order of letters within each word:
//!
//! ```text
//! 1 ш v = v,   u ш 1 = u,   ua ш vb = (u ш vb)a + (ua ш v)b
//! ```
//!
//! Products are computed bottom-up over prefix pairs, keeping one row of the
//! table at a time, so the recursion depth never depends on word length.

use kummer_linear::{outer_product, outer_product_expanding, BasicFormalSum, FormalSum, SimpleParam, VectorParam};
use kummer_packed::Sequence;

type SeqSum<S> = BasicFormalSum<SimpleParam<S>>;

/// Adds `sum` with `letter` appended to every word into `out`.
fn append_letter<S: Sequence>(sum: &SeqSum<S>, letter: S::Item, out: &mut SeqSum<S>) {
    for (key, coeff) in sum.iter() {
        let mut extended = key.clone();
        extended.push(letter);
        out.add_to_key(extended, coeff);
    }
}

/// Computes the prefix table of a (quasi-)shuffle and returns its last cell.
///
/// `glue` is the letter merging rule of the quasi-shuffle; `None` gives
/// the plain shuffle.
fn prefix_table<S, G>(u: &S, v: &S, glue: Option<G>) -> SeqSum<S>
where
    S: Sequence,
    G: Fn(S::Item, S::Item) -> S::Item,
{
    let n = v.len();
    // row[j] holds the product of the current prefix of u with v[..j]
    let mut row: Vec<SeqSum<S>> = (0..=n).map(|j| SeqSum::single_key(v.slice(0..j))).collect();
    for i in 1..=u.len() {
        let a = u.get(i - 1);
        let mut next = Vec::with_capacity(n + 1);
        next.push(SeqSum::single_key(u.slice(0..i)));
        for j in 1..=n {
            let b = v.get(j - 1);
            let mut cell = SeqSum::zero();
            append_letter(&row[j], a, &mut cell);
            append_letter(&next[j - 1], b, &mut cell);
            if let Some(glue) = &glue {
                append_letter(&row[j - 1], glue(a, b), &mut cell);
            }
            next.push(cell);
        }
        row = next;
    }
    row.pop().unwrap_or_default()
}

/// Shuffle product of two words.
///
/// Every one of the `C(|u| + |v|, |u|)` interleavings contributes 1, so
/// coefficients count multiplicities. The product of two empty words is
/// the zero sum.
#[must_use]
pub fn shuffle_product<S: Sequence>(u: &S, v: &S) -> FormalSum<SimpleParam<S>> {
    if u.is_empty() && v.is_empty() {
        return FormalSum::zero();
    }
    FormalSum::from_main(prefix_table(u, v, None::<fn(S::Item, S::Item) -> S::Item>))
}

/// Shuffle product of a list of words, folded left to right.
///
/// Returns zero for an empty list.
#[must_use]
pub fn shuffle_product_multi<S: Sequence>(words: &[S]) -> FormalSum<SimpleParam<S>> {
    let Some((first, rest)) = words.split_first() else {
        return FormalSum::zero();
    };
    rest.iter().fold(FormalSum::single_key(first.clone()), |acc, w| {
        shuffle_product_expr(&acc, &FormalSum::single_key(w.clone()))
    })
}

/// Bilinear extension of the shuffle product to sums over any word basis.
#[must_use]
pub fn shuffle_product_expr<P: VectorParam>(lhs: &FormalSum<P>, rhs: &FormalSum<P>) -> FormalSum<P> {
    outer_product_expanding(lhs, rhs, |a, b| {
        shuffle_product(&P::key_to_vector(a), &P::key_to_vector(b)).mapped_key(P::vector_to_key)
    })
}

/// Quasi-shuffle (stuffle) product of two words.
///
/// ```text
/// ua ⋆ vb = (u ⋆ vb)a + (ua ⋆ v)b + (u ⋆ v)(a ⋄ b)
/// ```
///
/// where `glue` computes `a ⋄ b`.
pub fn quasi_shuffle_product<S, G>(u: &S, v: &S, glue: G) -> FormalSum<SimpleParam<S>>
where
    S: Sequence,
    G: Fn(S::Item, S::Item) -> S::Item,
{
    if u.is_empty() && v.is_empty() {
        return FormalSum::zero();
    }
    FormalSum::from_main(prefix_table(u, v, Some(glue)))
}

/// Concatenation product: `u (x) v` maps to the word `uv`.
#[must_use]
pub fn tensor_product<P: VectorParam>(lhs: &FormalSum<P>, rhs: &FormalSum<P>) -> FormalSum<P> {
    outer_product(lhs, rhs, |a, b| {
        let mut joined = P::key_to_vector(a);
        let tail = P::key_to_vector(b);
        for i in 0..tail.len() {
            joined.push(tail.get(i));
        }
        P::vector_to_key(&joined)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::{word, word_expr, Word, WordExpr};

    fn w(letters: &[u8]) -> WordExpr {
        word_expr(letters)
    }

    #[test]
    fn test_shuffle_small() {
        assert_eq!(
            shuffle_product(&word(&[1, 2]), &word(&[3])),
            w(&[1, 2, 3]) + w(&[1, 3, 2]) + w(&[3, 1, 2])
        );
    }

    #[test]
    fn test_shuffle_multiplicity() {
        // [0,1] ш [0] = [0,1,0] + 2 [0,0,1]
        assert_eq!(
            shuffle_product(&word(&[0, 1]), &word(&[0])),
            w(&[0, 1, 0]) + w(&[0, 0, 1]) * 2
        );
        assert_eq!(
            shuffle_product(&word(&[1]), &word(&[1])),
            w(&[1, 1]) * 2
        );
    }

    #[test]
    fn test_shuffle_with_empty() {
        let empty = Word::new();
        assert_eq!(shuffle_product(&empty, &word(&[4, 2])), w(&[4, 2]));
        assert_eq!(shuffle_product(&word(&[4, 2]), &empty), w(&[4, 2]));
        assert!(shuffle_product(&empty, &empty).is_zero());
    }

    #[test]
    fn test_shuffle_term_count() {
        let prod = shuffle_product(&word(&[1, 2, 3]), &word(&[4, 5, 6, 7]));
        // All letters distinct: C(7, 3) interleavings, each once
        assert_eq!(prod.num_terms(), 35);
        assert_eq!(prod.l1_norm(), 35);
    }

    #[test]
    fn test_shuffle_multi() {
        let prod = shuffle_product_multi(&[word(&[0, 1, 0]), word(&[1, 0]), word(&[1])]);
        let expected = w(&[0, 1, 0, 1, 0, 1]) * 2
            + w(&[0, 1, 0, 1, 1, 0]) * 4
            + w(&[0, 1, 1, 0, 0, 1]) * 4
            + w(&[0, 1, 1, 0, 1, 0]) * 8
            + w(&[0, 1, 1, 1, 0, 0]) * 12
            + w(&[1, 0, 0, 1, 0, 1]) * 2
            + w(&[1, 0, 0, 1, 1, 0]) * 4
            + w(&[1, 0, 1, 0, 0, 1]) * 2
            + w(&[1, 0, 1, 0, 1, 0]) * 6
            + w(&[1, 0, 1, 1, 0, 0]) * 8
            + w(&[1, 1, 0, 0, 1, 0]) * 4
            + w(&[1, 1, 0, 1, 0, 0]) * 4;
        assert_eq!(prod, expected);
        assert!(shuffle_product_multi::<Word>(&[]).is_zero());
        assert_eq!(shuffle_product_multi(&[word(&[5])]), w(&[5]));
    }

    #[test]
    fn test_shuffle_expr_is_bilinear() {
        let lhs = w(&[1]) - w(&[2]) * 2;
        let rhs = w(&[3]);
        let expected = shuffle_product(&word(&[1]), &word(&[3]))
            - shuffle_product(&word(&[2]), &word(&[3])) * 2;
        assert_eq!(shuffle_product_expr(&lhs, &rhs), expected);
    }

    #[test]
    fn test_shuffle_over_vec() {
        let prod = shuffle_product(&vec![10u16, 20], &vec![30u16]);
        assert_eq!(prod.coeff(&vec![30, 10, 20]), 1);
        assert_eq!(prod.num_terms(), 3);
    }

    #[test]
    fn test_quasi_shuffle() {
        let glue = |a: u8, b: u8| a + b;
        assert_eq!(
            quasi_shuffle_product(&word(&[1]), &word(&[2]), glue),
            w(&[1, 2]) + w(&[2, 1]) + w(&[3])
        );
        // [1,2] ⋆ [4]: three shuffles plus gluing 4 onto either letter
        assert_eq!(
            quasi_shuffle_product(&word(&[1, 2]), &word(&[4]), glue),
            w(&[1, 2, 4]) + w(&[1, 4, 2]) + w(&[4, 1, 2]) + w(&[5, 2]) + w(&[1, 6])
        );
        let concat_digits = |a: u8, b: u8| 10 * a + b;
        assert_eq!(
            quasi_shuffle_product(&word(&[1, 2, 3]), &word(&[8]), concat_digits),
            w(&[8, 1, 2, 3])
                + w(&[1, 8, 2, 3])
                + w(&[1, 2, 8, 3])
                + w(&[1, 2, 3, 8])
                + w(&[18, 2, 3])
                + w(&[1, 28, 3])
                + w(&[1, 2, 38])
        );
    }

    #[test]
    fn test_tensor_product() {
        let lhs = w(&[1]) + w(&[1, 2]);
        let rhs = w(&[2, 3]) - w(&[3]);
        // [1][2,3] and [1,2][3] coincide and cancel
        assert_eq!(
            tensor_product(&lhs, &rhs),
            w(&[1, 2, 2, 3]) - w(&[1, 3])
        );
    }
}
