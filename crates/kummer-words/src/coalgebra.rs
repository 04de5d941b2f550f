//! Coproducts of word sums.
//!
//! The Lie coalgebra structure is expressed through pairs of Lyndon words.
//! Each tensor term `(a, b)` is brought to a normal form in which the
//! antisymmetry `(a, b) = -(b, a)` has been applied, so equal elements have
//! equal representations.

use std::cmp::Ordering;

use kummer_linear::outer_product;

use crate::lyndon::to_lyndon_basis;
use crate::word::{uniform_length, MultiWord, Word, WordCoExpr, WordExpr};

/// Prefix added to annotations carried through [`comultiply`].
pub const COMULT_ANNOTATION_PREFIX: &str = "comult ";

/// Tensor product of two sums, without reduction to the Lyndon basis.
#[must_use]
pub fn coproduct_hopf(lhs: &WordExpr, rhs: &WordExpr) -> WordCoExpr {
    outer_product(lhs, rhs, |a: &Word, b: &Word| -> MultiWord {
        [a.clone(), b.clone()].into_iter().collect()
    })
}

/// Lie coproduct of two sums.
///
/// Both sides are reduced to the Lyndon basis, multiplied out and
/// normalized with [`normalize_coproduct`].
#[must_use]
pub fn coproduct(lhs: &WordExpr, rhs: &WordExpr) -> WordCoExpr {
    normalize_coproduct(&coproduct_hopf(&to_lyndon_basis(lhs), &to_lyndon_basis(rhs)))
}

/// Applies antisymmetry to every two-part term.
///
/// Parts of equal length are put in increasing order and `(a, a)` terms
/// vanish. Parts of different lengths are put shorter first. Every swap
/// flips the sign.
///
/// Terms whose parts differ in length are kept, not dropped, so that
/// [`coproduct`] of sums of different weights is still antisymmetric.
///
/// # Panics
///
/// Panics if a term does not have exactly two parts.
#[must_use]
pub fn normalize_coproduct(expr: &WordCoExpr) -> WordCoExpr {
    let mut ret = WordCoExpr::zero();
    expr.foreach_key(|key, coeff| {
        assert_eq!(key.len(), 2, "coproduct term {key:?} must have two parts");
        let (a, b) = (&key[0], &key[1]);
        let order = match a.len().cmp(&b.len()) {
            Ordering::Equal => a.cmp(b),
            by_length => by_length,
        };
        match order {
            Ordering::Less => ret.add_to_key(key.clone(), coeff),
            Ordering::Greater => {
                ret.add_to_key([b.clone(), a.clone()].into_iter().collect(), -coeff);
            }
            Ordering::Equal => {}
        }
    });
    ret.copy_annotations(expr);
    ret
}

fn lyndon_part(letters: &[u8]) -> WordExpr {
    to_lyndon_basis(&WordExpr::single_key(Word::from_slice(letters)))
}

/// Component of the Lie coproduct of weight `form`.
///
/// Every word of `expr` is split after `form.0` letters; the halves are
/// reduced to the Lyndon basis and combined with [`coproduct`]. For
/// `form.0 != form.1` the mirrored split is subtracted, which keeps the
/// result antisymmetric. The form is unordered: `(1, 2)` and `(2, 1)` give
/// the same result.
///
/// # Panics
///
/// Panics if some word of `expr` does not have length `form.0 + form.1`.
#[must_use]
pub fn comultiply(expr: &WordExpr, form: (usize, usize)) -> WordCoExpr {
    let Some(weight) = uniform_length(expr) else {
        return WordCoExpr::zero();
    };
    let (first, second) = if form.0 <= form.1 { form } else { (form.1, form.0) };
    assert_eq!(
        first + second,
        weight,
        "cannot comultiply words of length {weight} into ({first}, {second})"
    );
    let mut ret = WordCoExpr::zero();
    expr.foreach_key(|word, coeff| {
        let letters = word.to_vec();
        ret += &(coproduct(&lyndon_part(&letters[..first]), &lyndon_part(&letters[first..])) * coeff);
        if first != second {
            ret -= &(coproduct(&lyndon_part(&letters[second..]), &lyndon_part(&letters[..second]))
                * coeff);
        }
    });
    ret.copy_annotations_mapped(expr, |annotation| {
        format!("{COMULT_ANNOTATION_PREFIX}{annotation}")
    });
    ret
}

/// Keeps the terms whose part number `side` satisfies `pred`.
///
/// # Panics
///
/// Panics if some term has no part number `side`.
#[must_use]
pub fn filter_coexpr<F>(expr: &WordCoExpr, side: usize, mut pred: F) -> WordCoExpr
where
    F: FnMut(&Word) -> bool,
{
    expr.filtered_key(|key| {
        let part = key
            .get(side)
            .unwrap_or_else(|| panic!("coproduct term {key:?} has no part {side}"));
        pred(part)
    })
}

/// Keeps the terms whose part number `side` equals `value`.
#[must_use]
pub fn filter_coexpr_eq(expr: &WordCoExpr, side: usize, value: &Word) -> WordCoExpr {
    filter_coexpr(expr, side, |part| part == value)
}
