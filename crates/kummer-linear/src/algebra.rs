//! Bilinear products of formal sums.
//!
//! Both products distribute over the terms of their arguments. The results
//! are unannotated; callers decide which provenance to carry over.

use crate::basic::BasicFormalSum;
use crate::param::LinearParam;
use crate::sum::FormalSum;

/// Bilinear extension of a key product.
///
/// Every pair of terms `a * x`, `b * y` contributes `a * b * product(x, y)`.
pub fn outer_product<L, R, O, F>(lhs: &FormalSum<L>, rhs: &FormalSum<R>, mut product: F) -> FormalSum<O>
where
    L: LinearParam,
    R: LinearParam,
    O: LinearParam,
    F: FnMut(&L::Key, &R::Key) -> O::Key,
{
    let mut ret = BasicFormalSum::zero();
    for (lhs_key, lhs_coeff) in lhs.iter() {
        for (rhs_key, rhs_coeff) in rhs.iter() {
            ret.add_to_key(product(lhs_key, rhs_key), lhs_coeff * rhs_coeff);
        }
    }
    FormalSum::from_main(ret)
}

/// Bilinear extension of a product that maps two keys to a sum.
pub fn outer_product_expanding<L, R, O, F>(
    lhs: &FormalSum<L>,
    rhs: &FormalSum<R>,
    mut product: F,
) -> FormalSum<O>
where
    L: LinearParam,
    R: LinearParam,
    O: LinearParam,
    F: FnMut(&L::Key, &R::Key) -> FormalSum<O>,
{
    let mut ret = BasicFormalSum::zero();
    for (lhs_key, lhs_coeff) in lhs.iter() {
        for (rhs_key, rhs_coeff) in rhs.iter() {
            ret += &(product(lhs_key, rhs_key).into_main() * (lhs_coeff * rhs_coeff));
        }
    }
    FormalSum::from_main(ret)
}

/// Folds [`outer_product`] over a list of sums of the same kind.
///
/// Returns zero for an empty list.
pub fn outer_product_all<P, F>(exprs: &[FormalSum<P>], mut product: F) -> FormalSum<P>
where
    P: LinearParam,
    F: FnMut(&P::Key, &P::Key) -> P::Key,
{
    let Some((first, rest)) = exprs.split_first() else {
        return FormalSum::zero();
    };
    rest.iter().fold(first.without_annotations(), |acc, expr| {
        outer_product(&acc, expr, &mut product)
    })
}

/// Folds [`outer_product_expanding`] over a list of sums of the same kind.
///
/// Returns zero for an empty list.
pub fn outer_product_expanding_all<P, F>(exprs: &[FormalSum<P>], mut product: F) -> FormalSum<P>
where
    P: LinearParam,
    F: FnMut(&P::Key, &P::Key) -> FormalSum<P>,
{
    let Some((first, rest)) = exprs.split_first() else {
        return FormalSum::zero();
    };
    rest.iter().fold(first.without_annotations(), |acc, expr| {
        outer_product_expanding(&acc, expr, &mut product)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::SimpleParam;

    type Ints = FormalSum<SimpleParam<u32>>;
    type Pairs = FormalSum<SimpleParam<(u32, u32)>>;

    fn x(v: u32) -> Ints {
        Ints::single(&v)
    }

    #[test]
    fn test_outer_product_pairs() {
        let lhs = x(1) - x(2);
        let rhs = x(3) + x(4) * 3;
        let prod: Pairs = outer_product(&lhs, &rhs, |&a, &b| (a, b));
        assert_eq!(prod.num_terms(), 4);
        assert_eq!(prod.coeff(&(1, 3)), 1);
        assert_eq!(prod.coeff(&(1, 4)), 3);
        assert_eq!(prod.coeff(&(2, 3)), -1);
        assert_eq!(prod.coeff(&(2, 4)), -3);
    }

    #[test]
    fn test_outer_product_accumulates() {
        let lhs = x(1) + x(2);
        let prod: Ints = outer_product(&lhs, &lhs, |&a, &b| a + b);
        assert_eq!(prod, x(2) + x(3) * 2 + x(4));
    }

    #[test]
    fn test_outer_product_expanding() {
        let lhs = x(1) * 2;
        let rhs = x(5);
        let prod: Ints = outer_product_expanding(&lhs, &rhs, |&a, &b| x(a) + x(b));
        assert_eq!(prod, x(1) * 2 + x(5) * 2);
    }

    #[test]
    fn test_fold_over_list() {
        let exprs = vec![x(1), x(2) + x(3), x(4)];
        let prod = outer_product_all(&exprs, |&a, &b| a * 10 + b);
        assert_eq!(prod, x(124) + x(134));
        assert!(outer_product_all::<SimpleParam<u32>, _>(&[], |&a, _| a).is_zero());
    }
}
