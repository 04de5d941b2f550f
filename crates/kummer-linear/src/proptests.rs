//! Property-based tests for formal sum arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::param::SimpleParam;
    use crate::sum::FormalSum;

    type Expr = FormalSum<SimpleParam<u8>>;

    // Sums over a small key space so that terms collide and cancel
    fn small_expr() -> impl Strategy<Value = Expr> {
        proptest::collection::vec((0u8..6, -5i32..=5), 0..8)
            .prop_map(|terms| terms.into_iter().collect())
    }

    fn scalar() -> impl Strategy<Value = i32> {
        -4i32..=4
    }

    proptest! {
        #[test]
        fn add_commutative(a in small_expr(), b in small_expr()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn add_associative(a in small_expr(), b in small_expr(), c in small_expr()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn sub_self_is_zero(a in small_expr()) {
            prop_assert!((&a - &a).is_zero());
            prop_assert_eq!(&a + &(-&a), Expr::zero());
        }

        #[test]
        fn scalar_distributive(a in small_expr(), b in small_expr(), k in scalar()) {
            prop_assert_eq!(&(&a + &b) * k, &(&a * k) + &(&b * k));
        }

        #[test]
        fn no_zero_coefficients(a in small_expr(), b in small_expr()) {
            let sum = &a - &b;
            prop_assert!(sum.iter().all(|(_, c)| c != 0));
        }

        #[test]
        fn div_int_inverts_mul(a in small_expr(), k in scalar()) {
            prop_assume!(k != 0);
            let mut scaled = &a * k;
            prop_assert!(scaled.div_int(k).is_ok());
            prop_assert_eq!(scaled, a);
        }

        #[test]
        fn l1_norm_triangle(a in small_expr(), b in small_expr()) {
            prop_assert!((&a + &b).l1_norm() <= a.l1_norm() + b.l1_norm());
        }
    }
}
