//! Property-based tests for the word algebra.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::coalgebra::coproduct;
    use crate::lyndon::{is_lyndon_word, lyndon_factorize, to_lyndon_basis, to_lyndon_basis_traced};
    use crate::shuffle::{shuffle_product, shuffle_product_expr};
    use crate::word::{Word, WordExpr, WordParam};

    // Short words over a small alphabet so that letters repeat
    fn small_word() -> impl Strategy<Value = Word> {
        proptest::collection::vec(0u8..3, 1..5).prop_map(|letters| Word::from_slice(&letters))
    }

    fn small_expr() -> impl Strategy<Value = WordExpr> {
        proptest::collection::vec((small_word(), -3i32..=3), 0..4)
            .prop_map(|terms| terms.into_iter().collect())
    }

    proptest! {
        #[test]
        fn shuffle_commutative(u in small_word(), v in small_word()) {
            prop_assert_eq!(shuffle_product(&u, &v), shuffle_product(&v, &u));
        }

        #[test]
        fn shuffle_associative(u in small_word(), v in small_word(), w in small_word()) {
            let uv = shuffle_product(&u, &v);
            let vw = shuffle_product(&v, &w);
            prop_assert_eq!(
                shuffle_product_expr(&uv, &WordExpr::single_key(w.clone())),
                shuffle_product_expr(&WordExpr::single_key(u.clone()), &vw)
            );
        }

        #[test]
        fn factorization_concatenates_back(u in small_word()) {
            let factors = lyndon_factorize(&u, u8::cmp);
            let joined: Vec<u8> = factors.iter().flat_map(Word::to_vec).collect();
            prop_assert_eq!(joined, u.to_vec());
            prop_assert!(factors.iter().all(|f| is_lyndon_word(f, u8::cmp)));
            prop_assert!(factors.windows(2).all(|pair| pair[0] >= pair[1]));
        }

        #[test]
        fn lyndon_basis_idempotent(x in small_expr()) {
            let once = to_lyndon_basis(&x);
            prop_assert_eq!(to_lyndon_basis(&once), once.clone());
            once.foreach_key(|key, _| assert!(is_lyndon_word(key, u8::cmp)));
        }

        #[test]
        fn lyndon_basis_kills_shuffles(u in small_word(), v in small_word()) {
            prop_assert!(to_lyndon_basis(&shuffle_product(&u, &v)).is_zero());
        }

        #[test]
        fn lyndon_basis_is_linear(x in small_expr(), y in small_expr()) {
            prop_assert_eq!(
                to_lyndon_basis(&(&x + &y)),
                &to_lyndon_basis(&x) + &to_lyndon_basis(&y)
            );
        }

        #[test]
        fn rewrites_strictly_decrease(x in small_expr()) {
            let (_, trace) = to_lyndon_basis_traced(&x);
            prop_assert!(trace.is_strictly_decreasing::<WordParam>());
        }

        #[test]
        fn coproduct_antisymmetric(x in small_expr(), y in small_expr()) {
            prop_assert_eq!(coproduct(&x, &y), -coproduct(&y, &x));
        }
    }
}
