//! # kummer-words
//!
//! Word algebra for Kummer.
//!
//! This crate provides:
//! - `Word`, a packed byte word, and formal sums of words and tensor words
//! - Shuffle, quasi-shuffle and concatenation products
//! - Lyndon factorization and conversion to the Lyndon basis
//! - Lie coproducts and their graded components
//! - Lyndon word enumeration with an explicit cache
//! - The point-pair alphabet used by polylogarithm symbols
//!
//! ## Lyndon basis
//!
//! `to_lyndon_basis` rewrites a sum so that only Lyndon words remain. Two
//! sums are equal in the shuffle algebra exactly when their Lyndon images
//! are equal, which makes the conversion the canonical form used by
//! coproducts and rank computations.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alphabet;
pub mod coalgebra;
pub mod lyndon;
pub mod lyndon_words;
pub mod shuffle;
pub mod word;

#[cfg(test)]
mod proptests;

pub use alphabet::{pair_alphabet, AlphabetMapping, PairExpr, PairParam, PointPair, MAX_PAIR_DIMENSION};
pub use coalgebra::{
    comultiply, coproduct, coproduct_hopf, filter_coexpr, filter_coexpr_eq, normalize_coproduct,
    COMULT_ANNOTATION_PREFIX,
};
pub use lyndon::{
    is_lyndon_word, lyndon_factorize, lyndon_word_compare, to_lyndon_basis, to_lyndon_basis_traced,
    LyndonFactorization, LyndonTrace, RewriteStep,
};
pub use lyndon_words::{count_lyndon_words, generate_lyndon_words, lyndon_matrix_builder, LyndonWordCache};
pub use shuffle::{
    quasi_shuffle_product, shuffle_product, shuffle_product_expr, shuffle_product_multi, tensor_product,
};
pub use word::{
    co_expr, multi_word, uniform_length, word, word_expr, CoWordParam, MultiWord, Word, WordCoExpr,
    WordExpr, WordParam,
};
