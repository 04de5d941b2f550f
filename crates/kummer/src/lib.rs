//! # Kummer
//!
//! Symbolic linear algebra over words, for computing with symbols of
//! polylogarithms.
//!
//! ## Features
//!
//! - **Packed Storage**: Inline byte and nibble sequences with heap fallback
//! - **Compression**: Sentinel-delimited blobs for tuples of small integers
//! - **Formal Sums**: Integer linear combinations over any key type, with annotations
//! - **Shuffle Algebra**: Shuffle, quasi-shuffle and concatenation products
//! - **Lyndon Basis**: Canonical forms modulo shuffle relations
//! - **Lie Coalgebra**: Coproducts and their graded components
//!
//! ## Quick Start
//!
//! ```rust
//! use kummer::prelude::*;
//!
//! // [0,1] ш [0] = [0,1,0] + 2 [0,0,1]
//! let product = shuffle_product(&word(&[0, 1]), &word(&[0]));
//! assert_eq!(product.num_terms(), 2);
//!
//! // Shuffle products vanish in the Lyndon basis
//! assert!(to_lyndon_basis(&product).is_zero());
//!
//! let delta = comultiply(&word_expr(&[1, 2]), (1, 1));
//! assert_eq!(delta, co_expr(&[&[1], &[2]]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use kummer_linear as linear;
pub use kummer_packed as packed;
pub use kummer_words as words;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use kummer_linear::{
        outer_product, BasicFormalSum, Coeff, FormalSum, LinearParam, MatrixBuilder, SimpleParam,
        VectorParam,
    };
    pub use kummer_packed::{CompressedBlob, Compressor, Decompressor, PackedSequence, Sequence};
    pub use kummer_words::{
        co_expr, comultiply, coproduct, shuffle_product, shuffle_product_expr, to_lyndon_basis, word,
        word_expr, PairExpr, Word, WordCoExpr, WordExpr,
    };
}
