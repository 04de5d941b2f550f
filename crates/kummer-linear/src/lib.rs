//! # kummer-linear
//!
//! Sparse integer formal sums for Kummer.
//!
//! This crate provides:
//! - `BasicFormalSum`, a map from basis keys to non-zero `i32` coefficients
//! - `FormalSum`, which adds provenance annotations that follow arithmetic
//! - Parameter traits describing objects, keys and word-like bases
//! - Bilinear outer products
//! - Batch evaluation over rayon and a sparse matrix builder for rank
//!   computations
//!
//! ## Annotations
//!
//! Annotations are best effort. Operations that cannot keep them exact
//! (mixing annotated and unannotated sums, inexact division, filtering)
//! record `UNKNOWN_ANNOTATION` instead of silently corrupting them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algebra;
pub mod basic;
pub mod error;
pub mod intern;
pub mod matrix;
pub mod parallel;
pub mod param;
pub mod sum;

#[cfg(test)]
mod proptests;

pub use algebra::{outer_product, outer_product_all, outer_product_expanding, outer_product_expanding_all};
pub use basic::{BasicFormalSum, Coeff};
pub use error::DivisionError;
pub use intern::InternTable;
pub use matrix::{MatrixBuilder, Triplet};
pub use parallel::{mapped_parallel, ParallelConfig};
pub use param::{AnnotationParam, LinearParam, SimpleParam, VectorParam};
pub use sum::{Annotations, FormalSum, UNKNOWN_ANNOTATION};
