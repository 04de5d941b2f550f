//! # kummer-packed
//!
//! Compact storage primitives for Kummer.
//!
//! This crate provides:
//! - Fixed-width packed elements (`U4`, `u8`, `i8`, `u16`, `i16`)
//! - `PackedSequence`, a small vector with inline/heap storage, usable as a
//!   hash map key
//! - The `Sequence` abstraction shared by word algorithms
//! - A nibble compressor for composite keys
//!
//! ## Storage
//!
//! A `PackedSequence<T, N>` stores up to `N` bytes inline and moves to the
//! heap once full. Sequences never move back inline; equality and hashing
//! only look at the used bytes, which are kept zero-padded.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compression;
pub mod element;
pub mod sequence;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use compression::{
    is_compressible, BlobBytes, CompressedBlob, Compressor, Decompressor, COMPRESSION_MAX_VALUE,
    COMPRESSION_SENTINEL,
};
pub use element::{PackedElement, U4};
pub use sequence::{PackedSequence, MAX_PACKED_LEN};
pub use traits::Sequence;
