//! Nibble compression for composite keys.
//!
//! A [`Compressor`] accumulates a stream of 4-bit slots and packs it two
//! slots per byte, high nibble first. Segments are terminated by the
//! reserved [`COMPRESSION_SENTINEL`] slot; an odd slot count is padded with
//! the sentinel in the final low nibble.
//!
//! The format carries no schema: a [`Decompressor`] must pop values and
//! segments in exactly the order they were pushed.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::sequence::{PackedSequence, MAX_PACKED_LEN};

/// Slot value reserved as segment terminator and padding.
pub const COMPRESSION_SENTINEL: u8 = 0;

/// Largest value that fits in one slot.
pub const COMPRESSION_MAX_VALUE: i32 = 15;

const VALUES_PER_BYTE: usize = 2;
const SHIFT: u32 = 4;
const LOWER_MASK: u8 = (1 << SHIFT) - 1;

/// Byte storage of a compressed blob.
pub type BlobBytes = PackedSequence<u8, 14>;

/// Returns true if `value` can be stored in a slot.
#[must_use]
pub fn is_compressible(value: i32) -> bool {
    (1..=COMPRESSION_MAX_VALUE).contains(&value)
}

fn checked_slot(value: i32) -> u8 {
    match u8::try_from(value) {
        Ok(slot) if is_compressible(value) => slot,
        _ => panic!("value {value} cannot be compressed: expected 1..={COMPRESSION_MAX_VALUE}"),
    }
}

/// Compressed bytes tagged with the type they encode.
///
/// The tag only exists at the type level: blobs encoding different key
/// types cannot be compared or mixed by accident.
pub struct CompressedBlob<Tag> {
    bytes: BlobBytes,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> CompressedBlob<Tag> {
    /// Wraps raw bytes produced by a [`Compressor`].
    #[must_use]
    pub fn from_bytes(bytes: BlobBytes) -> Self {
        Self {
            bytes,
            _tag: PhantomData,
        }
    }

    /// Returns the packed bytes.
    #[must_use]
    pub fn bytes(&self) -> &BlobBytes {
        &self.bytes
    }

    /// Returns the number of packed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing was compressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<Tag> Clone for CompressedBlob<Tag> {
    fn clone(&self) -> Self {
        Self::from_bytes(self.bytes.clone())
    }
}

impl<Tag> Default for CompressedBlob<Tag> {
    fn default() -> Self {
        Self::from_bytes(BlobBytes::new())
    }
}

impl<Tag> PartialEq for CompressedBlob<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<Tag> Eq for CompressedBlob<Tag> {}

impl<Tag> Hash for CompressedBlob<Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<Tag> Ord for CompressedBlob<Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl<Tag> PartialOrd for CompressedBlob<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> fmt::Debug for CompressedBlob<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompressedBlob(")?;
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Accumulates small values and segments into a [`CompressedBlob`].
#[derive(Clone, Debug, Default)]
pub struct Compressor {
    slots: SmallVec<[u8; 32]>,
}

impl Compressor {
    /// Creates an empty compressor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a single value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside `1..=COMPRESSION_MAX_VALUE`.
    pub fn push_value(&mut self, value: i32) {
        self.slots.push(checked_slot(value));
    }

    /// Pushes a sentinel-terminated segment.
    ///
    /// # Panics
    ///
    /// Panics if any value is outside `1..=COMPRESSION_MAX_VALUE`.
    pub fn push_segment(&mut self, values: &[i32]) {
        for &value in values {
            self.push_value(value);
        }
        self.slots.push(COMPRESSION_SENTINEL);
    }

    /// Returns the number of slots pushed so far.
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Packs the accumulated slots.
    ///
    /// # Panics
    ///
    /// Panics if the packed form exceeds the byte storage limit.
    #[must_use]
    pub fn finish<Tag>(self) -> CompressedBlob<Tag> {
        let num_bytes = self.slots.len().div_ceil(VALUES_PER_BYTE);
        assert!(
            num_bytes <= MAX_PACKED_LEN,
            "compressed blob of {num_bytes} bytes exceeds {MAX_PACKED_LEN}"
        );
        let bytes = self
            .slots
            .chunks(VALUES_PER_BYTE)
            .map(|pair| {
                let hi = pair[0];
                let lo = pair.get(1).copied().unwrap_or(COMPRESSION_SENTINEL);
                (hi << SHIFT) | lo
            })
            .collect();
        CompressedBlob::from_bytes(bytes)
    }
}

/// Reads values and segments back out of a [`CompressedBlob`].
#[derive(Clone, Debug)]
pub struct Decompressor {
    slots: SmallVec<[u8; 32]>,
    pos: usize,
}

impl Decompressor {
    /// Starts reading `blob`.
    #[must_use]
    pub fn new<Tag>(blob: &CompressedBlob<Tag>) -> Self {
        Self::from_bytes(blob.bytes().as_bytes())
    }

    /// Starts reading raw packed bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut slots = SmallVec::with_capacity(bytes.len() * VALUES_PER_BYTE);
        for &byte in bytes {
            slots.push(byte >> SHIFT);
            slots.push(byte & LOWER_MASK);
        }
        Self { slots, pos: 0 }
    }

    /// Returns true once only sentinel padding remains.
    ///
    /// A trailing empty segment is indistinguishable from padding, so a
    /// caller that encoded one must pop it regardless of `done`.
    #[must_use]
    pub fn done(&self) -> bool {
        match &self.slots[self.pos..] {
            [] => true,
            [last] => *last == COMPRESSION_SENTINEL,
            _ => false,
        }
    }

    /// Pops a value pushed with [`Compressor::push_value`].
    ///
    /// # Panics
    ///
    /// Panics if the stream is exhausted or the next slot terminates a
    /// segment.
    pub fn pop_value(&mut self) -> i32 {
        assert!(self.pos < self.slots.len(), "decompressor exhausted");
        let slot = self.slots[self.pos];
        assert!(
            slot != COMPRESSION_SENTINEL,
            "expected a value at slot {}, found a segment terminator",
            self.pos
        );
        self.pos += 1;
        i32::from(slot)
    }

    /// Pops a segment pushed with [`Compressor::push_segment`].
    ///
    /// # Panics
    ///
    /// Panics if the stream ends before the segment terminator.
    pub fn pop_segment(&mut self) -> Vec<i32> {
        let mut values = Vec::new();
        loop {
            assert!(self.pos < self.slots.len(), "unterminated segment");
            let slot = self.slots[self.pos];
            self.pos += 1;
            if slot == COMPRESSION_SENTINEL {
                return values;
            }
            values.push(i32::from(slot));
        }
    }
}
