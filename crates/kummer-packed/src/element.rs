//! Fixed-width element types for packed sequences.
//!
//! Every element stored in a [`PackedSequence`](crate::PackedSequence) has a
//! fixed bit width. Elements narrower than a byte share bytes with their
//! neighbours, which is why sequences expose no per-element mutation.

use std::fmt;

/// A value with a fixed bit width that can be packed into a byte buffer.
///
/// # Contract
///
/// - `BITS` is one of 4, 8 or 16.
/// - `to_bits` never sets bits above `BITS`.
/// - `from_bits(x.to_bits()) == x`.
/// - The all-zero bit pattern is a valid value (it is used as padding).
pub trait PackedElement: Copy + Ord + fmt::Debug {
    /// Width of one element in bits.
    const BITS: usize;

    /// Returns the raw bits of the element.
    fn to_bits(self) -> u16;

    /// Restores an element from raw bits.
    fn from_bits(bits: u16) -> Self;
}

/// An unsigned 4-bit integer.
///
/// Two `U4` values share one byte inside a packed sequence, high nibble
/// first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U4(u8);

impl U4 {
    /// Largest representable value.
    pub const MAX: u8 = 0x0F;

    /// Creates a 4-bit value.
    ///
    /// # Panics
    ///
    /// Panics if `value` exceeds [`U4::MAX`].
    #[must_use]
    pub fn new(value: u8) -> Self {
        assert!(value <= Self::MAX, "value {value} does not fit in 4 bits");
        Self(value)
    }

    /// Creates a 4-bit value if `value` is in range.
    #[must_use]
    pub fn try_new(value: i32) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|&v| v <= Self::MAX)
            .map(Self)
    }

    /// Returns the value as a byte.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for U4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for U4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<U4> for u8 {
    fn from(value: U4) -> Self {
        value.0
    }
}

impl PackedElement for U4 {
    const BITS: usize = 4;

    fn to_bits(self) -> u16 {
        u16::from(self.0)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u16) -> Self {
        Self((bits & 0x0F) as u8)
    }
}

impl PackedElement for u8 {
    const BITS: usize = 8;

    fn to_bits(self) -> u16 {
        u16::from(self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u16) -> Self {
        bits as u8
    }
}

impl PackedElement for i8 {
    const BITS: usize = 8;

    #[allow(clippy::cast_sign_loss)]
    fn to_bits(self) -> u16 {
        u16::from(self as u8)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn from_bits(bits: u16) -> Self {
        bits as u8 as i8
    }
}

impl PackedElement for u16 {
    const BITS: usize = 16;

    fn to_bits(self) -> u16 {
        self
    }

    fn from_bits(bits: u16) -> Self {
        bits
    }
}

impl PackedElement for i16 {
    const BITS: usize = 16;

    #[allow(clippy::cast_sign_loss)]
    fn to_bits(self) -> u16 {
        self as u16
    }

    #[allow(clippy::cast_possible_wrap)]
    fn from_bits(bits: u16) -> Self {
        bits as i16
    }
}
