//! Packed small sequences with automatic inline/heap storage.
//!
//! A [`PackedSequence`] keeps up to `N` bytes of elements inline and moves
//! to a heap buffer once it outgrows them. It is designed to be used as a
//! hash map key: equality and hashing look only at the length and the used
//! bytes, which is sound because every byte past the logical end is kept
//! zero in both representations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::Range;

use crate::element::PackedElement;

/// Hard upper bound on the number of elements in a packed sequence.
pub const MAX_PACKED_LEN: usize = 256;

#[derive(Clone)]
enum Repr<const N: usize> {
    Inline { len: u16, bytes: [u8; N] },
    // Never converted back to `Inline`, even after shrinking.
    Heap { len: u16, bytes: Box<[u8]> },
}

/// A sequence of fixed-width elements stored in at most `N` inline bytes.
///
/// # Memory Layout
///
/// - 4-bit elements: two per byte, high nibble first
/// - 8-bit elements: one per byte
/// - 16-bit elements: two bytes each, big-endian
///
/// Bytes past the logical end are always zero.
pub struct PackedSequence<T, const N: usize> {
    repr: Repr<N>,
    _marker: PhantomData<T>,
}

#[inline]
const fn bytes_for<T: PackedElement>(len: usize) -> usize {
    (len * T::BITS + 7) / 8
}

fn read_bits<T: PackedElement>(bytes: &[u8], index: usize) -> u16 {
    match T::BITS {
        4 => {
            let byte = bytes[index / 2];
            if index % 2 == 0 {
                u16::from(byte >> 4)
            } else {
                u16::from(byte & 0x0F)
            }
        }
        8 => u16::from(bytes[index]),
        16 => u16::from_be_bytes([bytes[2 * index], bytes[2 * index + 1]]),
        bits => unreachable!("unsupported element width: {bits} bits"),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_bits<T: PackedElement>(bytes: &mut [u8], index: usize, bits: u16) {
    match T::BITS {
        4 => {
            assert!(bits <= 0x0F, "4-bit element out of range: {bits}");
            let byte = &mut bytes[index / 2];
            if index % 2 == 0 {
                *byte = (*byte & 0x0F) | ((bits as u8) << 4);
            } else {
                *byte = (*byte & 0xF0) | bits as u8;
            }
        }
        8 => {
            assert!(bits <= 0xFF, "8-bit element out of range: {bits}");
            bytes[index] = bits as u8;
        }
        16 => {
            let [hi, lo] = bits.to_be_bytes();
            bytes[2 * index] = hi;
            bytes[2 * index + 1] = lo;
        }
        bits => unreachable!("unsupported element width: {bits} bits"),
    }
}

impl<T: PackedElement, const N: usize> PackedSequence<T, N> {
    /// Creates an empty inline sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            repr: Repr::Inline {
                len: 0,
                bytes: [0; N],
            },
            _marker: PhantomData,
        }
    }

    /// Creates a sequence holding a copy of `items`.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        let mut seq = Self::new();
        for &item in items {
            seq.push(item);
        }
        seq
    }

    /// Number of elements that fit in the inline buffer.
    #[must_use]
    pub const fn inline_capacity() -> usize {
        N * 8 / T::BITS
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { len, .. } | Repr::Heap { len, .. } => usize::from(*len),
        }
    }

    /// Returns true if the sequence has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the elements are stored inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    /// Returns the number of elements the current storage can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.storage().len() * 8 / T::BITS).min(MAX_PACKED_LEN)
    }

    /// Returns the bytes occupied by the elements.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage()[..bytes_for::<T>(self.len())]
    }

    fn storage(&self) -> &[u8] {
        match &self.repr {
            Repr::Inline { bytes, .. } => bytes,
            Repr::Heap { bytes, .. } => bytes,
        }
    }

    fn storage_mut(&mut self) -> &mut [u8] {
        match &mut self.repr {
            Repr::Inline { bytes, .. } => bytes,
            Repr::Heap { bytes, .. } => bytes,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= MAX_PACKED_LEN);
        match &mut self.repr {
            Repr::Inline { len, .. } | Repr::Heap { len, .. } => *len = new_len as u16,
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> T {
        let len = self.len();
        assert!(
            index < len,
            "index {index} out of range for packed sequence of length {len}"
        );
        T::from_bits(read_bits::<T>(self.storage(), index))
    }

    /// Returns the first element, if any.
    #[must_use]
    pub fn first(&self) -> Option<T> {
        (!self.is_empty()).then(|| self.get(0))
    }

    /// Returns the last element, if any.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).map(|i| self.get(i))
    }

    /// Appends an element, moving to the heap if the storage is full.
    ///
    /// # Panics
    ///
    /// Panics if the sequence already holds [`MAX_PACKED_LEN`] elements.
    pub fn push(&mut self, value: T) {
        let len = self.len();
        assert!(
            len < MAX_PACKED_LEN,
            "packed sequence cannot hold more than {MAX_PACKED_LEN} elements"
        );
        if len + 1 > self.capacity() {
            self.grow(len + 1);
        }
        write_bits::<T>(self.storage_mut(), len, value.to_bits());
        self.set_len(len + 1);
    }

    /// Removes and returns the last element, zeroing its slot.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is empty.
    pub fn pop(&mut self) -> T {
        let len = self.len();
        assert!(len > 0, "pop from an empty packed sequence");
        let value = self.get(len - 1);
        write_bits::<T>(self.storage_mut(), len - 1, 0);
        self.set_len(len - 1);
        value
    }

    /// Resizes to `new_len`, appending `fill` or dropping trailing elements.
    pub fn resize(&mut self, new_len: usize, fill: T) {
        while self.len() < new_len {
            self.push(fill);
        }
        while self.len() > new_len {
            self.pop();
        }
    }

    /// Moves the content to a heap buffer large enough for `min_len` elements.
    fn grow(&mut self, min_len: usize) {
        let needed = bytes_for::<T>(min_len);
        let new_size = needed.max(2 * N).max(1).next_power_of_two();
        let mut bytes = vec![0u8; new_size].into_boxed_slice();
        let used = self.as_bytes();
        bytes[..used.len()].copy_from_slice(used);
        let len = match &self.repr {
            Repr::Inline { len, .. } | Repr::Heap { len, .. } => *len,
        };
        self.repr = Repr::Heap { len, bytes };
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            seq: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Copies the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Returns a new sequence holding the elements in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(
            range.start <= range.end && range.end <= self.len(),
            "slice {range:?} out of range for packed sequence of length {}",
            self.len()
        );
        range.map(|i| self.get(i)).collect()
    }

    /// Returns the concatenation of `self` and `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).collect()
    }
}

impl<T: PackedElement, const N: usize> Default for PackedSequence<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PackedElement, const N: usize> Clone for PackedSequence<T, N> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: PackedElement, const N: usize> PartialEq for PackedSequence<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.as_bytes() == other.as_bytes()
    }
}

impl<T: PackedElement, const N: usize> Eq for PackedSequence<T, N> {}

impl<T: PackedElement, const N: usize> Hash for PackedSequence<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.as_bytes().hash(state);
    }
}

impl<T: PackedElement, const N: usize> Ord for PackedSequence<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: PackedElement, const N: usize> PartialOrd for PackedSequence<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: PackedElement, const N: usize> fmt::Debug for PackedSequence<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PackedElement, const N: usize> FromIterator<T> for PackedSequence<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T: PackedElement, const N: usize> Extend<T> for PackedSequence<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PackedElement, const N: usize> From<&[T]> for PackedSequence<T, N> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<'a, T: PackedElement, const N: usize> IntoIterator for &'a PackedSequence<T, N> {
    type Item = T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`PackedSequence`].
#[derive(Clone)]
pub struct Iter<'a, T, const N: usize> {
    seq: &'a PackedSequence<T, N>,
    front: usize,
    back: usize,
}

impl<T: PackedElement, const N: usize> Iterator for Iter<'_, T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = self.seq.get(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: PackedElement, const N: usize> DoubleEndedIterator for Iter<'_, T, N> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.seq.get(self.back))
    }
}

impl<T: PackedElement, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T: PackedElement, const N: usize> FusedIterator for Iter<'_, T, N> {}
