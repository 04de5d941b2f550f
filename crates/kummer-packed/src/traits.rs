//! Word-like sequence abstraction.
//!
//! Shuffle products and Lyndon factorization only need to index, slice and
//! extend their keys. The [`Sequence`] trait captures exactly that so the
//! same algorithms run over packed words and plain vectors.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use crate::element::PackedElement;
use crate::sequence::PackedSequence;

/// A finite sequence of letters usable as a monomial key.
///
/// # Laws
///
/// - `Ord` is lexicographic over letters, a proper prefix being smaller
/// - `from_items(&s.to_items()) == s`
pub trait Sequence: Clone + Eq + Hash + Ord + Debug + Default {
    /// The letter type.
    type Item: Copy + Ord + Hash + Debug;

    /// Returns the number of letters.
    fn len(&self) -> usize;

    /// Returns true if there are no letters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the letter at `index`, panicking if out of range.
    fn get(&self, index: usize) -> Self::Item;

    /// Appends a letter.
    fn push(&mut self, item: Self::Item);

    /// Removes the last letter, panicking if empty.
    fn pop(&mut self) -> Self::Item;

    /// Builds a sequence from letters.
    fn from_items(items: &[Self::Item]) -> Self;

    /// Returns the sub-sequence covering `range`.
    fn slice(&self, range: Range<usize>) -> Self;

    /// Copies the letters into a `Vec`.
    fn to_items(&self) -> Vec<Self::Item> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

impl<T, const N: usize> Sequence for PackedSequence<T, N>
where
    T: PackedElement + Hash,
{
    type Item = T;

    fn len(&self) -> usize {
        PackedSequence::len(self)
    }

    fn get(&self, index: usize) -> T {
        PackedSequence::get(self, index)
    }

    fn push(&mut self, item: T) {
        PackedSequence::push(self, item);
    }

    fn pop(&mut self) -> T {
        PackedSequence::pop(self)
    }

    fn from_items(items: &[T]) -> Self {
        Self::from_slice(items)
    }

    fn slice(&self, range: Range<usize>) -> Self {
        PackedSequence::slice(self, range)
    }

    fn to_items(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T> Sequence for Vec<T>
where
    T: Copy + Ord + Hash + Debug,
{
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> T {
        self[index]
    }

    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }

    fn pop(&mut self) -> T {
        match Vec::pop(self) {
            Some(item) => item,
            None => panic!("pop from an empty sequence"),
        }
    }

    fn from_items(items: &[T]) -> Self {
        items.to_vec()
    }

    fn slice(&self, range: Range<usize>) -> Self {
        self[range].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reversed<S: Sequence>(seq: &S) -> S {
        let mut out = S::default();
        for i in (0..seq.len()).rev() {
            out.push(seq.get(i));
        }
        out
    }

    #[test]
    fn test_generic_over_packed_and_vec() {
        let packed = PackedSequence::<u8, 8>::from_slice(&[1, 2, 3]);
        let plain = vec![1u8, 2, 3];
        assert_eq!(reversed(&packed).to_items(), reversed(&plain));
        assert_eq!(Sequence::slice(&packed, 1..3).to_items(), plain.slice(1..3));
    }

    #[test]
    fn test_vec_pop() {
        let mut v = vec![4, 5];
        assert_eq!(Sequence::pop(&mut v), 5);
        assert_eq!(v, vec![4]);
    }
}
