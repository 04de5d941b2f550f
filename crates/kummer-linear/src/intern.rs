//! Key interning for matrix columns.

use std::hash::Hash;

use hashbrown::HashMap;

/// Assigns dense, stable indices to distinct values.
///
/// Indices are handed out in insertion order and never change.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    map: HashMap<T, usize>,
    values: Vec<T>,
}

impl<T: Clone + Eq + Hash> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Creates a table pre-populated with `values`, in order.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut table = Self::new();
        for value in values {
            table.intern(value);
        }
        table
    }

    /// Returns the index of `value`, assigning the next free one if new.
    pub fn intern(&mut self, value: T) -> usize {
        if let Some(&index) = self.map.get(&value) {
            return index;
        }
        let index = self.values.len();
        self.map.insert(value.clone(), index);
        self.values.push(value);
        index
    }

    /// Returns the value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Returns the index of `value` if it was interned.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.map.get(value).copied()
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the values in index order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut table = InternTable::new();
        assert_eq!(table.intern("b"), 0);
        assert_eq!(table.intern("a"), 1);
        assert_eq!(table.intern("b"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1), Some(&"a"));
        assert_eq!(table.index_of(&"c"), None);
    }

    #[test]
    fn test_from_values() {
        let table = InternTable::from_values(vec![3, 1, 3, 2]);
        assert_eq!(table.values(), &[3, 1, 2]);
    }
}
