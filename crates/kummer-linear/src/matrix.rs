//! Sparse matrices built from batches of formal sums.
//!
//! Every added sum becomes a row; every distinct key becomes a column. The
//! rank of the resulting integer matrix is the dimension of the span of the
//! sums, which is what identity searches ask an external solver for.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::basic::Coeff;
use crate::intern::InternTable;
use crate::param::LinearParam;
use crate::sum::FormalSum;

/// A `(row, col, value)` entry of a sparse matrix.
pub type Triplet = (usize, usize, Coeff);

/// Accumulates formal sums as rows of a sparse integer matrix.
pub struct MatrixBuilder<P: LinearParam> {
    columns: InternTable<P::Key>,
    rows: Vec<Vec<(usize, Coeff)>>,
    // Row content -> row index, used to skip duplicates.
    seen: FxHashMap<Vec<(usize, Coeff)>, usize>,
}

impl<P: LinearParam> Default for MatrixBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: LinearParam> MatrixBuilder<P> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_columns(std::iter::empty())
    }

    /// Creates a builder whose first columns are `keys`, in order.
    ///
    /// Pre-seeding fixes the column space, e.g. to all Lyndon words of a
    /// given weight, so matrices from different batches line up.
    pub fn with_columns<I: IntoIterator<Item = P::Key>>(keys: I) -> Self {
        Self {
            columns: InternTable::from_values(keys),
            rows: Vec::new(),
            seen: FxHashMap::default(),
        }
    }

    /// Adds `expr` as a row and returns its index.
    ///
    /// A sum identical to an earlier one is not added again; the index of
    /// the earlier row is returned. Zero sums are skipped and yield `None`.
    pub fn add_expr(&mut self, expr: &FormalSum<P>) -> Option<usize> {
        if expr.is_zero() {
            return None;
        }
        let mut row: Vec<(usize, Coeff)> = expr
            .sorted_terms()
            .into_iter()
            .map(|(key, coeff)| (self.columns.intern(key.clone()), coeff))
            .collect();
        row.sort_unstable();
        let next = self.rows.len();
        match self.seen.entry(row) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                self.rows.push(entry.key().clone());
                entry.insert(next);
                Some(next)
            }
        }
    }

    /// Adds every sum in `exprs`.
    pub fn add_exprs<'a, I>(&mut self, exprs: I)
    where
        I: IntoIterator<Item = &'a FormalSum<P>>,
        P: 'a,
    {
        for expr in exprs {
            self.add_expr(expr);
        }
    }

    /// Returns the number of distinct rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns seen so far.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the key of every column, in column order.
    #[must_use]
    pub fn column_keys(&self) -> &[P::Key] {
        self.columns.values()
    }

    /// Returns the column of `key`, if it occurs.
    #[must_use]
    pub fn column_of(&self, key: &P::Key) -> Option<usize> {
        self.columns.index_of(key)
    }

    /// Returns all non-zero entries sorted by `(row, col)`.
    #[must_use]
    pub fn triplets(&self) -> Vec<Triplet> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, entries)| entries.iter().map(move |&(col, value)| (row, col, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::SimpleParam;

    type Expr = FormalSum<SimpleParam<char>>;

    fn x(c: char) -> Expr {
        Expr::single(&c)
    }

    #[test]
    fn test_triplets() {
        let mut builder = MatrixBuilder::new();
        assert_eq!(builder.add_expr(&(x('a') - x('b'))), Some(0));
        assert_eq!(builder.add_expr(&(x('b') * 3)), Some(1));
        assert_eq!(builder.num_rows(), 2);
        assert_eq!(builder.num_cols(), 2);
        let a = builder.column_of(&'a').unwrap();
        let b = builder.column_of(&'b').unwrap();
        let mut expected = vec![(0, a, 1), (0, b, -1), (1, b, 3)];
        expected.sort_unstable();
        assert_eq!(builder.triplets(), expected);
    }

    #[test]
    fn test_duplicate_rows_skipped() {
        let mut builder = MatrixBuilder::new();
        let expr = x('a') + x('c') * 2;
        assert_eq!(builder.add_expr(&expr), Some(0));
        assert_eq!(builder.add_expr(&x('d')), Some(1));
        assert_eq!(builder.add_expr(&expr.clone().annotated("again")), Some(0));
        assert_eq!(builder.add_expr(&Expr::zero()), None);
        assert_eq!(builder.num_rows(), 2);
    }

    #[test]
    fn test_preseeded_columns() {
        let mut builder = MatrixBuilder::<SimpleParam<char>>::with_columns(['z', 'y']);
        builder.add_expr(&x('y'));
        assert_eq!(builder.column_keys(), &['z', 'y']);
        assert_eq!(builder.triplets(), vec![(0, 1, 1)]);
    }
}
