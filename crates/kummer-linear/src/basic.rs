//! Sparse integer combinations of basis keys.
//!
//! [`BasicFormalSum`] is a plain map from keys to non-zero coefficients.
//! It carries no provenance; [`FormalSum`](crate::FormalSum) layers
//! annotations on top of it.

use std::cmp::Ordering;
use std::collections::hash_map;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rustc_hash::FxHashMap;

use crate::error::DivisionError;
use crate::param::LinearParam;

/// Coefficient type of every formal sum.
pub type Coeff = i32;

/// A finite integer combination of basis keys.
///
/// # Invariants
///
/// No key is stored with coefficient zero. Equality is therefore plain map
/// equality.
pub struct BasicFormalSum<P: LinearParam> {
    data: FxHashMap<P::Key, Coeff>,
}

impl<P: LinearParam> BasicFormalSum<P> {
    /// Creates the zero sum.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }

    /// Creates the sum `1 * object`.
    #[must_use]
    pub fn single(object: &P::Object) -> Self {
        Self::single_key(P::object_to_key(object))
    }

    /// Creates the sum `1 * key`.
    #[must_use]
    pub fn single_key(key: P::Key) -> Self {
        let mut sum = Self::zero();
        sum.add_to_key(key, 1);
        sum
    }

    /// Sums `1 * object` over a collection.
    pub fn from_collection<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a P::Object>,
        P::Object: 'a,
    {
        let mut sum = Self::zero();
        for object in objects {
            sum.add_to(object, 1);
        }
        sum
    }

    /// Sums `1 * key` over a collection.
    pub fn from_key_collection<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = P::Key>,
    {
        let mut sum = Self::zero();
        for key in keys {
            sum.add_to_key(key, 1);
        }
        sum
    }

    /// Adds `delta * object`.
    pub fn add_to(&mut self, object: &P::Object, delta: Coeff) {
        self.add_to_key(P::object_to_key(object), delta);
    }

    /// Adds `delta * key`, removing the key if its coefficient becomes zero.
    pub fn add_to_key(&mut self, key: P::Key, delta: Coeff) {
        if delta == 0 {
            return;
        }
        match self.data.entry(key) {
            hash_map::Entry::Occupied(mut entry) => {
                let coeff = entry.get() + delta;
                if coeff == 0 {
                    entry.remove();
                } else {
                    *entry.get_mut() = coeff;
                }
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(delta);
            }
        }
    }

    /// Returns the coefficient of `object` (zero if absent).
    #[must_use]
    pub fn coeff(&self, object: &P::Object) -> Coeff {
        self.coeff_for_key(&P::object_to_key(object))
    }

    /// Returns the coefficient of `key` (zero if absent).
    #[must_use]
    pub fn coeff_for_key(&self, key: &P::Key) -> Coeff {
        self.data.get(key).copied().unwrap_or(0)
    }

    /// Returns the number of non-zero terms.
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.data.len()
    }

    /// Returns true if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the sum of absolute coefficients.
    #[must_use]
    pub fn l1_norm(&self) -> u64 {
        self.data.values().map(|c| u64::from(c.unsigned_abs())).sum()
    }

    /// Iterates over `(key, coefficient)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&P::Key, Coeff)> + '_ {
        self.data.iter().map(|(key, &coeff)| (key, coeff))
    }

    /// Calls `f` with every object and its coefficient.
    pub fn foreach<F: FnMut(P::Object, Coeff)>(&self, mut f: F) {
        for (key, &coeff) in &self.data {
            f(P::key_to_object(key), coeff);
        }
    }

    /// Calls `f` with every key and its coefficient.
    pub fn foreach_key<F: FnMut(&P::Key, Coeff)>(&self, mut f: F) {
        for (key, &coeff) in &self.data {
            f(key, coeff);
        }
    }

    /// Returns the terms sorted by key.
    #[must_use]
    pub fn sorted_terms(&self) -> Vec<(&P::Key, Coeff)> {
        self.sorted_terms_by(|a, b| a.cmp(b))
    }

    /// Returns the terms sorted by a key comparator.
    pub fn sorted_terms_by<F>(&self, mut compare: F) -> Vec<(&P::Key, Coeff)>
    where
        F: FnMut(&P::Key, &P::Key) -> Ordering,
    {
        let mut terms: Vec<_> = self.iter().collect();
        terms.sort_by(|&(a, _), &(b, _)| compare(a, b));
        terms
    }

    /// Maps every object through `f`, accumulating collisions.
    #[must_use]
    pub fn mapped<Q, F>(&self, mut f: F) -> BasicFormalSum<Q>
    where
        Q: LinearParam,
        F: FnMut(P::Object) -> Q::Object,
    {
        let mut ret = BasicFormalSum::zero();
        for (key, &coeff) in &self.data {
            ret.add_to(&f(P::key_to_object(key)), coeff);
        }
        ret
    }

    /// Maps every key through `f`, accumulating collisions.
    #[must_use]
    pub fn mapped_key<Q, F>(&self, mut f: F) -> BasicFormalSum<Q>
    where
        Q: LinearParam,
        F: FnMut(&P::Key) -> Q::Key,
    {
        let mut ret = BasicFormalSum::zero();
        for (key, &coeff) in &self.data {
            ret.add_to_key(f(key), coeff);
        }
        ret
    }

    /// Replaces every term `c * key` with `c * f(key)`.
    #[must_use]
    pub fn mapped_expanding<Q, F>(&self, mut f: F) -> BasicFormalSum<Q>
    where
        Q: LinearParam,
        F: FnMut(&P::Key) -> BasicFormalSum<Q>,
    {
        let mut ret = BasicFormalSum::zero();
        for (key, &coeff) in &self.data {
            for (image, image_coeff) in f(key) {
                ret.add_to_key(image, coeff * image_coeff);
            }
        }
        ret
    }

    /// Keeps the terms whose object satisfies `pred`.
    #[must_use]
    pub fn filtered<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&P::Object) -> bool,
    {
        self.filtered_key(|key| pred(&P::key_to_object(key)))
    }

    /// Keeps the terms whose key satisfies `pred`.
    #[must_use]
    pub fn filtered_key<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&P::Key) -> bool,
    {
        Self {
            data: self
                .data
                .iter()
                .filter(|&(key, _)| pred(key))
                .map(|(key, &coeff)| (key.clone(), coeff))
                .collect(),
        }
    }

    /// Divides every coefficient by `divisor`.
    ///
    /// Every coefficient is checked before any is changed, so the sum is
    /// left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionError::ByZero`] for a zero divisor,
    /// [`DivisionError::Overflow`] for `Coeff::MIN / -1` and
    /// [`DivisionError::Inexact`] if some coefficient is not a multiple of
    /// `divisor`.
    pub fn div_int(&mut self, divisor: Coeff) -> Result<(), DivisionError> {
        if divisor == 0 {
            return Err(DivisionError::ByZero);
        }
        for &coeff in self.data.values() {
            match coeff.checked_rem(divisor) {
                None => return Err(DivisionError::Overflow { coeff, divisor }),
                Some(0) => {}
                Some(_) => return Err(DivisionError::Inexact { coeff, divisor }),
            }
        }
        for coeff in self.data.values_mut() {
            if let Some(quotient) = coeff.checked_div(divisor) {
                *coeff = quotient;
            }
        }
        Ok(())
    }

    fn add_scaled(&mut self, other: &Self, factor: Coeff) {
        for (key, &coeff) in &other.data {
            self.add_to_key(key.clone(), coeff * factor);
        }
    }

    fn scale(&mut self, factor: Coeff) {
        if factor == 0 {
            self.data.clear();
            return;
        }
        for coeff in self.data.values_mut() {
            *coeff *= factor;
        }
    }
}

impl<P: LinearParam> Default for BasicFormalSum<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: LinearParam> Clone for BasicFormalSum<P> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<P: LinearParam> PartialEq for BasicFormalSum<P> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<P: LinearParam> Eq for BasicFormalSum<P> {}

impl<P: LinearParam> IntoIterator for BasicFormalSum<P> {
    type Item = (P::Key, Coeff);
    type IntoIter = hash_map::IntoIter<P::Key, Coeff>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<P: LinearParam> FromIterator<(P::Key, Coeff)> for BasicFormalSum<P> {
    fn from_iter<I: IntoIterator<Item = (P::Key, Coeff)>>(iter: I) -> Self {
        let mut sum = Self::zero();
        for (key, coeff) in iter {
            sum.add_to_key(key, coeff);
        }
        sum
    }
}

impl<P: LinearParam> AddAssign<&Self> for BasicFormalSum<P> {
    fn add_assign(&mut self, rhs: &Self) {
        self.add_scaled(rhs, 1);
    }
}

impl<P: LinearParam> AddAssign for BasicFormalSum<P> {
    fn add_assign(&mut self, rhs: Self) {
        if self.data.len() < rhs.data.len() {
            let lhs = std::mem::replace(self, rhs);
            *self += &lhs;
        } else {
            *self += &rhs;
        }
    }
}

impl<P: LinearParam> SubAssign<&Self> for BasicFormalSum<P> {
    fn sub_assign(&mut self, rhs: &Self) {
        self.add_scaled(rhs, -1);
    }
}

impl<P: LinearParam> SubAssign for BasicFormalSum<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self -= &rhs;
    }
}

impl<P: LinearParam> MulAssign<Coeff> for BasicFormalSum<P> {
    fn mul_assign(&mut self, rhs: Coeff) {
        self.scale(rhs);
    }
}

impl<P: LinearParam> Add for BasicFormalSum<P> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<P: LinearParam> Add for &BasicFormalSum<P> {
    type Output = BasicFormalSum<P>;

    fn add(self, rhs: Self) -> BasicFormalSum<P> {
        let mut ret = self.clone();
        ret += rhs;
        ret
    }
}

impl<P: LinearParam> Sub for BasicFormalSum<P> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= &rhs;
        self
    }
}

impl<P: LinearParam> Sub for &BasicFormalSum<P> {
    type Output = BasicFormalSum<P>;

    fn sub(self, rhs: Self) -> BasicFormalSum<P> {
        let mut ret = self.clone();
        ret -= rhs;
        ret
    }
}

impl<P: LinearParam> Neg for BasicFormalSum<P> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.scale(-1);
        self
    }
}

impl<P: LinearParam> Neg for &BasicFormalSum<P> {
    type Output = BasicFormalSum<P>;

    fn neg(self) -> BasicFormalSum<P> {
        -self.clone()
    }
}

impl<P: LinearParam> Mul<Coeff> for BasicFormalSum<P> {
    type Output = Self;

    fn mul(mut self, rhs: Coeff) -> Self {
        self *= rhs;
        self
    }
}

impl<P: LinearParam> Mul<Coeff> for &BasicFormalSum<P> {
    type Output = BasicFormalSum<P>;

    fn mul(self, rhs: Coeff) -> BasicFormalSum<P> {
        self.clone() * rhs
    }
}

impl<P: LinearParam> Mul<BasicFormalSum<P>> for Coeff {
    type Output = BasicFormalSum<P>;

    fn mul(self, rhs: BasicFormalSum<P>) -> BasicFormalSum<P> {
        rhs * self
    }
}

impl<P: LinearParam> fmt::Display for BasicFormalSum<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return writeln!(f, "0");
        }
        for (key, coeff) in self.sorted_terms() {
            writeln!(f, "{coeff:+} {}", P::object_to_string(&P::key_to_object(key)))?;
        }
        Ok(())
    }
}

impl<P: LinearParam> fmt::Debug for BasicFormalSum<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sorted_terms()).finish()
    }
}
