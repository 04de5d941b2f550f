//! Formal sums with provenance annotations.
//!
//! A [`FormalSum`] pairs the main [`BasicFormalSum`] with [`Annotations`]:
//! a second formal sum over free-text labels describing how the value was
//! obtained. Annotations follow the arithmetic of the main sum on a best
//! effort basis. Whenever an operation cannot carry them faithfully, the
//! [`UNKNOWN_ANNOTATION`] marker is recorded instead.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::basic::{BasicFormalSum, Coeff};
use crate::error::DivisionError;
use crate::param::{AnnotationParam, LinearParam};

/// Marker recorded when annotations could not be kept accurate.
pub const UNKNOWN_ANNOTATION: &str = "<unknown>";

/// Provenance of a formal sum.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Labels with multiplicities.
    pub expression: BasicFormalSum<AnnotationParam>,
    /// Markers for lost provenance, without duplicates.
    pub errors: Vec<String>,
}

impl Annotations {
    /// Returns true if there are no labels and no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_zero() && self.errors.is_empty()
    }

    /// Records an error marker once.
    pub fn add_error(&mut self, error: &str) {
        if !self.errors.iter().any(|e| e == error) {
            self.errors.push(error.to_string());
        }
    }

    /// Records [`UNKNOWN_ANNOTATION`].
    pub fn mark_unknown(&mut self) {
        self.add_error(UNKNOWN_ANNOTATION);
    }

    /// Returns true if [`UNKNOWN_ANNOTATION`] was recorded.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.errors.iter().any(|e| e == UNKNOWN_ANNOTATION)
    }

    fn add_scaled(&mut self, other: &Self, factor: Coeff) {
        self.expression += &(&other.expression * factor);
        for error in &other.errors {
            self.add_error(error);
        }
    }
}

impl fmt::Display for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.expression.is_zero() {
            write!(f, "{}", self.expression)?;
        }
        for error in &self.errors {
            writeln!(f, "! {error}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotations")
            .field("expression", &self.expression)
            .field("errors", &self.errors)
            .finish()
    }
}

/// A finite integer combination of basis objects, with annotations.
///
/// Equality compares the main sums only.
pub struct FormalSum<P: LinearParam> {
    main: BasicFormalSum<P>,
    annotations: Annotations,
}

impl<P: LinearParam> FormalSum<P> {
    /// Creates the zero sum.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_main(BasicFormalSum::zero())
    }

    /// Wraps an unannotated main sum.
    #[must_use]
    pub fn from_main(main: BasicFormalSum<P>) -> Self {
        Self {
            main,
            annotations: Annotations::default(),
        }
    }

    /// Creates the sum `1 * object`.
    #[must_use]
    pub fn single(object: &P::Object) -> Self {
        Self::from_main(BasicFormalSum::single(object))
    }

    /// Creates the sum `1 * key`.
    #[must_use]
    pub fn single_key(key: P::Key) -> Self {
        Self::from_main(BasicFormalSum::single_key(key))
    }

    /// Sums `1 * object` over a collection.
    pub fn from_collection<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a P::Object>,
        P::Object: 'a,
    {
        Self::from_main(BasicFormalSum::from_collection(objects))
    }

    /// Sums `1 * key` over a collection.
    pub fn from_key_collection<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = P::Key>,
    {
        Self::from_main(BasicFormalSum::from_key_collection(keys))
    }

    /// Returns the main sum.
    #[must_use]
    pub fn main(&self) -> &BasicFormalSum<P> {
        &self.main
    }

    /// Consumes the sum, returning the main part.
    #[must_use]
    pub fn into_main(self) -> BasicFormalSum<P> {
        self.main
    }

    /// Adds `delta * object`.
    pub fn add_to(&mut self, object: &P::Object, delta: Coeff) {
        self.main.add_to(object, delta);
    }

    /// Adds `delta * key`.
    pub fn add_to_key(&mut self, key: P::Key, delta: Coeff) {
        self.main.add_to_key(key, delta);
    }

    /// Returns the coefficient of `object`.
    #[must_use]
    pub fn coeff(&self, object: &P::Object) -> Coeff {
        self.main.coeff(object)
    }

    /// Returns the coefficient of `key`.
    #[must_use]
    pub fn coeff_for_key(&self, key: &P::Key) -> Coeff {
        self.main.coeff_for_key(key)
    }

    /// Returns the number of non-zero terms.
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.main.num_terms()
    }

    /// Returns true if the main sum is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.main.is_zero()
    }

    /// Returns true if the main sum is zero and there are no annotations.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.main.is_zero() && self.annotations.is_empty()
    }

    /// Returns the sum of absolute coefficients.
    #[must_use]
    pub fn l1_norm(&self) -> u64 {
        self.main.l1_norm()
    }

    /// Iterates over `(key, coefficient)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&P::Key, Coeff)> + '_ {
        self.main.iter()
    }

    /// Calls `f` with every object and its coefficient.
    pub fn foreach<F: FnMut(P::Object, Coeff)>(&self, f: F) {
        self.main.foreach(f);
    }

    /// Calls `f` with every key and its coefficient.
    pub fn foreach_key<F: FnMut(&P::Key, Coeff)>(&self, f: F) {
        self.main.foreach_key(f);
    }

    /// Returns the terms sorted by key.
    #[must_use]
    pub fn sorted_terms(&self) -> Vec<(&P::Key, Coeff)> {
        self.main.sorted_terms()
    }

    /// Returns the terms sorted by a key comparator.
    pub fn sorted_terms_by<F>(&self, compare: F) -> Vec<(&P::Key, Coeff)>
    where
        F: FnMut(&P::Key, &P::Key) -> Ordering,
    {
        self.main.sorted_terms_by(compare)
    }

    /// Maps every object through `f`. Annotations are kept.
    #[must_use]
    pub fn mapped<Q, F>(&self, f: F) -> FormalSum<Q>
    where
        Q: LinearParam,
        F: FnMut(P::Object) -> Q::Object,
    {
        FormalSum {
            main: self.main.mapped(f),
            annotations: self.annotations.clone(),
        }
    }

    /// Maps every key through `f`. Annotations are kept.
    #[must_use]
    pub fn mapped_key<Q, F>(&self, f: F) -> FormalSum<Q>
    where
        Q: LinearParam,
        F: FnMut(&P::Key) -> Q::Key,
    {
        FormalSum {
            main: self.main.mapped_key(f),
            annotations: self.annotations.clone(),
        }
    }

    /// Replaces every term `c * key` with `c * f(key)`. Annotations are
    /// kept; those of the images are ignored.
    #[must_use]
    pub fn mapped_expanding<Q, F>(&self, mut f: F) -> FormalSum<Q>
    where
        Q: LinearParam,
        F: FnMut(&P::Key) -> FormalSum<Q>,
    {
        FormalSum {
            main: self.main.mapped_expanding(|key| f(key).main),
            annotations: self.annotations.clone(),
        }
    }

    /// Keeps the terms whose object satisfies `pred`.
    ///
    /// The result is a different element, so annotations are replaced by
    /// [`UNKNOWN_ANNOTATION`] if there were any.
    #[must_use]
    pub fn filtered<F>(&self, pred: F) -> Self
    where
        F: FnMut(&P::Object) -> bool,
    {
        self.with_filtered_main(self.main.filtered(pred))
    }

    /// Keeps the terms whose key satisfies `pred`.
    #[must_use]
    pub fn filtered_key<F>(&self, pred: F) -> Self
    where
        F: FnMut(&P::Key) -> bool,
    {
        self.with_filtered_main(self.main.filtered_key(pred))
    }

    fn with_filtered_main(&self, main: BasicFormalSum<P>) -> Self {
        let mut ret = Self::from_main(main);
        if self.has_annotations() {
            ret.annotations.mark_unknown();
        }
        ret
    }

    /// Divides every coefficient by `divisor`.
    ///
    /// On the annotation sum an inexact division is not an error: the
    /// labels are dropped and [`UNKNOWN_ANNOTATION`] is recorded.
    ///
    /// # Errors
    ///
    /// Returns a [`DivisionError`] if the main sum is not divisible; in that
    /// case nothing is changed.
    pub fn div_int(&mut self, divisor: Coeff) -> Result<(), DivisionError> {
        self.main.div_int(divisor)?;
        if self.annotations.expression.div_int(divisor).is_err() {
            self.annotations.expression = BasicFormalSum::zero();
            self.annotations.mark_unknown();
        }
        Ok(())
    }

    /// Adds a provenance label.
    pub fn annotate(&mut self, text: impl Into<String>) -> &mut Self {
        self.annotations.expression.add_to_key(text.into(), 1);
        self
    }

    /// Returns the sum with a provenance label added.
    #[must_use]
    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.annotate(text);
        self
    }

    /// Returns the annotations.
    #[must_use]
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Returns true if any label or marker is present.
    #[must_use]
    pub fn has_annotations(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Adds the annotations of `other` to this sum.
    pub fn copy_annotations<Q: LinearParam>(&mut self, other: &FormalSum<Q>) {
        self.annotations.add_scaled(&other.annotations, 1);
    }

    /// Adds the annotations of `other`, with every label rewritten by `f`.
    pub fn copy_annotations_mapped<Q, F>(&mut self, other: &FormalSum<Q>, mut f: F)
    where
        Q: LinearParam,
        F: FnMut(&str) -> String,
    {
        let expression: BasicFormalSum<AnnotationParam> =
            other.annotations.expression.mapped_key(|label| f(label));
        self.annotations.expression += expression;
        for error in &other.annotations.errors {
            self.annotations.add_error(error);
        }
    }

    /// Returns a copy without annotations.
    #[must_use]
    pub fn without_annotations(&self) -> Self {
        Self::from_main(self.main.clone())
    }

    fn add_scaled(&mut self, other: &Self, factor: Coeff) {
        let self_annotated = self.has_annotations();
        let other_annotated = other.has_annotations();
        if (self_annotated && !other_annotated && !other.main.is_zero())
            || (other_annotated && !self_annotated && !self.main.is_zero())
        {
            self.annotations.mark_unknown();
        }
        self.annotations.add_scaled(&other.annotations, factor);
        if factor == 1 {
            self.main += &other.main;
        } else {
            self.main -= &other.main;
        }
    }
}

impl<P: LinearParam> Default for FormalSum<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: LinearParam> Clone for FormalSum<P> {
    fn clone(&self) -> Self {
        Self {
            main: self.main.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

impl<P: LinearParam> PartialEq for FormalSum<P> {
    fn eq(&self, other: &Self) -> bool {
        self.main == other.main
    }
}

impl<P: LinearParam> Eq for FormalSum<P> {}

impl<P: LinearParam> From<BasicFormalSum<P>> for FormalSum<P> {
    fn from(main: BasicFormalSum<P>) -> Self {
        Self::from_main(main)
    }
}

impl<P: LinearParam> IntoIterator for FormalSum<P> {
    type Item = (P::Key, Coeff);
    type IntoIter = <BasicFormalSum<P> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.main.into_iter()
    }
}

impl<P: LinearParam> FromIterator<(P::Key, Coeff)> for FormalSum<P> {
    fn from_iter<I: IntoIterator<Item = (P::Key, Coeff)>>(iter: I) -> Self {
        Self::from_main(iter.into_iter().collect())
    }
}

impl<P: LinearParam> AddAssign<&Self> for FormalSum<P> {
    fn add_assign(&mut self, rhs: &Self) {
        self.add_scaled(rhs, 1);
    }
}

impl<P: LinearParam> AddAssign for FormalSum<P> {
    fn add_assign(&mut self, rhs: Self) {
        self.add_scaled(&rhs, 1);
    }
}

impl<P: LinearParam> SubAssign<&Self> for FormalSum<P> {
    fn sub_assign(&mut self, rhs: &Self) {
        self.add_scaled(rhs, -1);
    }
}

impl<P: LinearParam> SubAssign for FormalSum<P> {
    fn sub_assign(&mut self, rhs: Self) {
        self.add_scaled(&rhs, -1);
    }
}

impl<P: LinearParam> MulAssign<Coeff> for FormalSum<P> {
    fn mul_assign(&mut self, rhs: Coeff) {
        self.main *= rhs;
        self.annotations.expression *= rhs;
    }
}

impl<P: LinearParam> Add for FormalSum<P> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += &rhs;
        self
    }
}

impl<P: LinearParam> Add for &FormalSum<P> {
    type Output = FormalSum<P>;

    fn add(self, rhs: Self) -> FormalSum<P> {
        let mut ret = self.clone();
        ret += rhs;
        ret
    }
}

impl<P: LinearParam> Sub for FormalSum<P> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= &rhs;
        self
    }
}

impl<P: LinearParam> Sub for &FormalSum<P> {
    type Output = FormalSum<P>;

    fn sub(self, rhs: Self) -> FormalSum<P> {
        let mut ret = self.clone();
        ret -= rhs;
        ret
    }
}

impl<P: LinearParam> Neg for FormalSum<P> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self *= -1;
        self
    }
}

impl<P: LinearParam> Neg for &FormalSum<P> {
    type Output = FormalSum<P>;

    fn neg(self) -> FormalSum<P> {
        -self.clone()
    }
}

impl<P: LinearParam> Mul<Coeff> for FormalSum<P> {
    type Output = Self;

    fn mul(mut self, rhs: Coeff) -> Self {
        self *= rhs;
        self
    }
}

impl<P: LinearParam> Mul<Coeff> for &FormalSum<P> {
    type Output = FormalSum<P>;

    fn mul(self, rhs: Coeff) -> FormalSum<P> {
        self.clone() * rhs
    }
}

impl<P: LinearParam> Mul<FormalSum<P>> for Coeff {
    type Output = FormalSum<P>;

    fn mul(self, rhs: FormalSum<P>) -> FormalSum<P> {
        rhs * self
    }
}

impl<P: LinearParam> Mul<&FormalSum<P>> for Coeff {
    type Output = FormalSum<P>;

    fn mul(self, rhs: &FormalSum<P>) -> FormalSum<P> {
        rhs * self
    }
}

impl<P: LinearParam> fmt::Display for FormalSum<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_annotations() {
            write!(f, "{}", self.annotations)?;
            writeln!(f, "=>")?;
        }
        write!(f, "{}", self.main)
    }
}

impl<P: LinearParam> fmt::Debug for FormalSum<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
