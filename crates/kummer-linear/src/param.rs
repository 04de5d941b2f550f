//! Parameter traits describing the basis of a formal sum.
//!
//! A formal sum is a map from keys to integer coefficients. The parameter
//! type decides what a key is, which object it stands for, and (for
//! word-like bases) how to view it as a sequence of letters.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use kummer_packed::Sequence;

/// Describes the basis elements of a formal sum.
///
/// Objects are what users build sums from; keys are their canonical,
/// hashable storage form. The two conversions must be mutually inverse on
/// canonical objects.
pub trait LinearParam {
    /// User-facing basis element.
    type Object: Clone + fmt::Debug;

    /// Canonical storage form of an object.
    type Key: Clone + Eq + Hash + Ord + fmt::Debug;

    /// Converts an object to its key.
    fn object_to_key(object: &Self::Object) -> Self::Key;

    /// Converts a key back to the object it stands for.
    fn key_to_object(key: &Self::Key) -> Self::Object;

    /// Renders an object for display.
    fn object_to_string(object: &Self::Object) -> String {
        format!("{object:?}")
    }
}

/// Capability of bases whose keys are words over an ordered alphabet.
///
/// Shuffle products and Lyndon bases are defined for any parameter
/// implementing this trait.
pub trait VectorParam: LinearParam {
    /// Letter sequence a key decomposes into.
    type Vector: Sequence;

    /// Returns the letters of `key`.
    fn key_to_vector(key: &Self::Key) -> Self::Vector;

    /// Builds a key from letters.
    fn vector_to_key(vector: &Self::Vector) -> Self::Key;

    /// Letter order used for Lyndon factorization.
    fn lyndon_compare(
        lhs: &<Self::Vector as Sequence>::Item,
        rhs: &<Self::Vector as Sequence>::Item,
    ) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Parameter whose objects are their own keys.
pub struct SimpleParam<T>(PhantomData<fn() -> T>);

impl<T> LinearParam for SimpleParam<T>
where
    T: Clone + Eq + Hash + Ord + fmt::Debug,
{
    type Object = T;
    type Key = T;

    fn object_to_key(object: &T) -> T {
        object.clone()
    }

    fn key_to_object(key: &T) -> T {
        key.clone()
    }
}

impl<T: Sequence> VectorParam for SimpleParam<T> {
    type Vector = T;

    fn key_to_vector(key: &T) -> T {
        key.clone()
    }

    fn vector_to_key(vector: &T) -> T {
        vector.clone()
    }
}

/// Parameter of annotation sums: free text labels.
pub struct AnnotationParam;

impl LinearParam for AnnotationParam {
    type Object = String;
    type Key = String;

    fn object_to_key(object: &String) -> String {
        object.clone()
    }

    fn key_to_object(key: &String) -> String {
        key.clone()
    }

    fn object_to_string(object: &String) -> String {
        object.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReversedParam;

    impl LinearParam for ReversedParam {
        type Object = Vec<u8>;
        type Key = Vec<u8>;

        fn object_to_key(object: &Vec<u8>) -> Vec<u8> {
            object.clone()
        }

        fn key_to_object(key: &Vec<u8>) -> Vec<u8> {
            key.clone()
        }
    }

    impl VectorParam for ReversedParam {
        type Vector = Vec<u8>;

        fn key_to_vector(key: &Vec<u8>) -> Vec<u8> {
            key.clone()
        }

        fn vector_to_key(vector: &Vec<u8>) -> Vec<u8> {
            vector.clone()
        }

        fn lyndon_compare(lhs: &u8, rhs: &u8) -> Ordering {
            rhs.cmp(lhs)
        }
    }

    #[test]
    fn test_default_lyndon_compare() {
        assert_eq!(
            <SimpleParam<Vec<u8>> as VectorParam>::lyndon_compare(&1, &2),
            Ordering::Less
        );
        assert_eq!(ReversedParam::lyndon_compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn test_object_to_string() {
        assert_eq!(SimpleParam::<Vec<u8>>::object_to_string(&vec![1, 2]), "[1, 2]");
        assert_eq!(AnnotationParam::object_to_string(&"Li2(x)".to_string()), "Li2(x)");
    }
}
