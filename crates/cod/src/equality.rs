//! The [`CodEquals`] trait and its implementations for standard types.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

/// Structural equality as generated by `#[derive(Cod)]`.
///
/// Unlike [`PartialEq`], fields marked `#[cod(skip = "equality")]` never take
/// part in the comparison.
pub trait CodEquals {
    /// Returns `true` when `self` and `other` are structurally equal.
    fn cod_equals(&self, other: &Self) -> bool;
}

macro_rules! impl_equals_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CodEquals for $ty {
                #[inline]
                #[allow(clippy::float_cmp)]
                fn cod_equals(&self, other: &Self) -> bool { self == other }
            }
        )*
    };
}

impl_equals_primitive! {
    u8, i8, u16, u32, u64, i16, i32, i64, usize, isize, f32, f64, bool, str,
    String,
}

impl<T: CodEquals + ?Sized> CodEquals for Box<T> {
    #[inline]
    fn cod_equals(&self, other: &Self) -> bool {
        (**self).cod_equals(&**other)
    }
}

impl<T: CodEquals> CodEquals for Option<T> {
    fn cod_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(lhs), Some(rhs)) => lhs.cod_equals(rhs),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: CodEquals> CodEquals for [T] {
    fn cod_equals(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other).all(|(lhs, rhs)| lhs.cod_equals(rhs))
    }
}

impl<T: CodEquals> CodEquals for Vec<T> {
    #[inline]
    fn cod_equals(&self, other: &Self) -> bool {
        self.as_slice().cod_equals(other.as_slice())
    }
}

impl<T: CodEquals, const N: usize> CodEquals for [T; N] {
    #[inline]
    fn cod_equals(&self, other: &Self) -> bool {
        self.as_slice().cod_equals(other.as_slice())
    }
}

impl<K, V, S> CodEquals for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: CodEquals,
    S: BuildHasher,
{
    fn cod_equals(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, lhs)| {
                other.get(key).is_some_and(|rhs| lhs.cod_equals(rhs))
            })
    }
}

impl<K: Ord, V: CodEquals> CodEquals for BTreeMap<K, V> {
    fn cod_equals(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, lhs)| {
                other.get(key).is_some_and(|rhs| lhs.cod_equals(rhs))
            })
    }
}
