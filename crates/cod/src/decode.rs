//! The [`Decode`] trait and its implementations for standard types.
//!
//! Decoding happens in place: the receiver is overwritten with the decoded
//! value, and containers are cleared before they are refilled.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use crate::{Error, backend};

/// A type that can overwrite itself from a `cod` encoding.
///
/// Usually implemented through `#[derive(Cod)]`.
///
/// Derived implementations reject a sequence or map whose decoded length
/// exceeds the remaining input when each element takes at least one byte.
/// Elements that may encode to nothing (blank records, delegates, the
/// generic container impls here) are trusted, so a hostile length prefix
/// on, say, `Vec<Marker>` runs that many iterations.
pub trait Decode {
    /// Decodes from the start of `bs` into `self`, returning the number of
    /// bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error`] encountered. Nothing is rolled back: the
    /// receiver may be partially overwritten when an error is returned.
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error>;
}

// =============================================================================
// Primitive implementations
// =============================================================================

macro_rules! impl_decode_primitive {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl Decode for $ty {
                #[inline]
                fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
                    let (value, n) = backend::$read(bs)?;
                    *self = value;
                    Ok(n)
                }
            }
        )*
    };
}

impl_decode_primitive! {
    u8 => read_u8,
    i8 => read_i8,
    u16 => read_var_u16,
    u32 => read_var_u32,
    u64 => read_var_u64,
    i16 => read_var_i16,
    i32 => read_var_i32,
    i64 => read_var_i64,
    usize => read_uint,
    isize => read_int,
    f32 => read_f32,
    f64 => read_f64,
    bool => read_bool,
}

impl Decode for String {
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        let (s, n) = backend::read_str(bs)?;
        self.clear();
        self.push_str(s);
        Ok(n)
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    #[inline]
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        (**self).decode_cod(bs)
    }
}

// =============================================================================
// Optional values
// =============================================================================

impl<T: Decode + Default> Decode for Option<T> {
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        let (presence, mut n) = backend::read_u8(bs)?;

        if presence == 0 {
            *self = None;
            return Ok(n);
        }

        let mut value = T::default();
        n += value.decode_cod(&bs[n..])?;
        *self = Some(value);

        Ok(n)
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T: Decode + Default> Decode for Vec<T> {
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        let (len, mut n) = backend::read_var_u64(bs)?;

        self.clear();
        for _ in 0..len {
            let mut item = T::default();
            n += item.decode_cod(&bs[n..])?;
            self.push(item);
        }

        Ok(n)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        let mut n = 0;
        for item in self {
            n += item.decode_cod(&bs[n..])?;
        }

        Ok(n)
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher,
{
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        let (len, mut n) = backend::read_var_u64(bs)?;

        self.clear();
        for _ in 0..len {
            let mut key = K::default();
            let mut value = V::default();
            n += key.decode_cod(&bs[n..])?;
            n += value.decode_cod(&bs[n..])?;
            self.insert(key, value);
        }

        Ok(n)
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Default + Ord,
    V: Decode + Default,
{
    fn decode_cod(&mut self, bs: &[u8]) -> Result<usize, Error> {
        let (len, mut n) = backend::read_var_u64(bs)?;

        self.clear();
        for _ in 0..len {
            let mut key = K::default();
            let mut value = V::default();
            n += key.decode_cod(&bs[n..])?;
            n += value.decode_cod(&bs[n..])?;
            self.insert(key, value);
        }

        Ok(n)
    }
}

/// Decodes a fresh value from the start of `bs`, returning it along with the
/// number of bytes consumed.
///
/// # Errors
///
/// Returns the first [`Error`] encountered while decoding.
///
/// # Example
///
/// ```
/// let (value, n) = cod::decode::<Vec<u32>>(&[2, 1, 0xAC, 0x02]).unwrap();
/// assert_eq!(value, [1, 300]);
/// assert_eq!(n, 4);
/// ```
pub fn decode<T: Decode + Default>(bs: &[u8]) -> Result<(T, usize), Error> {
    let mut value = T::default();
    let n = value.decode_cod(bs)?;

    Ok((value, n))
}
