//! The [`Encode`] trait and its implementations for standard types.
//!
//! The implementations here use exactly the wire forms `#[derive(Cod)]`
//! emits for inline fields, so a value encodes to the same bytes whether the
//! generator expands it in place or delegates to this trait.

use std::collections::{BTreeMap, HashMap};

use crate::backend;

/// A type that can append its `cod` encoding to a byte buffer.
///
/// Usually implemented through `#[derive(Cod)]`.
pub trait Encode {
    /// Appends the encoding of `self` to `bs`.
    fn encode_cod(&self, bs: &mut Vec<u8>);
}

// =============================================================================
// Primitive implementations
// =============================================================================

macro_rules! impl_encode_primitive {
    ($($ty:ty => $write:ident),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode_cod(&self, bs: &mut Vec<u8>) {
                    backend::$write(bs, *self);
                }
            }
        )*
    };
}

impl_encode_primitive! {
    u8 => write_u8,
    i8 => write_i8,
    u16 => write_var_u16,
    u32 => write_var_u32,
    u64 => write_var_u64,
    i16 => write_var_i16,
    i32 => write_var_i32,
    i64 => write_var_i64,
    usize => write_uint,
    isize => write_int,
    f32 => write_f32,
    f64 => write_f64,
    bool => write_bool,
}

impl Encode for str {
    #[inline]
    fn encode_cod(&self, bs: &mut Vec<u8>) { backend::write_string(bs, self); }
}

impl Encode for String {
    #[inline]
    fn encode_cod(&self, bs: &mut Vec<u8>) { backend::write_string(bs, self); }
}

// =============================================================================
// Smart pointers
// =============================================================================

impl<T: Encode + ?Sized> Encode for Box<T> {
    #[inline]
    fn encode_cod(&self, bs: &mut Vec<u8>) { (**self).encode_cod(bs); }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode_cod(&self, bs: &mut Vec<u8>) { (**self).encode_cod(bs); }
}

// =============================================================================
// Optional values
// =============================================================================

impl<T: Encode> Encode for Option<T> {
    fn encode_cod(&self, bs: &mut Vec<u8>) {
        match self {
            None => backend::write_u8(bs, 0),
            Some(value) => {
                backend::write_u8(bs, 1);
                value.encode_cod(bs);
            }
        }
    }
}

// =============================================================================
// Sequences
// =============================================================================

#[allow(clippy::cast_possible_truncation)]
fn encode_sequence<T: Encode>(items: &[T], bs: &mut Vec<u8>) {
    backend::write_var_u64(bs, items.len() as u64);
    for item in items {
        item.encode_cod(bs);
    }
}

impl<T: Encode> Encode for [T] {
    #[inline]
    fn encode_cod(&self, bs: &mut Vec<u8>) { encode_sequence(self, bs); }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode_cod(&self, bs: &mut Vec<u8>) { encode_sequence(self, bs); }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_cod(&self, bs: &mut Vec<u8>) {
        for item in self {
            item.encode_cod(bs);
        }
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    #[allow(clippy::cast_possible_truncation)]
    fn encode_cod(&self, bs: &mut Vec<u8>) {
        backend::write_var_u64(bs, self.len() as u64);
        for (key, value) in self {
            key.encode_cod(bs);
            value.encode_cod(bs);
        }
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    #[allow(clippy::cast_possible_truncation)]
    fn encode_cod(&self, bs: &mut Vec<u8>) {
        backend::write_var_u64(bs, self.len() as u64);
        for (key, value) in self {
            key.encode_cod(bs);
            value.encode_cod(bs);
        }
    }
}

/// Encodes a whole value into a fresh buffer.
///
/// # Example
///
/// ```
/// let bs = cod::encode(&vec![1u32, 300]);
/// assert_eq!(bs, [2, 1, 0xAC, 0x02]);
/// ```
#[must_use]
pub fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let mut bs = Vec::new();
    value.encode_cod(&mut bs);
    bs
}
