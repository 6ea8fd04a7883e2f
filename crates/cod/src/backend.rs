//! Primitive read and write routines defining the `cod` wire format.
//!
//! Every writer appends to a caller supplied buffer and never touches bytes
//! already written. Every reader takes the remaining input and returns the
//! decoded value together with the number of bytes it consumed.
//!
//! # Format Overview
//!
//! - **`u8` / `i8` / `bool`**: a single raw byte. Booleans decode as `true`
//!   only when the byte is exactly `1`.
//! - **Fixed-width integers** (`u16`..`i64` writers without the `var_`
//!   prefix): two, four or eight bytes, little-endian.
//! - **Varints** (`var_*`, `uint`, `int`): LEB128, where each byte stores 7
//!   bits of data with the MSB indicating continuation. Signed values are
//!   zigzag encoded first so small negative numbers stay small.
//! - **Floating-point**: the IEEE-754 bit pattern written through the
//!   fixed-width unsigned writer of the same width.
//! - **Strings/bytes**: a `var_u64` length prefix followed by the raw bytes.
//!
//! # Example
//!
//! ```
//! use cod::backend;
//!
//! let mut bs = Vec::new();
//! backend::write_string(&mut bs, "hello");
//! backend::write_var_u32(&mut bs, 300);
//!
//! let (name, n) = backend::read_string(&bs).unwrap();
//! let (value, _) = backend::read_var_u32(&bs[n..]).unwrap();
//! assert_eq!(name, "hello");
//! assert_eq!(value, 300);
//! ```

use crate::Error;

// =============================================================================
// Varint helper functions
// =============================================================================

/// Maximum number of bytes a 64-bit varint may occupy.
pub const MAX_VARINT_LEN64: usize = 10;

/// Zigzag encodes a signed 64-bit integer to unsigned.
#[inline]
#[allow(clippy::cast_sign_loss)]
const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Zigzag decodes an unsigned 64-bit integer to signed.
#[inline]
#[allow(clippy::cast_possible_wrap)]
const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ (-((value & 1) as i64))
}

/// Converts a decoded wide value into a narrower integer type, rejecting
/// values that do not fit.
#[inline]
fn narrow<T: TryFrom<V>, V>(
    (value, n): (V, usize),
) -> Result<(T, usize), Error> {
    T::try_from(value).map(|v| (v, n)).map_err(|_| Error::VarintOverflow)
}

/// Takes the first `N` bytes of the input as an array.
#[inline]
fn read_array<const N: usize>(bs: &[u8]) -> Result<[u8; N], Error> {
    bs.first_chunk::<N>().copied().ok_or(Error::TruncatedData)
}

// =============================================================================
// Single byte values
// =============================================================================

/// Appends a raw byte.
#[inline]
pub fn write_u8(bs: &mut Vec<u8>, v: u8) { bs.push(v); }

/// Reads a raw byte.
#[inline]
pub fn read_u8(bs: &[u8]) -> Result<(u8, usize), Error> {
    bs.first().map(|&b| (b, 1)).ok_or(Error::TruncatedData)
}

/// Appends a signed byte as its two's complement bit pattern.
#[inline]
pub fn write_i8(bs: &mut Vec<u8>, v: i8) {
    bs.extend_from_slice(&v.to_le_bytes());
}

/// Reads a signed byte.
#[inline]
pub fn read_i8(bs: &[u8]) -> Result<(i8, usize), Error> {
    Ok((i8::from_le_bytes(read_array(bs)?), 1))
}

/// Appends a boolean as `0` or `1`.
#[inline]
pub fn write_bool(bs: &mut Vec<u8>, v: bool) { bs.push(u8::from(v)); }

/// Reads a boolean. Only the byte `1` decodes as `true`.
#[inline]
pub fn read_bool(bs: &[u8]) -> Result<(bool, usize), Error> {
    let (b, n) = read_u8(bs)?;
    Ok((b == 1, n))
}

// =============================================================================
// Unsigned varints
// =============================================================================

/// Appends an unsigned 64-bit varint.
#[allow(clippy::cast_possible_truncation)]
pub fn write_var_u64(bs: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        bs.push((v as u8) | 0x80);
        v >>= 7;
    }
    bs.push(v as u8);
}

/// Reads an unsigned 64-bit varint.
///
/// Fails with [`Error::TruncatedData`] when the input ends while the
/// continuation bit is still set, or when the encoding runs past ten bytes
/// without terminating inside 64 bits.
pub fn read_var_u64(bs: &[u8]) -> Result<(u64, usize), Error> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in bs.iter().enumerate() {
        if i == MAX_VARINT_LEN64 {
            return Err(Error::TruncatedData);
        }

        if byte < 0x80 {
            if i == MAX_VARINT_LEN64 - 1 && byte > 1 {
                return Err(Error::TruncatedData);
            }
            return Ok((result | (u64::from(byte) << shift), i + 1));
        }

        result |= u64::from(byte & 0x7F) << shift;
        shift += 7;
    }

    Err(Error::TruncatedData)
}

/// Appends an unsigned 16-bit varint.
#[inline]
pub fn write_var_u16(bs: &mut Vec<u8>, v: u16) { write_var_u64(bs, u64::from(v)); }

/// Reads an unsigned 16-bit varint.
#[inline]
pub fn read_var_u16(bs: &[u8]) -> Result<(u16, usize), Error> {
    narrow(read_var_u64(bs)?)
}

/// Appends an unsigned 32-bit varint.
#[inline]
pub fn write_var_u32(bs: &mut Vec<u8>, v: u32) { write_var_u64(bs, u64::from(v)); }

/// Reads an unsigned 32-bit varint.
#[inline]
pub fn read_var_u32(bs: &[u8]) -> Result<(u32, usize), Error> {
    narrow(read_var_u64(bs)?)
}

/// Appends a machine-width unsigned integer as a varint.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn write_uint(bs: &mut Vec<u8>, v: usize) { write_var_u64(bs, v as u64); }

/// Reads a machine-width unsigned varint.
#[inline]
pub fn read_uint(bs: &[u8]) -> Result<(usize, usize), Error> {
    narrow(read_var_u64(bs)?)
}

// =============================================================================
// Signed (zigzag) varints
// =============================================================================

/// Appends a signed 64-bit varint (zigzag, then LEB128).
#[inline]
pub fn write_var_i64(bs: &mut Vec<u8>, v: i64) { write_var_u64(bs, zigzag_encode(v)); }

/// Reads a signed 64-bit varint.
#[inline]
pub fn read_var_i64(bs: &[u8]) -> Result<(i64, usize), Error> {
    let (v, n) = read_var_u64(bs)?;
    Ok((zigzag_decode(v), n))
}

/// Appends a signed 16-bit varint.
#[inline]
pub fn write_var_i16(bs: &mut Vec<u8>, v: i16) { write_var_i64(bs, i64::from(v)); }

/// Reads a signed 16-bit varint.
#[inline]
pub fn read_var_i16(bs: &[u8]) -> Result<(i16, usize), Error> {
    narrow(read_var_i64(bs)?)
}

/// Appends a signed 32-bit varint.
#[inline]
pub fn write_var_i32(bs: &mut Vec<u8>, v: i32) { write_var_i64(bs, i64::from(v)); }

/// Reads a signed 32-bit varint.
#[inline]
pub fn read_var_i32(bs: &[u8]) -> Result<(i32, usize), Error> {
    narrow(read_var_i64(bs)?)
}

/// Appends a machine-width signed integer as a varint.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn write_int(bs: &mut Vec<u8>, v: isize) { write_var_i64(bs, v as i64); }

/// Reads a machine-width signed varint.
#[inline]
pub fn read_int(bs: &[u8]) -> Result<(isize, usize), Error> {
    narrow(read_var_i64(bs)?)
}

// =============================================================================
// Fixed-width little-endian integers
// =============================================================================

macro_rules! fixed_width {
    ($($write:ident, $read:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Appends a `", stringify!($ty), "` as fixed-width little-endian bytes.")]
            #[inline]
            pub fn $write(bs: &mut Vec<u8>, v: $ty) {
                bs.extend_from_slice(&v.to_le_bytes());
            }

            #[doc = concat!("Reads a fixed-width little-endian `", stringify!($ty), "`.")]
            #[inline]
            pub fn $read(bs: &[u8]) -> Result<($ty, usize), Error> {
                Ok((
                    <$ty>::from_le_bytes(read_array(bs)?),
                    ::core::mem::size_of::<$ty>(),
                ))
            }
        )*
    };
}

fixed_width! {
    write_u16, read_u16 => u16;
    write_u32, read_u32 => u32;
    write_u64, read_u64 => u64;
    write_i16, read_i16 => i16;
    write_i32, read_i32 => i32;
    write_i64, read_i64 => i64;
}

// =============================================================================
// Floating-point
// =============================================================================

/// Appends an `f32` through its fixed-width bit pattern.
#[inline]
pub fn write_f32(bs: &mut Vec<u8>, v: f32) { write_u32(bs, v.to_bits()); }

/// Reads an `f32` from its fixed-width bit pattern.
#[inline]
pub fn read_f32(bs: &[u8]) -> Result<(f32, usize), Error> {
    let (bits, n) = read_u32(bs)?;
    Ok((f32::from_bits(bits), n))
}

/// Appends an `f64` through its fixed-width bit pattern.
#[inline]
pub fn write_f64(bs: &mut Vec<u8>, v: f64) { write_u64(bs, v.to_bits()); }

/// Reads an `f64` from its fixed-width bit pattern.
#[inline]
pub fn read_f64(bs: &[u8]) -> Result<(f64, usize), Error> {
    let (bits, n) = read_u64(bs)?;
    Ok((f64::from_bits(bits), n))
}

// =============================================================================
// Length-prefixed byte sequences
// =============================================================================

/// Appends a length-prefixed byte sequence.
#[allow(clippy::cast_possible_truncation)]
pub fn write_bytes(bs: &mut Vec<u8>, v: &[u8]) {
    write_var_u64(bs, v.len() as u64);
    bs.extend_from_slice(v);
}

/// Reads a length-prefixed byte sequence without copying it.
///
/// The returned slice borrows from the input buffer.
pub fn read_bytes(bs: &[u8]) -> Result<(&[u8], usize), Error> {
    let (len, n) = read_var_u64(bs)?;

    let end = usize::try_from(len)
        .ok()
        .and_then(|len| n.checked_add(len))
        .ok_or(Error::TruncatedData)?;
    let data = bs.get(n..end).ok_or(Error::TruncatedData)?;

    Ok((data, end))
}

/// Appends a length-prefixed UTF-8 string.
#[inline]
pub fn write_string(bs: &mut Vec<u8>, v: &str) { write_bytes(bs, v.as_bytes()); }

/// Reads a length-prefixed string, borrowing from the input buffer.
pub fn read_str(bs: &[u8]) -> Result<(&str, usize), Error> {
    let (data, n) = read_bytes(bs)?;
    let s = std::str::from_utf8(data).map_err(|_| Error::InvalidUtf8)?;

    Ok((s, n))
}

/// Reads a length-prefixed string into an owned [`String`].
#[inline]
pub fn read_string(bs: &[u8]) -> Result<(String, usize), Error> {
    let (s, n) = read_str(bs)?;
    Ok((s.to_owned(), n))
}
