//! The table of primitive wire encodings the generator knows about.
//!
//! Each entry pairs a Rust value type with the `cod::backend` reader and
//! writer that encode it. A declared field type found in this table is
//! written inline; anything else is a delegate and goes through the nested
//! type's own `Encode` / `Decode` / `CodEquals` implementation.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// A primitive encoding provided by `cod::backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum WireType {
    U8,
    I8,
    Uint,
    Int,
    VarU16,
    VarU32,
    VarU64,
    VarI16,
    VarI32,
    VarI64,
    FixedU16,
    FixedU32,
    FixedU64,
    FixedI16,
    FixedI32,
    FixedI64,
    F32,
    F64,
    Bool,
    Str,
}

impl WireType {
    /// The default encoding of a declared primitive type name, if any.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        Some(match name {
            "u8" => Self::U8,
            "i8" => Self::I8,
            "usize" => Self::Uint,
            "isize" => Self::Int,
            "u16" => Self::VarU16,
            "u32" => Self::VarU32,
            "u64" => Self::VarU64,
            "i16" => Self::VarI16,
            "i32" => Self::VarI32,
            "i64" => Self::VarI64,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "bool" => Self::Bool,
            "String" => Self::Str,
            _ => return None,
        })
    }

    /// The encoding named by a `cast` modifier. Every default type name is
    /// accepted, plus `fixed_*` names for the fixed-width integers.
    #[must_use]
    pub fn from_cast_name(name: &str) -> Option<Self> {
        Self::from_type_name(name).or(match name {
            "fixed_u16" => Some(Self::FixedU16),
            "fixed_u32" => Some(Self::FixedU32),
            "fixed_u64" => Some(Self::FixedU64),
            "fixed_i16" => Some(Self::FixedI16),
            "fixed_i32" => Some(Self::FixedI32),
            "fixed_i64" => Some(Self::FixedI64),
            _ => None,
        })
    }

    /// Suffix shared by the backend reader and writer.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::Uint => "uint",
            Self::Int => "int",
            Self::VarU16 => "var_u16",
            Self::VarU32 => "var_u32",
            Self::VarU64 => "var_u64",
            Self::VarI16 => "var_i16",
            Self::VarI32 => "var_i32",
            Self::VarI64 => "var_i64",
            Self::FixedU16 => "u16",
            Self::FixedU32 => "u32",
            Self::FixedU64 => "u64",
            Self::FixedI16 => "i16",
            Self::FixedI32 => "i32",
            Self::FixedI64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Str => "string",
        }
    }

    /// Name of the `cod::backend` writer.
    #[must_use]
    pub fn write_fn(self) -> Ident { format_ident!("write_{}", self.api_name()) }

    /// Name of the `cod::backend` reader.
    #[must_use]
    pub fn read_fn(self) -> Ident { format_ident!("read_{}", self.api_name()) }

    /// The Rust type the backend reads and writes.
    #[must_use]
    pub fn value_type(self) -> TokenStream {
        match self {
            Self::U8 => quote!(u8),
            Self::I8 => quote!(i8),
            Self::Uint => quote!(usize),
            Self::Int => quote!(isize),
            Self::VarU16 | Self::FixedU16 => quote!(u16),
            Self::VarU32 | Self::FixedU32 => quote!(u32),
            Self::VarU64 | Self::FixedU64 => quote!(u64),
            Self::VarI16 | Self::FixedI16 => quote!(i16),
            Self::VarI32 | Self::FixedI32 => quote!(i32),
            Self::VarI64 | Self::FixedI64 => quote!(i64),
            Self::F32 => quote!(f32),
            Self::F64 => quote!(f64),
            Self::Bool => quote!(bool),
            Self::Str => quote!(::std::string::String),
        }
    }

    /// Whether values convert to and from this encoding with `as`.
    #[must_use]
    pub const fn is_numeric(self) -> bool { !matches!(self, Self::Bool | Self::Str) }

    /// Whether the writer takes its argument by reference.
    #[must_use]
    pub const fn by_reference(self) -> bool { matches!(self, Self::Str) }
}
