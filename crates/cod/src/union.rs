//! Runtime support for closed tagged unions.
//!
//! A union is split in two items. The *definition* is an enum with one
//! single-field variant per member type, marked `#[cod(def)]`; it receives a
//! [`UnionDef`] implementation. The *holder* is a struct with a single
//! `Option<Definition>` field, marked `#[cod(union = Definition)]`; it
//! receives the [`Encode`](crate::Encode), [`Decode`](crate::Decode) and
//! [`CodEquals`](crate::CodEquals) implementations plus the `tag`, `size`,
//! `get`, `set` and `new` methods.
//!
//! On the wire a union is a tag byte followed by the encoding of the held
//! member. Tags are assigned by declaration order of the definition's
//! variants, starting from `1`; [`UNION_EMPTY`] (`0`) means the holder holds
//! nothing and no further bytes follow.

use crate::Error;

/// The tag written for a union holder that holds no value.
pub const UNION_EMPTY: u8 = 0;

/// Implemented by `#[cod(def)]` enums: the closed member set of a union.
pub trait UnionDef: Sized {
    /// Number of members plus one for the empty tag.
    const SIZE: usize;

    /// The wire tag of the member held by `self`, in `1..SIZE`.
    fn tag(&self) -> u8;

    /// Appends the encoding of the held member, without the tag byte.
    fn encode_member(&self, bs: &mut Vec<u8>);

    /// Decodes the member identified by `tag` from the start of `bs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUnionType`] when `tag` does not name a member,
    /// or whatever error decoding the member produced.
    fn decode_member(tag: u8, bs: &[u8]) -> Result<(Self, usize), Error>;

    /// Compares two values that hold the same member type. Values holding
    /// different member types are never equal.
    fn member_equals(&self, other: &Self) -> bool;
}
