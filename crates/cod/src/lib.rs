//! Compact binary encoding, decoding and structural equality generated at
//! build time.
//!
//! `#[derive(Cod)]` walks the shape of a type and generates three
//! procedures for it:
//!
//! - [`Encode::encode_cod`] appends the binary encoding to a buffer.
//! - [`Decode::decode_cod`] decodes in place and reports how many bytes it
//!   consumed.
//! - [`CodEquals::cod_equals`] compares two values structurally.
//!
//! The wire format carries no schema: fields are written back to back in
//! declaration order, so adding, removing or reordering fields changes the
//! format. See [`backend`] for the primitive encodings.
//!
//! # Example
//!
//! ```
//! use cod::{Cod, CodEquals};
//!
//! #[derive(Debug, Default, Cod)]
//! struct Person {
//!     name: String,
//!     age: u8,
//!     tags: Vec<u32>,
//! }
//!
//! let person = Person { name: "hello".into(), age: 5, tags: vec![100, 101, 102] };
//!
//! let bs = cod::encode(&person);
//! assert_eq!(bs, [5, b'h', b'e', b'l', b'l', b'o', 5, 3, 100, 101, 102]);
//!
//! let (decoded, n) = cod::decode::<Person>(&bs).unwrap();
//! assert_eq!(n, bs.len());
//! assert!(decoded.cod_equals(&person));
//! ```
//!
//! # Attributes
//!
//! - `#[cod(cast = "fixed_u32")]` on a field encodes it as another wire type
//!   and converts back on decode.
//! - `#[cod(skip = "serdes")]`, `#[cod(skip = "equality")]` or
//!   `#[cod(skip = "serdes, equality")]` omit a field from the named
//!   procedures.
//! - `#[cod(def)]` on an enum and `#[cod(union = Def)]` on a holder struct
//!   build a tagged union; see [`union`].
//! - `#[cod(crate = "path")]` overrides the path to this crate in generated
//!   code.

// Allow the derive macro to reference this crate as `::cod` internally
extern crate self as cod;

pub mod backend;
pub mod decode;
pub mod encode;
pub mod equality;
pub mod union;

mod error;

pub use cod_derive::Cod;
pub use decode::{Decode, decode};
pub use encode::{Encode, encode};
pub use equality::CodEquals;
pub use error::Error;
pub use union::{UNION_EMPTY, UnionDef};
