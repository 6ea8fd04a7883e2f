//! `#[derive(Cod)]`: generated binary encoding, decoding and structural
//! equality.
//!
//! The macro itself is a thin shell; the field model, union resolver and
//! code generation live in `cod_derive_lib`. Use it through the re-export in
//! the `cod` crate.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `cod::Encode`, `cod::Decode` and `cod::CodEquals` for a struct, or
/// `cod::UnionDef` for a union definition enum.
///
/// # Records
///
/// Fields are encoded back to back in declaration order. Decoding happens in
/// place, so the type usually also derives `Default`.
///
/// ```
/// use cod::Cod;
///
/// #[derive(Default, Cod)]
/// struct Person {
///     name: String,
///     age: u8,
///     #[cod(cast = "fixed_u32")]
///     id: u16,
///     #[cod(skip = "serdes, equality")]
///     scratch: Vec<u8>,
/// }
/// ```
///
/// A tuple struct with a single field is an alias and encodes exactly like
/// the field it wraps.
///
/// # Unions
///
/// A union is a definition enum listing the member types plus a holder
/// struct storing at most one of them. Tags are assigned from declaration
/// order starting at `1`, so reordering the variants changes the wire format.
///
/// ```
/// use cod::Cod;
///
/// #[derive(Debug, Default, Cod)]
/// struct Square {
///     side: u32,
/// }
///
/// #[derive(Debug, Cod)]
/// #[cod(def)]
/// enum ShapeDef {
///     Square(Square),
///     Label(String),
/// }
///
/// #[derive(Debug, Default, Cod)]
/// #[cod(union = ShapeDef)]
/// struct Shape(Option<ShapeDef>);
///
/// let shape = Shape::new(Square { side: 3 });
/// assert_eq!(shape.tag(), 1);
/// assert_eq!(cod::encode(&shape), [1, 3]);
/// ```
///
/// # Rejected Shapes
///
/// Types that cannot round-trip through the wire format are build errors:
///
/// ```compile_fail
/// use cod::Cod;
///
/// #[derive(Cod)]
/// struct Callback {
///     f: fn(u32) -> u32,
/// }
/// ```
///
/// ```compile_fail
/// use cod::Cod;
///
/// #[derive(Cod)]
/// struct Borrowed<'a> {
///     name: &'a str,
/// }
/// ```
///
/// ```compile_fail
/// use cod::Cod;
///
/// #[derive(Cod)]
/// enum Color {
///     Red,
///     Green,
/// }
/// ```
///
/// ```compile_fail
/// use cod::Cod;
///
/// #[derive(Cod)]
/// #[cod(union = ShapeDef)]
/// struct Shape(Option<u32>);
/// ```
#[proc_macro_derive(Cod, attributes(cod))]
pub fn derive_cod(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    cod_derive_lib::derive_cod(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
