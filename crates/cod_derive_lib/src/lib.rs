//! The engine behind `#[derive(Cod)]`.
//!
//! Generation runs in three steps:
//!
//! 1. [`directive`] reads the item-level `#[cod(...)]` attributes.
//! 2. [`builder`] turns the derive input into a [`StructData`] whose fields
//!    are [`Field`] trees, with [`union`] assigning tags for union
//!    definitions.
//! 3. [`generate`] walks the trees and emits the `cod::Encode`,
//!    `cod::Decode`, `cod::CodEquals` and `cod::UnionDef` implementations.
//!
//! Everything here works on `proc_macro2` tokens so it can be exercised from
//! ordinary unit tests.

pub mod builder;
pub mod data;
pub mod directive;
pub mod field;
pub mod generate;
pub mod tag;
pub mod union;
pub mod wire;

pub use data::{RecordField, StructData};
pub use directive::{Directive, ItemOptions};
pub use field::Field;
pub use generate::Context;

/// Expands `#[derive(Cod)]` for `input`.
///
/// # Errors
///
/// Returns the first build-time error: a malformed attribute, an unsupported
/// field shape or a union holder that does not match its definition.
pub fn derive_cod(
    input: &syn::DeriveInput,
) -> syn::Result<proc_macro2::TokenStream> {
    let options = ItemOptions::from_attributes(&input.attrs)?;
    let cx = Context::new(options.crate_path());
    let data = builder::build_struct_data(input, options.directive)?;

    Ok(generate::generate(&cx, &data))
}

#[cfg(test)]
mod tests;
