//! Implementations for plain records and aliases.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::Context;
use crate::data::StructData;

pub(super) fn generate(cx: &Context, data: &StructData) -> TokenStream {
    if data.is_blank() {
        return blank(cx, &data.name);
    }

    let cod = cx.cod();
    let name = &data.name;

    let encode = data
        .fields
        .iter()
        .filter(|record| !record.field.modifiers().skip.serdes)
        .map(|record| {
            let member = &record.member;
            record.field.emit_encode(cx, &quote!(self.#member))
        });

    let decode = data
        .fields
        .iter()
        .filter(|record| !record.field.modifiers().skip.serdes)
        .map(|record| {
            let member = &record.member;
            record.field.emit_decode(cx, &quote!(self.#member))
        });

    let equality = data
        .fields
        .iter()
        .filter(|record| !record.field.modifiers().skip.equality)
        .map(|record| {
            let member = &record.member;
            record.field.emit_equality(
                cx,
                &quote!(self.#member),
                &quote!(other.#member),
            )
        });

    quote! {
        #[automatically_derived]
        impl #cod::Encode for #name {
            #[allow(
                unused_variables,
                clippy::cast_possible_truncation,
                clippy::needless_range_loop
            )]
            fn encode_cod(&self, bs: &mut ::std::vec::Vec<u8>) {
                #(#encode)*
            }
        }

        #[automatically_derived]
        impl #cod::Decode for #name {
            #[allow(
                unused_mut,
                unused_variables,
                unused_assignments,
                clippy::cast_possible_truncation,
                clippy::needless_range_loop
            )]
            fn decode_cod(
                &mut self,
                bs: &[u8],
            ) -> ::core::result::Result<usize, #cod::Error> {
                let mut n: usize = 0;
                #(#decode)*
                ::core::result::Result::Ok(n)
            }
        }

        #[automatically_derived]
        impl #cod::CodEquals for #name {
            #[allow(
                unused_variables,
                clippy::float_cmp,
                clippy::needless_range_loop
            )]
            fn cod_equals(&self, other: &Self) -> bool {
                #(#equality)*
                true
            }
        }
    }
}

/// A record without fields encodes to nothing, always decodes and is always
/// equal.
fn blank(cx: &Context, name: &Ident) -> TokenStream {
    let cod = cx.cod();

    quote! {
        #[automatically_derived]
        impl #cod::Encode for #name {
            fn encode_cod(&self, _bs: &mut ::std::vec::Vec<u8>) {}
        }

        #[automatically_derived]
        impl #cod::Decode for #name {
            fn decode_cod(
                &mut self,
                _bs: &[u8],
            ) -> ::core::result::Result<usize, #cod::Error> {
                ::core::result::Result::Ok(0)
            }
        }

        #[automatically_derived]
        impl #cod::CodEquals for #name {
            fn cod_equals(&self, _other: &Self) -> bool { true }
        }
    }
}
