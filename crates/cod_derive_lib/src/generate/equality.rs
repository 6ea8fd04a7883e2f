use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, local};
use crate::field::{AliasField, BasicField, Field, MapField, PointerField};

impl Field {
    /// Emits statements returning `false` from the enclosing function as
    /// soon as `lhs` and `rhs` differ.
    #[must_use]
    pub fn emit_equality(
        &self,
        cx: &Context,
        lhs: &TokenStream,
        rhs: &TokenStream,
    ) -> TokenStream {
        match self {
            Self::Basic(f) => f.emit_equality(cx, lhs, rhs),
            Self::Array(f) => {
                emit_sequence_equality(cx, f.depth, &f.inner, lhs, rhs)
            }
            Self::Slice(f) => {
                emit_sequence_equality(cx, f.depth, &f.inner, lhs, rhs)
            }
            Self::Map(f) => f.emit_equality(cx, lhs, rhs),
            Self::Pointer(f) => f.emit_equality(cx, lhs, rhs),
            Self::Alias(f) => f.emit_equality(cx, lhs, rhs),
            Self::Union(f) => f.inner.emit_equality(cx, lhs, rhs),
        }
    }
}

impl BasicField {
    fn emit_equality(
        &self,
        cx: &Context,
        lhs: &TokenStream,
        rhs: &TokenStream,
    ) -> TokenStream {
        let cod = cx.cod();

        if self.encoded_wire_type().is_some() {
            quote! {
                if #lhs != #rhs {
                    return false;
                }
            }
        } else {
            quote! {
                if !#cod::CodEquals::cod_equals(&#lhs, &#rhs) {
                    return false;
                }
            }
        }
    }
}

// arrays and slices compare the same way: length, then every element
fn emit_sequence_equality(
    cx: &Context,
    depth: usize,
    inner: &Field,
    lhs: &TokenStream,
    rhs: &TokenStream,
) -> TokenStream {
    let i = local("i", depth);
    let inner = inner.emit_equality(cx, &quote!(#lhs[#i]), &quote!(#rhs[#i]));

    quote! {
        if #lhs.len() != #rhs.len() {
            return false;
        }
        for #i in 0..#lhs.len() {
            #inner
        }
    }
}

impl MapField {
    fn emit_equality(
        &self,
        cx: &Context,
        lhs: &TokenStream,
        rhs: &TokenStream,
    ) -> TokenStream {
        let k = local("k", self.depth);
        let l = local("lhs", self.depth);
        let r = local("rhs", self.depth);
        let inner = self.value.emit_equality(cx, &quote!((*#l)), &quote!((*#r)));

        quote! {
            if #lhs.len() != #rhs.len() {
                return false;
            }
            for (#k, #l) in #lhs.iter() {
                let ::core::option::Option::Some(#r) = #rhs.get(#k) else {
                    return false;
                };
                #inner
            }
        }
    }
}

impl PointerField {
    fn emit_equality(
        &self,
        cx: &Context,
        lhs: &TokenStream,
        rhs: &TokenStream,
    ) -> TokenStream {
        let l = local("lhs", self.depth);
        let r = local("rhs", self.depth);
        let inner = self.inner.emit_equality(cx, &quote!((*#l)), &quote!((*#r)));

        quote! {
            match (&#lhs, &#rhs) {
                (
                    ::core::option::Option::Some(#l),
                    ::core::option::Option::Some(#r),
                ) => {
                    #inner
                }
                (::core::option::Option::None, ::core::option::Option::None) => {}
                _ => return false,
            }
        }
    }
}

impl AliasField {
    fn emit_equality(
        &self,
        cx: &Context,
        lhs: &TokenStream,
        rhs: &TokenStream,
    ) -> TokenStream {
        let l = local("lhs", self.depth);
        let r = local("rhs", self.depth);
        let inner = self.inner.emit_equality(cx, &quote!((*#l)), &quote!((*#r)));

        quote! {
            {
                let #l = &#lhs;
                let #r = &#rhs;
                #inner
            }
        }
    }
}
