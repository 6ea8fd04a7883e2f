use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, local};
use crate::field::{
    AliasField, ArrayField, BasicField, Field, MapField, PointerField,
    SliceField,
};

impl Field {
    /// Emits statements appending the encoding of `place` to `bs`.
    #[must_use]
    pub fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        match self {
            Self::Basic(f) => f.emit_encode(cx, place),
            Self::Array(f) => f.emit_encode(cx, place),
            Self::Slice(f) => f.emit_encode(cx, place),
            Self::Map(f) => f.emit_encode(cx, place),
            Self::Pointer(f) => f.emit_encode(cx, place),
            Self::Alias(f) => f.emit_encode(cx, place),
            Self::Union(f) => f.inner.emit_encode(cx, place),
        }
    }
}

impl BasicField {
    fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();

        let Some(wire) = self.encoded_wire_type() else {
            return quote! { #cod::Encode::encode_cod(&#place, bs); };
        };

        let write = wire.write_fn();
        let value = match (self.modifiers.cast, self.wire) {
            (None, _) if wire.by_reference() => quote!(&#place),
            (None, _) => quote!(#place),
            (Some(cast), Some(_)) => {
                let target = cast.value_type();
                quote!(#place as #target)
            }
            (Some(_), None) => quote! {
                ::core::convert::From::from(
                    ::core::clone::Clone::clone(&#place)
                )
            },
        };

        quote! { #cod::backend::#write(bs, #value); }
    }
}

impl ArrayField {
    fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let i = local("i", self.depth);
        let inner = self.inner.emit_encode(cx, &quote!(#place[#i]));

        quote! {
            for #i in 0..#place.len() {
                #inner
            }
        }
    }
}

impl SliceField {
    fn is_bytes(&self) -> bool {
        matches!(self.inner.as_ref(), Field::Basic(elem) if elem.is_byte())
    }

    fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();

        if self.is_bytes() {
            return quote! { #cod::backend::write_bytes(bs, &#place); };
        }

        let i = local("i", self.depth);
        let inner = self.inner.emit_encode(cx, &quote!(#place[#i]));

        quote! {
            #cod::backend::write_var_u64(bs, #place.len() as u64);
            for #i in 0..#place.len() {
                #inner
            }
        }
    }
}

impl MapField {
    fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();
        let k = local("k", self.depth);
        let v = local("v", self.depth);

        let key = self.key.emit_encode(cx, &quote!((*#k)));
        let value = self.value.emit_encode(cx, &quote!((*#v)));

        quote! {
            #cod::backend::write_var_u64(bs, #place.len() as u64);
            for (#k, #v) in #place.iter() {
                #key
                #value
            }
        }
    }
}

impl PointerField {
    fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();
        let value = local("value", self.depth);
        let inner = self.inner.emit_encode(cx, &quote!((*#value)));

        quote! {
            match &#place {
                ::core::option::Option::Some(#value) => {
                    #cod::backend::write_u8(bs, 1);
                    #inner
                }
                ::core::option::Option::None => {
                    #cod::backend::write_u8(bs, 0);
                }
            }
        }
    }
}

impl AliasField {
    fn emit_encode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let value = local("value", self.depth);
        let inner = self.inner.emit_encode(cx, &quote!((*#value)));

        quote! {
            {
                let #value = &#place;
                #inner
            }
        }
    }
}
