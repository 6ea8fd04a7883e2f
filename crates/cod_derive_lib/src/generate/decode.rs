use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::{Context, local};
use crate::field::{
    AliasField, ArrayField, BasicField, Field, MapField, PointerField,
    SliceField,
};

impl Field {
    /// Emits statements decoding from `&bs[n..]` into `place`, advancing
    /// `n` and returning early on the first error.
    #[must_use]
    pub fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        match self {
            Self::Basic(f) => f.emit_decode(cx, place),
            Self::Array(f) => f.emit_decode(cx, place),
            Self::Slice(f) => f.emit_decode(cx, place),
            Self::Map(f) => f.emit_decode(cx, place),
            Self::Pointer(f) => f.emit_decode(cx, place),
            Self::Alias(f) => f.emit_decode(cx, place),
            Self::Union(f) => f.inner.emit_decode(cx, place),
        }
    }

    /// Emits an expression producing a fresh value to decode into.
    ///
    /// Arrays are built element-wise since `[T; N]` is only `Default` for
    /// `N <= 32`.
    #[must_use]
    pub fn emit_default(&self) -> TokenStream {
        match self {
            Self::Array(f) => {
                let elem = f.inner.emit_default();
                quote!(::core::array::from_fn(|_| #elem))
            }
            Self::Union(f) => f.inner.emit_default(),
            _ => quote!(::core::default::Default::default()),
        }
    }
}

impl BasicField {
    fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();

        let Some(wire) = self.encoded_wire_type() else {
            return quote! {
                n += #cod::Decode::decode_cod(&mut #place, &bs[n..])?;
            };
        };

        let read = wire.read_fn();
        let value = match (self.modifiers.cast, self.wire) {
            (None, _) => quote!(decoded),
            (Some(_), Some(_)) => {
                let ty = &self.ty;
                quote!(decoded as #ty)
            }
            (Some(_), None) => quote!(::core::convert::From::from(decoded)),
        };

        quote! {
            {
                let (decoded, n_off) = #cod::backend::#read(&bs[n..])?;
                n += n_off;
                #place = #value;
            }
        }
    }
}

impl ArrayField {
    fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let i = local("i", self.depth);
        let inner = self.inner.emit_decode(cx, &quote!(#place[#i]));

        quote! {
            for #i in 0..#place.len() {
                #inner
            }
        }
    }
}

/// Rejects a decoded element count that the remaining input cannot hold
/// when every element takes at least one byte.
fn emit_length_check(
    cx: &Context,
    length: &Ident,
    never_empty: bool,
) -> TokenStream {
    if !never_empty {
        return TokenStream::new();
    }

    let cod = cx.cod();
    quote! {
        if #length > (bs.len() - n) as u64 {
            return ::core::result::Result::Err(#cod::Error::TruncatedData);
        }
    }
}

impl SliceField {
    fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();

        if matches!(self.inner.as_ref(), Field::Basic(elem) if elem.is_byte()) {
            return quote! {
                {
                    let (decoded, n_off) =
                        #cod::backend::read_bytes(&bs[n..])?;
                    n += n_off;
                    #place.clear();
                    #place.extend_from_slice(decoded);
                }
            };
        }

        let length = local("length", self.depth);
        let value = local("value", self.depth);
        let elem_ty = self.inner.ty();
        let fresh = self.inner.emit_default();
        let inner = self.inner.emit_decode(cx, &quote!(#value));
        let check = emit_length_check(cx, &length, self.inner.never_empty());

        quote! {
            {
                let (#length, n_off) = #cod::backend::read_var_u64(&bs[n..])?;
                n += n_off;
                #check
                #place.clear();
                for _ in 0..#length {
                    let mut #value: #elem_ty = #fresh;
                    #inner
                    #place.push(#value);
                }
            }
        }
    }
}

impl MapField {
    fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();
        let length = local("length", self.depth);
        let key = local("key", self.depth);
        let val = local("val", self.depth);

        let key_ty = self.key.ty();
        let val_ty = self.value.ty();
        let fresh_key = self.key.emit_default();
        let fresh_val = self.value.emit_default();
        let decode_key = self.key.emit_decode(cx, &quote!(#key));
        let decode_val = self.value.emit_decode(cx, &quote!(#val));
        let check = emit_length_check(
            cx,
            &length,
            self.key.never_empty() || self.value.never_empty(),
        );

        quote! {
            {
                let (#length, n_off) = #cod::backend::read_var_u64(&bs[n..])?;
                n += n_off;
                #check
                #place.clear();
                for _ in 0..#length {
                    let mut #key: #key_ty = #fresh_key;
                    let mut #val: #val_ty = #fresh_val;
                    #decode_key
                    #decode_val
                    #place.insert(#key, #val);
                }
            }
        }
    }
}

impl PointerField {
    fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let cod = cx.cod();
        let value = local("value", self.depth);
        let ty = self.inner.ty();
        let fresh = self.inner.emit_default();
        let inner = self.inner.emit_decode(cx, &quote!(#value));

        quote! {
            {
                let (presence, n_off) = #cod::backend::read_u8(&bs[n..])?;
                n += n_off;
                if presence == 0 {
                    #place = ::core::option::Option::None;
                } else {
                    let mut #value: #ty = #fresh;
                    #inner
                    #place = ::core::option::Option::Some(#value);
                }
            }
        }
    }
}

impl AliasField {
    fn emit_decode(&self, cx: &Context, place: &TokenStream) -> TokenStream {
        let value = local("value", self.depth);
        let ty = self.inner.ty();
        let fresh = self.inner.emit_default();
        let inner = self.inner.emit_decode(cx, &quote!(#value));

        quote! {
            {
                let mut #value: #ty = #fresh;
                #inner
                #place = #value;
            }
        }
    }
}
