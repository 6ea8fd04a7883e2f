//! Implementations for union definitions and union holders.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::Path;
use tracing::trace;

use super::{Context, local};
use crate::{data::StructData, union::UnionTable};

/// `UnionDef` plus one `From<Member>` per member for a `#[cod(def)]` enum.
pub(super) fn generate_def(cx: &Context, data: &StructData) -> TokenStream {
    let cod = cx.cod();
    let name = &data.name;
    let table = UnionTable::new(data);
    let size = table.size();

    let mut tag_arms = Vec::new();
    let mut encode_arms = Vec::new();
    let mut decode_arms = Vec::new();
    let mut equality_arms = Vec::new();
    let mut conversions = Vec::new();

    for member in table.members() {
        let variant = member.variant;
        let field = member.field;
        let tag = Literal::u8_unsuffixed(field.tag);
        let ty = field.inner.ty();
        let fresh = field.inner.emit_default();

        trace!(union = %name, %variant, tag = field.tag, "emitting member");

        let value = local("value", field.depth);
        let lhs = local("lhs", field.depth);
        let rhs = local("rhs", field.depth);

        let encode = field.inner.emit_encode(cx, &quote!((*#value)));
        let decode = field.inner.emit_decode(cx, &quote!(#value));
        let equality =
            field.inner.emit_equality(cx, &quote!((*#lhs)), &quote!((*#rhs)));

        tag_arms.push(quote! { Self::#variant(_) => #tag, });
        encode_arms.push(quote! {
            Self::#variant(ref #value) => {
                #encode
            }
        });
        decode_arms.push(quote! {
            #tag => {
                let mut #value: #ty = #fresh;
                #decode
                ::core::result::Result::Ok((Self::#variant(#value), n))
            }
        });
        equality_arms.push(quote! {
            (Self::#variant(#lhs), Self::#variant(#rhs)) => {
                #equality
                true
            }
        });
        conversions.push(quote! {
            #[automatically_derived]
            impl ::core::convert::From<#ty> for #name {
                fn from(value: #ty) -> Self { Self::#variant(value) }
            }
        });
    }

    quote! {
        #[automatically_derived]
        impl #cod::UnionDef for #name {
            const SIZE: usize = #size;

            fn tag(&self) -> u8 {
                match *self {
                    #(#tag_arms)*
                }
            }

            #[allow(
                unused_variables,
                clippy::cast_possible_truncation,
                clippy::needless_range_loop
            )]
            fn encode_member(&self, bs: &mut ::std::vec::Vec<u8>) {
                match *self {
                    #(#encode_arms)*
                }
            }

            #[allow(
                unused_mut,
                unused_variables,
                unused_assignments,
                clippy::cast_possible_truncation,
                clippy::needless_range_loop,
                clippy::match_single_binding
            )]
            fn decode_member(
                tag: u8,
                bs: &[u8],
            ) -> ::core::result::Result<(Self, usize), #cod::Error> {
                let mut n: usize = 0;
                match tag {
                    #(#decode_arms)*
                    _ => ::core::result::Result::Err(
                        #cod::Error::UnknownUnionType(tag)
                    ),
                }
            }

            #[allow(
                unreachable_patterns,
                clippy::float_cmp,
                clippy::needless_range_loop,
                clippy::match_single_binding
            )]
            fn member_equals(&self, other: &Self) -> bool {
                match (self, other) {
                    #(#equality_arms)*
                    _ => false,
                }
            }
        }

        #(#conversions)*
    }
}

/// Encode, decode, equality and the accessor methods for a
/// `#[cod(union = Def)]` holder.
pub(super) fn generate_holder(
    cx: &Context,
    data: &StructData,
    def: &Path,
) -> TokenStream {
    let cod = cx.cod();
    let name = &data.name;

    let Some(holder) = data.fields.first() else {
        return quote! {};
    };
    let member = &holder.member;

    quote! {
        #[automatically_derived]
        impl #cod::Encode for #name {
            fn encode_cod(&self, bs: &mut ::std::vec::Vec<u8>) {
                let tag = self.tag();
                #cod::backend::write_u8(bs, tag);
                if tag == #cod::UNION_EMPTY {
                    return;
                }
                if let ::core::option::Option::Some(value) = &self.#member {
                    #cod::UnionDef::encode_member(value, bs);
                }
            }
        }

        #[automatically_derived]
        impl #cod::Decode for #name {
            fn decode_cod(
                &mut self,
                bs: &[u8],
            ) -> ::core::result::Result<usize, #cod::Error> {
                let (tag, mut n) = #cod::backend::read_u8(bs)?;
                if tag == #cod::UNION_EMPTY {
                    self.#member = ::core::option::Option::None;
                    return ::core::result::Result::Ok(n);
                }

                let (value, n_off) =
                    <#def as #cod::UnionDef>::decode_member(tag, &bs[n..])?;
                n += n_off;
                self.set(value);

                ::core::result::Result::Ok(n)
            }
        }

        #[automatically_derived]
        impl #cod::CodEquals for #name {
            fn cod_equals(&self, other: &Self) -> bool {
                if self.tag() != other.tag() {
                    return false;
                }
                match (&self.#member, &other.#member) {
                    (
                        ::core::option::Option::Some(lhs),
                        ::core::option::Option::Some(rhs),
                    ) => #cod::UnionDef::member_equals(lhs, rhs),
                    _ => true,
                }
            }
        }

        #[automatically_derived]
        #[allow(dead_code)]
        impl #name {
            /// Creates a holder holding `value`.
            pub fn new(value: impl ::core::convert::Into<#def>) -> Self {
                Self { #member: ::core::option::Option::Some(value.into()) }
            }

            /// The wire tag of the held member, or `0` when empty.
            pub fn tag(&self) -> u8 {
                self.#member
                    .as_ref()
                    .map_or(#cod::UNION_EMPTY, #cod::UnionDef::tag)
            }

            /// Number of members plus one for the empty tag.
            pub const fn size(&self) -> usize {
                <#def as #cod::UnionDef>::SIZE
            }

            /// The held member, if any.
            pub fn get(&self) -> ::core::option::Option<&#def> {
                self.#member.as_ref()
            }

            /// Replaces the held member.
            pub fn set(&mut self, value: impl ::core::convert::Into<#def>) {
                self.#member = ::core::option::Option::Some(value.into());
            }
        }
    }
}
