//! The Union Resolver: stable tag assignment for union definitions.
//!
//! Tags are positional. The first variant of a `#[cod(def)]` enum gets tag
//! `1`, the next `2`, and so on; `0` is reserved for the empty holder.
//! Reordering or inserting variants therefore changes the meaning of every
//! previously encoded tag. There is no compatibility guard.

use syn::{Fields, Ident, Member, Token, Variant, punctuated::Punctuated};
use tracing::trace;

use crate::{
    builder,
    data::{RecordField, StructData},
    field::{Field, UnionField},
    tag::{Skip, TagModifiers},
};

/// Assigns tags to the variants of the union definition `name`, returning
/// the members in declaration order.
///
/// # Errors
///
/// Rejects variants that do not wrap exactly one type, explicit
/// discriminants, skip modifiers on members, member types listed twice and
/// definitions with more than 255 members.
pub fn resolve(
    name: &Ident,
    variants: &Punctuated<Variant, Token![,]>,
) -> syn::Result<Vec<RecordField>> {
    let mut members: Vec<RecordField> = Vec::with_capacity(variants.len());

    for (index, variant) in variants.iter().enumerate() {
        if let Some((_, discriminant)) = &variant.discriminant {
            return Err(syn::Error::new_spanned(
                discriminant,
                "union member tags follow declaration order; remove the \
                 discriminant",
            ));
        }

        let field = match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                &fields.unnamed[0]
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "union definition variants must wrap exactly one member \
                     type, like `Variant(Member)`",
                ));
            }
        };

        let tag = u8::try_from(index + 1).map_err(|_| {
            syn::Error::new_spanned(
                variant,
                "a union definition can hold at most 255 members",
            )
        })?;

        if TagModifiers::from_attributes(&field.attrs)?.skip != Skip::default() {
            return Err(syn::Error::new_spanned(
                field,
                "union members cannot be skipped",
            ));
        }

        let inner = builder::build_slot(
            format!("{name}::{}", variant.ident),
            field,
            1,
        )?;
        let type_name = inner.type_name();

        if members.iter().any(|member| member.field.type_name() == type_name) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                format!(
                    "member type `{type_name}` appears more than once in \
                     union definition `{name}`"
                ),
            ));
        }

        let modifiers = *inner.modifiers();
        let member = Field::Union(UnionField {
            name: inner.name().to_owned(),
            tag,
            depth: 0,
            inner: Box::new(inner),
            modifiers,
        });

        trace!(union = %name, member = %type_name, tag, "assigned union tag");

        members.push(RecordField {
            member: Member::Named(variant.ident.clone()),
            field: member,
        });
    }

    Ok(members)
}

/// One entry of a [`UnionTable`].
#[derive(Debug, Clone, Copy)]
pub struct UnionMember<'a> {
    /// The definition variant holding the member.
    pub variant: &'a Ident,
    /// The tagged member shape.
    pub field: &'a UnionField,
}

/// The tag dispatch table of a resolved union definition.
#[derive(Debug, Clone)]
pub struct UnionTable<'a> {
    members: Vec<UnionMember<'a>>,
}

impl<'a> UnionTable<'a> {
    /// Collects the tagged members of a `#[cod(def)]` [`StructData`].
    #[must_use]
    pub fn new(data: &'a StructData) -> Self {
        let members = data
            .fields
            .iter()
            .filter_map(|record| match (&record.member, &record.field) {
                (Member::Named(variant), Field::Union(field)) => {
                    Some(UnionMember { variant, field })
                }
                _ => None,
            })
            .collect();

        Self { members }
    }

    /// Members in tag order.
    #[must_use]
    pub fn members(&self) -> &[UnionMember<'a>] { &self.members }

    /// Number of members plus one for the empty tag.
    #[must_use]
    pub fn size(&self) -> usize { self.members.len() + 1 }

    /// The tag assigned to `variant`.
    #[must_use]
    pub fn tag_of(&self, variant: &str) -> Option<u8> {
        self.members
            .iter()
            .find(|member| member.variant == variant)
            .map(|member| member.field.tag)
    }
}
