//! Named composites: the unit the generator works on.

use syn::{Ident, Member};

use crate::{directive::Directive, field::Field};

/// A field of a record, or a member of a union definition, together with the
/// way its parent addresses it.
#[derive(Debug, Clone)]
pub struct RecordField {
    /// `self.<member>` for records; the variant name for union definitions.
    pub member: Member,
    /// The shape of the slot.
    pub field: Field,
}

/// A named composite with its directive and its fields in wire order.
///
/// For [`Directive::UnionDef`] the fields are [`Field::Union`] members in
/// declaration order, tagged `1..=N`.
#[derive(Debug, Clone)]
pub struct StructData {
    /// The declared item name.
    pub name: Ident,
    /// The resolved generation mode.
    pub directive: Directive,
    /// Fields in declaration (and wire) order.
    pub fields: Vec<RecordField>,
}

impl StructData {
    /// Whether there is nothing to encode, decode or compare.
    #[must_use]
    pub fn is_blank(&self) -> bool { self.fields.is_empty() }
}

/// Renders a member for display names: `name` or `0`.
#[must_use]
pub fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}
