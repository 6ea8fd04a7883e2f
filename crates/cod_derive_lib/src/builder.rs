//! The Field Model Builder: turns declared Rust types into [`Field`] trees
//! and derive inputs into [`StructData`].
//!
//! Recognised shapes, by the last path segment of the type:
//!
//! - `Vec<T>` becomes a slice, `[T; N]` an array.
//! - `HashMap<K, V>` / `HashMap<K, V, S>` / `BTreeMap<K, V>` become maps.
//! - `Option<T>` becomes a pointer.
//! - A primitive from the wire table becomes a primitive leaf.
//! - Every other path becomes a delegate leaf.
//!
//! References, raw pointers, function pointers, trait objects, tuples,
//! unsized slices and qualified associated types are rejected.

use syn::{
    Data, DeriveInput, Fields, GenericArgument, Ident, Index, Member, Path,
    PathArguments, PathSegment, Type,
};
use tracing::debug;

use crate::{
    data::{RecordField, StructData, member_name},
    directive::Directive,
    field::{
        AliasField, ArrayField, BasicField, Field, MapField, PointerField,
        SliceField,
    },
    tag::TagModifiers,
    union,
    wire::WireType,
};

/// Builds the shape of `ty`, numbering container nodes from `depth`.
///
/// The returned tree carries empty display names and default modifiers;
/// callers set both through [`Field::set_name`] and
/// [`Field::set_modifiers`].
///
/// # Errors
///
/// Returns an error spanned at the first unsupported type.
pub fn build_field(ty: &Type, depth: usize) -> syn::Result<Field> {
    match ty {
        Type::Paren(paren) => build_field(&paren.elem, depth),
        Type::Group(group) => build_field(&group.elem, depth),

        Type::Array(array) => Ok(Field::Array(ArrayField {
            name: String::new(),
            ty: ty.clone(),
            depth,
            inner: Box::new(build_field(&array.elem, depth + 1)?),
            modifiers: TagModifiers::default(),
        })),

        Type::Path(path) if path.qself.is_none() => {
            build_path(ty, &path.path, depth)
        }

        Type::Path(_) => Err(unsupported(
            ty,
            "qualified associated types cannot be serialized; name the \
             concrete type instead",
        )),
        Type::Tuple(_) => Err(unsupported(
            ty,
            "tuple types cannot be serialized; use a record type instead",
        )),
        Type::BareFn(_) => {
            Err(unsupported(ty, "function types cannot be serialized"))
        }
        Type::TraitObject(_) | Type::ImplTrait(_) => {
            Err(unsupported(ty, "trait object types cannot be serialized"))
        }
        Type::Reference(_) | Type::Ptr(_) => Err(unsupported(
            ty,
            "references and raw pointers cannot be decoded; use `Box<T>` or \
             `Option<T>`",
        )),
        Type::Slice(_) => Err(unsupported(
            ty,
            "unsized slices cannot be serialized; use `Vec<T>`",
        )),
        _ => Err(unsupported(ty, "unsupported field type")),
    }
}

fn unsupported(ty: &Type, message: &str) -> syn::Error {
    syn::Error::new_spanned(ty, message)
}

fn type_arguments(segment: &PathSegment) -> Vec<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn build_path(ty: &Type, path: &Path, depth: usize) -> syn::Result<Field> {
    let Some(segment) = path.segments.last() else {
        return Err(unsupported(ty, "empty type path"));
    };

    let ident = segment.ident.to_string();
    let arguments = type_arguments(segment);

    let field = match (ident.as_str(), arguments.as_slice()) {
        ("Vec", [elem]) => Field::Slice(SliceField {
            name: String::new(),
            ty: ty.clone(),
            depth,
            inner: Box::new(build_field(elem, depth + 1)?),
            modifiers: TagModifiers::default(),
        }),

        ("HashMap", [key, value] | [key, value, _])
        | ("BTreeMap", [key, value]) => Field::Map(MapField {
            name: String::new(),
            ty: ty.clone(),
            depth,
            key: Box::new(build_field(key, depth + 1)?),
            value: Box::new(build_field(value, depth + 1)?),
            modifiers: TagModifiers::default(),
        }),

        ("Option", [inner]) => Field::Pointer(PointerField {
            name: String::new(),
            ty: ty.clone(),
            depth,
            inner: Box::new(build_field(inner, depth + 1)?),
            modifiers: TagModifiers::default(),
        }),

        (name, []) if segment.arguments.is_none() => {
            Field::Basic(BasicField {
                name: String::new(),
                ty: ty.clone(),
                wire: WireType::from_type_name(name),
                modifiers: TagModifiers::default(),
            })
        }

        _ => Field::Basic(BasicField {
            name: String::new(),
            ty: ty.clone(),
            wire: None,
            modifiers: TagModifiers::default(),
        }),
    };

    Ok(field)
}

/// Rejects casts on leaves whose declared type cannot convert with `as`.
fn check_casts(field: &Field) -> syn::Result<()> {
    match field {
        Field::Basic(basic) => match (basic.modifiers.cast, basic.wire) {
            (Some(_), Some(wire)) if !wire.is_numeric() => {
                Err(syn::Error::new_spanned(
                    &basic.ty,
                    format!(
                        "`{}` cannot be cast; only numeric fields and \
                         delegate types with `From` conversions can",
                        field.type_name()
                    ),
                ))
            }
            _ => Ok(()),
        },
        Field::Array(f) => check_casts(&f.inner),
        Field::Slice(f) => check_casts(&f.inner),
        Field::Map(f) => {
            check_casts(&f.key)?;
            check_casts(&f.value)
        }
        Field::Pointer(f) => check_casts(&f.inner),
        Field::Alias(f) => check_casts(&f.inner),
        Field::Union(f) => check_casts(&f.inner),
    }
}

/// Builds the named, modified shape of one declared slot.
///
/// # Errors
///
/// Unsupported types, malformed `#[cod(...)]` modifiers and casts on
/// non-numeric fields are rejected.
pub fn build_slot(
    name: String,
    field: &syn::Field,
    depth: usize,
) -> syn::Result<Field> {
    let mut built = build_field(&field.ty, depth)?;
    built.set_name(name);
    built.set_modifiers(TagModifiers::from_attributes(&field.attrs)?);
    check_casts(&built)?;

    Ok(built)
}

fn build_record_field(
    index: usize,
    field: &syn::Field,
) -> syn::Result<RecordField> {
    let member = field
        .ident
        .clone()
        .map_or_else(|| Member::Unnamed(Index::from(index)), Member::Named);

    let built =
        build_slot(format!("self.{}", member_name(&member)), field, 0)?;

    debug!(
        field = built.name(),
        kind = built.kind(),
        ty = %built.type_name(),
        "built record field"
    );

    Ok(RecordField { member, field: built })
}

fn build_alias(name: &Ident, field: &syn::Field) -> syn::Result<RecordField> {
    let mut alias = Field::Alias(AliasField {
        name: String::new(),
        alias: name.clone(),
        depth: 0,
        inner: Box::new(build_field(&field.ty, 1)?),
        modifiers: TagModifiers::default(),
    });
    alias.set_name("self".to_owned());
    alias.set_modifiers(TagModifiers::from_attributes(&field.attrs)?);
    check_casts(&alias)?;

    debug!(alias = %name, ty = %alias.type_name(), "built alias");

    Ok(RecordField { member: Member::Unnamed(Index::from(0)), field: alias })
}

fn build_record(name: Ident, fields: &Fields) -> syn::Result<StructData> {
    let fields = match fields {
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
            vec![build_alias(&name, &unnamed.unnamed[0])?]
        }
        fields => fields
            .iter()
            .enumerate()
            .map(|(index, field)| build_record_field(index, field))
            .collect::<syn::Result<_>>()?,
    };

    Ok(StructData { name, directive: Directive::Struct, fields })
}

fn same_type_name(ty: &Type, def: &Path) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    match (path.path.segments.last(), def.segments.last()) {
        (Some(lhs), Some(rhs)) => {
            lhs.ident == rhs.ident
                && lhs.arguments.is_none()
                && rhs.arguments.is_none()
        }
        _ => false,
    }
}

fn build_union_holder(
    name: Ident,
    def: Path,
    fields: &Fields,
) -> syn::Result<StructData> {
    let mut iter = fields.iter();
    let (Some(field), None) = (iter.next(), iter.next()) else {
        return Err(syn::Error::new_spanned(
            &name,
            "a union holder must have exactly one field of type \
             `Option<Definition>`",
        ));
    };

    if !TagModifiers::from_attributes(&field.attrs)?.is_empty() {
        return Err(syn::Error::new_spanned(
            field,
            "union holder fields take no modifiers",
        ));
    }

    let record = build_record_field(0, field)?;

    let holds_def = match &record.field {
        Field::Pointer(pointer) => match pointer.inner.as_ref() {
            Field::Basic(member) => {
                member.wire.is_none() && same_type_name(&member.ty, &def)
            }
            _ => false,
        },
        _ => false,
    };

    if !holds_def {
        let def_name = quote::quote!(#def).to_string().replace(' ', "");
        return Err(syn::Error::new_spanned(
            &field.ty,
            format!(
                "union holder field must be `Option<{def_name}>` to match \
                 `#[cod(union = {def_name})]`"
            ),
        ));
    }

    Ok(StructData {
        name,
        directive: Directive::Union(def),
        fields: vec![record],
    })
}

/// Builds the [`StructData`] for a derive input under `directive`.
///
/// A struct without a directive is treated as `#[cod(struct)]`. A tuple
/// struct with exactly one field is an alias of that field's type.
///
/// # Errors
///
/// Generic items, enums without `#[cod(def)]`, Rust unions, directives on
/// the wrong item kind and every error of the field builder are rejected.
pub fn build_struct_data(
    input: &DeriveInput,
    directive: Directive,
) -> syn::Result<StructData> {
    if let Some(param) = input.generics.params.first() {
        return Err(syn::Error::new_spanned(
            param,
            "generic parameters are not supported on `Cod` types",
        ));
    }

    let name = input.ident.clone();

    match &input.data {
        Data::Struct(data) => match directive {
            Directive::UnionDef => Err(syn::Error::new_spanned(
                &input.ident,
                "`#[cod(def)]` must be placed on an enum",
            )),
            Directive::Union(def) => {
                build_union_holder(name, def, &data.fields)
            }
            Directive::None | Directive::Struct => {
                build_record(name, &data.fields)
            }
        },

        Data::Enum(data) => match directive {
            Directive::UnionDef => Ok(StructData {
                fields: union::resolve(&name, &data.variants)?,
                name,
                directive: Directive::UnionDef,
            }),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                "enums can only derive `Cod` as union definitions; add \
                 `#[cod(def)]`",
            )),
        },

        Data::Union(data) => Err(syn::Error::new_spanned(
            data.union_token,
            "Rust unions cannot derive `Cod`; use `#[cod(union = ...)]` on a \
             holder struct",
        )),
    }
}

#[cfg(test)]
mod test;
