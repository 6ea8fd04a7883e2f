//! The Field Model: a closed, recursive description of a type's shape.
//!
//! Every node knows its declared Rust type, the display name it is reported
//! under, and the tag modifiers it inherited from its record field. Container
//! nodes also record their nesting depth, which the generator turns into
//! collision-free local names (`i0`, `value1`, `key2`, ...).

use quote::ToTokens;
use syn::{Ident, Type};

use crate::{tag::TagModifiers, wire::WireType};

/// One node of the shape tree.
#[derive(Debug, Clone)]
pub enum Field {
    /// A primitive leaf or a delegate to a nested `cod` type.
    Basic(BasicField),
    /// `[T; N]`.
    Array(ArrayField),
    /// `Vec<T>`.
    Slice(SliceField),
    /// `HashMap<K, V>` or `BTreeMap<K, V>`.
    Map(MapField),
    /// `Option<T>`: present or absent.
    Pointer(PointerField),
    /// A newtype over another shape.
    Alias(AliasField),
    /// A member of a union definition together with its tag.
    Union(UnionField),
}

/// A leaf: either a primitive found in the wire table or a delegate.
#[derive(Debug, Clone)]
pub struct BasicField {
    /// Display name used in diagnostics.
    pub name: String,
    /// The declared type.
    pub ty: Type,
    /// Default encoding of the declared type; `None` for delegates.
    pub wire: Option<WireType>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

/// A fixed-size array.
#[derive(Debug, Clone)]
pub struct ArrayField {
    /// Display name used in diagnostics.
    pub name: String,
    /// The declared array type.
    pub ty: Type,
    /// Nesting depth of the element loop.
    pub depth: usize,
    /// The element shape.
    pub inner: Box<Field>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

/// A length-prefixed dynamic sequence.
#[derive(Debug, Clone)]
pub struct SliceField {
    /// Display name used in diagnostics.
    pub name: String,
    /// The declared sequence type.
    pub ty: Type,
    /// Nesting depth of the element loop.
    pub depth: usize,
    /// The element shape.
    pub inner: Box<Field>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

/// A count-prefixed associative map.
#[derive(Debug, Clone)]
pub struct MapField {
    /// Display name used in diagnostics.
    pub name: String,
    /// The declared map type.
    pub ty: Type,
    /// Nesting depth of the entry loop.
    pub depth: usize,
    /// The key shape.
    pub key: Box<Field>,
    /// The value shape.
    pub value: Box<Field>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

/// A presence-prefixed optional value.
#[derive(Debug, Clone)]
pub struct PointerField {
    /// Display name used in diagnostics.
    pub name: String,
    /// The declared `Option` type.
    pub ty: Type,
    /// Nesting depth of the bound value.
    pub depth: usize,
    /// The shape of the present value.
    pub inner: Box<Field>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

/// A named type whose representation is a single other type.
#[derive(Debug, Clone)]
pub struct AliasField {
    /// Display name used in diagnostics.
    pub name: String,
    /// The alias's own name.
    pub alias: Ident,
    /// Nesting depth of the unwrapped value.
    pub depth: usize,
    /// The underlying shape.
    pub inner: Box<Field>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

/// A union member with its assigned wire tag.
#[derive(Debug, Clone)]
pub struct UnionField {
    /// Display name used in diagnostics.
    pub name: String,
    /// Wire tag, `1..=255`.
    pub tag: u8,
    /// Nesting depth of the bound member value.
    pub depth: usize,
    /// The member shape.
    pub inner: Box<Field>,
    /// Inherited tag modifiers.
    pub modifiers: TagModifiers,
}

impl BasicField {
    /// The encoding actually written: the cast if present, otherwise the
    /// declared type's default.
    #[must_use]
    pub fn encoded_wire_type(&self) -> Option<WireType> {
        self.modifiers.cast.or(self.wire)
    }

    /// Whether this is a plain, uncast `u8`.
    #[must_use]
    pub fn is_byte(&self) -> bool {
        self.wire == Some(WireType::U8) && self.modifiers.cast.is_none()
    }
}

impl Field {
    /// The display name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Basic(f) => &f.name,
            Self::Array(f) => &f.name,
            Self::Slice(f) => &f.name,
            Self::Map(f) => &f.name,
            Self::Pointer(f) => &f.name,
            Self::Alias(f) => &f.name,
            Self::Union(f) => &f.name,
        }
    }

    /// Renames this node and re-derives the names of every nested node.
    pub fn set_name(&mut self, name: String) {
        match self {
            Self::Basic(f) => f.name = name,
            Self::Array(f) => {
                f.inner.set_name(format!("{name}[i{}]", f.depth));
                f.name = name;
            }
            Self::Slice(f) => {
                f.inner.set_name(format!("{name}[i{}]", f.depth));
                f.name = name;
            }
            Self::Map(f) => {
                f.key.set_name(format!("{name}.key{}", f.depth));
                f.value.set_name(format!("{name}[key{}]", f.depth));
                f.name = name;
            }
            Self::Pointer(f) => {
                f.inner.set_name(format!("*{name}"));
                f.name = name;
            }
            Self::Alias(f) => {
                f.inner.set_name(format!("{name}.0"));
                f.name = name;
            }
            Self::Union(f) => {
                f.inner.set_name(name.clone());
                f.name = name;
            }
        }
    }

    /// Whether every encoding of this shape takes at least one byte.
    ///
    /// Delegates and arrays may encode to nothing, so they answer `false`.
    #[must_use]
    pub fn never_empty(&self) -> bool {
        match self {
            Self::Basic(f) => f.encoded_wire_type().is_some(),
            Self::Slice(_) | Self::Map(_) | Self::Pointer(_) => true,
            Self::Array(_) => false,
            Self::Alias(f) => f.inner.never_empty(),
            Self::Union(f) => f.inner.never_empty(),
        }
    }

    /// The declared Rust type of values of this shape.
    ///
    /// For aliases this is the alias itself; for union members it is the
    /// member type.
    #[must_use]
    pub fn ty(&self) -> Type {
        match self {
            Self::Basic(f) => f.ty.clone(),
            Self::Array(f) => f.ty.clone(),
            Self::Slice(f) => f.ty.clone(),
            Self::Map(f) => f.ty.clone(),
            Self::Pointer(f) => f.ty.clone(),
            Self::Alias(f) => {
                let alias = &f.alias;
                syn::parse_quote!(#alias)
            }
            Self::Union(f) => f.inner.ty(),
        }
    }

    /// The declared type rendered as source text, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.ty().to_token_stream().to_string()
    }

    /// The tag modifiers in effect for this node.
    #[must_use]
    pub const fn modifiers(&self) -> &TagModifiers {
        match self {
            Self::Basic(f) => &f.modifiers,
            Self::Array(f) => &f.modifiers,
            Self::Slice(f) => &f.modifiers,
            Self::Map(f) => &f.modifiers,
            Self::Pointer(f) => &f.modifiers,
            Self::Alias(f) => &f.modifiers,
            Self::Union(f) => &f.modifiers,
        }
    }

    /// Applies `modifiers` to this node and every nested node.
    pub fn set_modifiers(&mut self, modifiers: TagModifiers) {
        match self {
            Self::Basic(f) => f.modifiers = modifiers,
            Self::Array(f) => {
                f.inner.set_modifiers(modifiers);
                f.modifiers = modifiers;
            }
            Self::Slice(f) => {
                f.inner.set_modifiers(modifiers);
                f.modifiers = modifiers;
            }
            Self::Map(f) => {
                f.key.set_modifiers(modifiers);
                f.value.set_modifiers(modifiers);
                f.modifiers = modifiers;
            }
            Self::Pointer(f) => {
                f.inner.set_modifiers(modifiers);
                f.modifiers = modifiers;
            }
            Self::Alias(f) => {
                f.inner.set_modifiers(modifiers);
                f.modifiers = modifiers;
            }
            Self::Union(f) => {
                f.inner.set_modifiers(modifiers);
                f.modifiers = modifiers;
            }
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic(f) if f.wire.is_some() => "primitive",
            Self::Basic(_) => "delegate",
            Self::Array(_) => "array",
            Self::Slice(_) => "slice",
            Self::Map(_) => "map",
            Self::Pointer(_) => "pointer",
            Self::Alias(_) => "alias",
            Self::Union(_) => "union member",
        }
    }
}
