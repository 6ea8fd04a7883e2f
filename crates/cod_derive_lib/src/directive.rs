//! Item-level `#[cod(...)]` attributes: the generation directive and the
//! runtime crate path.

use syn::{LitStr, Path};

/// The generation mode requested for a declared item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// No directive was written; structs default to [`Directive::Struct`].
    None,
    /// `#[cod(struct)]`: encode, decode and equality for a record.
    Struct,
    /// `#[cod(union = Def)]`: a union holder over the definition `Def`.
    Union(Path),
    /// `#[cod(def)]`: the closed member set of a union.
    UnionDef,
}

/// Everything the item-level attributes configure.
#[derive(Debug, Clone)]
pub struct ItemOptions {
    /// The requested directive.
    pub directive: Directive,
    /// Path to the runtime crate, `::cod` when not overridden.
    pub crate_path: Option<Path>,
}

impl ItemOptions {
    /// Parses every `#[cod(...)]` attribute on the item.
    ///
    /// # Errors
    ///
    /// Unknown keys and conflicting directives are rejected.
    pub fn from_attributes(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut directive = Directive::None;
        let mut crate_path = None;

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("cod")) {
            attr.parse_nested_meta(|meta| {
                let parsed = if meta.path.is_ident("struct") {
                    Directive::Struct
                } else if meta.path.is_ident("def") {
                    Directive::UnionDef
                } else if meta.path.is_ident("union") {
                    let value = meta.value()?;
                    let def = if value.peek(LitStr) {
                        value.parse::<LitStr>()?.parse::<Path>()?
                    } else {
                        value.parse::<Path>()?
                    };

                    Directive::Union(def)
                } else if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    crate_path = Some(lit.parse::<Path>()?);

                    return Ok(());
                } else {
                    return Err(meta.error(
                        "unknown cod item attribute, expected `struct`, \
                         `union`, `def` or `crate`",
                    ));
                };

                if directive != Directive::None {
                    return Err(meta.error("conflicting cod directives"));
                }
                directive = parsed;

                Ok(())
            })?;
        }

        Ok(Self { directive, crate_path })
    }

    /// The runtime crate path to use in generated code.
    #[must_use]
    pub fn crate_path(&self) -> Path {
        self.crate_path.clone().unwrap_or_else(|| syn::parse_quote!(::cod))
    }
}
