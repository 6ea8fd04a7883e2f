//! Per-field tag modifiers: `#[cod(cast = "...")]` and `#[cod(skip = "...")]`.

use syn::LitStr;

use crate::wire::WireType;

/// Which generated procedures a field is left out of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Skip {
    /// Left out of encode and decode.
    pub serdes: bool,
    /// Left out of equality.
    pub equality: bool,
}

/// Modifiers parsed from the `#[cod(...)]` attributes of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagModifiers {
    /// Wire encoding that overrides the declared type's default.
    pub cast: Option<WireType>,
    /// Procedures the field is omitted from.
    pub skip: Skip,
}

impl TagModifiers {
    /// Parses every `#[cod(...)]` attribute in `attrs`.
    ///
    /// # Errors
    ///
    /// Unknown keys, unknown cast types, non-numeric cast targets, unknown
    /// skip capabilities and repeated casts are rejected.
    pub fn from_attributes(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut modifiers = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("cod")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("cast") {
                    let lit: LitStr = meta.value()?.parse()?;

                    if modifiers.cast.is_some() {
                        return Err(meta.error("duplicate `cast` modifier"));
                    }

                    let wire =
                        WireType::from_cast_name(&lit.value()).ok_or_else(
                            || {
                                syn::Error::new_spanned(
                                    &lit,
                                    format!(
                                        "unknown cast type `{}`",
                                        lit.value()
                                    ),
                                )
                            },
                        )?;

                    if !wire.is_numeric() {
                        return Err(syn::Error::new_spanned(
                            &lit,
                            "cast target must be a numeric wire type",
                        ));
                    }

                    modifiers.cast = Some(wire);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    let lit: LitStr = meta.value()?.parse()?;
                    modifiers.skip = parse_skip(&lit, modifiers.skip)?;
                    Ok(())
                } else {
                    Err(meta.error(
                        "unknown cod field attribute, expected `cast` or \
                         `skip`",
                    ))
                }
            })?;
        }

        Ok(modifiers)
    }

    /// Whether the modifiers change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }
}

fn parse_skip(lit: &LitStr, mut skip: Skip) -> syn::Result<Skip> {
    for capability in
        lit.value().split(',').map(str::trim).filter(|c| !c.is_empty())
    {
        match capability {
            "serdes" => skip.serdes = true,
            "equality" => skip.equality = true,
            other => {
                return Err(syn::Error::new_spanned(
                    lit,
                    format!(
                        "unknown skip capability `{other}`, expected \
                         `serdes` or `equality`"
                    ),
                ));
            }
        }
    }

    Ok(skip)
}
