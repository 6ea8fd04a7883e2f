//! The Code Generation Engine.
//!
//! Each [`Field`](crate::field::Field) variant knows how to emit its own
//! encode, decode and equality statements for a given *place* expression
//! (`self.tags`, `self.tags[i0]`, `(*value1)`, ...). The item-level modules
//! stitch those statements into trait implementations.
//!
//! Generated code relies on a handful of fixed local names: `bs` is the
//! buffer, `n` the running decode offset and `other` the right-hand side of
//! an equality. Nested locals carry the depth of the node that binds them.

mod decode;
mod encode;
mod equality;
mod record;
mod union;

use proc_macro2::{Ident, TokenStream};
use quote::format_ident;
use syn::Path;
use tracing::debug;

use crate::{data::StructData, directive::Directive};

/// Explicit state shared by every emit function.
#[derive(Debug, Clone)]
pub struct Context {
    cod: Path,
}

impl Context {
    /// Creates a context emitting paths into the runtime crate at `cod`.
    #[must_use]
    pub const fn new(cod: Path) -> Self { Self { cod } }

    /// Path to the runtime crate.
    #[must_use]
    pub const fn cod(&self) -> &Path { &self.cod }
}

/// The synthetic local `{prefix}{depth}`.
fn local(prefix: &str, depth: usize) -> Ident { format_ident!("{prefix}{depth}") }

/// Emits every implementation `data` asks for.
#[must_use]
pub fn generate(cx: &Context, data: &StructData) -> TokenStream {
    debug!(
        item = %data.name,
        directive = ?data.directive,
        fields = data.fields.len(),
        "generating cod implementation"
    );

    match &data.directive {
        Directive::Union(def) => union::generate_holder(cx, data, def),
        Directive::UnionDef => union::generate_def(cx, data),
        Directive::None | Directive::Struct => record::generate(cx, data),
    }
}
