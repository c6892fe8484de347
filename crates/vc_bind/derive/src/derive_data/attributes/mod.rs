//! Parsing of `#[bind(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod layer_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{FieldAttributes, VariantAttributes};
pub(crate) use layer_attributes::LayerAttributes;
pub(crate) use type_attributes::{AccessorAttribute, CreatorAttribute, TypeAttributes};

use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitBool, Token};

/// The `#[bind(...)]` attributes among `attrs`.
fn bind_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(crate::BIND_ATTRIBUTE_NAME))
}

/// Parses `name` or `name = true|false`.
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<LitBool> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse()
    } else {
        Ok(LitBool::new(true, meta.path.span()))
    }
}
