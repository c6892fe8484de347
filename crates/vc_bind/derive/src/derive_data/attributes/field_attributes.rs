use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use super::{LayerAttributes, bind_attributes};
use crate::utils::set_once;

const SKIP: &str = "skip";
const PARENT: &str = "parent";
const RENAME: &str = "rename";

/// Attributes on a struct field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub layer: LayerAttributes,
    /// The field carries the `TRANSIENT` modifier.
    pub skip: Option<Span>,
    /// The field holds the ancestor part of the type.
    pub parent: Option<Span>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in bind_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(SKIP) {
                    set_once(&mut this.skip, meta.path.span(), &meta)
                } else if meta.path.is_ident(PARENT) {
                    set_once(&mut this.parent, meta.path.span(), &meta)
                } else if this.layer.parse_meta(&meta)? {
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute"))
                }
            })?;
        }
        Ok(this)
    }
}

/// Attributes on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in bind_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(RENAME) {
                    set_once(&mut this.rename, meta.value()?.parse()?, &meta)
                } else {
                    Err(meta.error("unknown variant attribute"))
                }
            })?;
        }
        Ok(this)
    }
}
