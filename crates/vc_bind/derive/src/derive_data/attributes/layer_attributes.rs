use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{LitBool, LitStr};

use super::parse_flag;
use crate::path;
use crate::utils::set_once;

const RENAME: &str = "rename";
const TRANSIENT: &str = "transient";
const NILLABLE: &str = "nillable";
const DATE_FORMAT: &str = "date_format";
const NUMBER_FORMAT: &str = "number_format";
const CONVERTER: &str = "converter";

/// One customization layer: the attributes shared by types, fields and
/// accessors.
///
/// Becomes a `Customization` value in the generated type information.
#[derive(Default)]
pub(crate) struct LayerAttributes {
    pub rename: Option<LitStr>,
    pub transient: Option<LitBool>,
    pub nillable: Option<LitBool>,
    pub date_format: Option<LitStr>,
    pub number_format: Option<LitStr>,
    pub converter: Option<LitStr>,
}

impl LayerAttributes {
    /// Parses `meta` if it is a layer attribute.
    ///
    /// Returns `false` without consuming anything otherwise.
    pub(crate) fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<bool> {
        let path = &meta.path;
        if path.is_ident(RENAME) {
            set_once(&mut self.rename, meta.value()?.parse()?, meta)?;
        } else if path.is_ident(TRANSIENT) {
            set_once(&mut self.transient, parse_flag(meta)?, meta)?;
        } else if path.is_ident(NILLABLE) {
            set_once(&mut self.nillable, parse_flag(meta)?, meta)?;
        } else if path.is_ident(DATE_FORMAT) {
            set_once(&mut self.date_format, meta.value()?.parse()?, meta)?;
        } else if path.is_ident(NUMBER_FORMAT) {
            set_once(&mut self.number_format, meta.value()?.parse()?, meta)?;
        } else if path.is_ident(CONVERTER) {
            set_once(&mut self.converter, meta.value()?.parse()?, meta)?;
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rename.is_none()
            && self.transient.is_none()
            && self.nillable.is_none()
            && self.date_format.is_none()
            && self.number_format.is_none()
            && self.converter.is_none()
    }

    /// `.with_customization(...)`, or nothing for an empty layer.
    pub(crate) fn with_customization(&self, vc_bind_path: &syn::Path) -> TokenStream {
        if self.is_empty() {
            return crate::utils::empty();
        }

        let customization_ = path::customization_(vc_bind_path);
        let mut tokens = quote!(#customization_::new());
        if let Some(name) = &self.rename {
            tokens.extend(quote!(.with_rename(#name)));
        }
        if let Some(transient) = &self.transient {
            tokens.extend(quote!(.with_transient(#transient)));
        }
        if let Some(nillable) = &self.nillable {
            tokens.extend(quote!(.with_nillable(#nillable)));
        }
        if let Some(format) = &self.date_format {
            tokens.extend(quote!(.with_date_format(#format)));
        }
        if let Some(format) = &self.number_format {
            tokens.extend(quote!(.with_number_format(#format)));
        }
        if let Some(name) = &self.converter {
            tokens.extend(quote!(.with_converter(#name)));
        }

        quote!(.with_customization(#tokens))
    }
}
