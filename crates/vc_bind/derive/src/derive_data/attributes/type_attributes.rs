use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, ExprPath, Ident, LitStr, Token, Type, parenthesized};

use super::{LayerAttributes, bind_attributes};
use crate::utils::set_once;

const ORDER: &str = "order";
const BOUND: &str = "bound";
const GETTER: &str = "getter";
const SETTER: &str = "setter";
const CREATOR: &str = "creator";
const NO_DEFAULT: &str = "no_default";
const AUTO_REGISTER: &str = "auto_register";

const NAME: &str = "name";
const WITH: &str = "with";
const PARAMS: &str = "params";
const DESIGNATED: &str = "designated";
const FALLIBLE: &str = "fallible";

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Only `nillable` and the formats are accepted at type level.
    pub layer: LayerAttributes,
    pub order: Option<Vec<LitStr>>,
    pub bounds: Vec<BoundAttribute>,
    pub getters: Vec<AccessorAttribute>,
    pub setters: Vec<AccessorAttribute>,
    pub creators: Vec<CreatorAttribute>,
    pub no_default: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in bind_attributes(attrs) {
            attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
        }

        let layer = &this.layer;
        let misplaced = [
            layer.rename.as_ref().map(Spanned::span),
            layer.transient.as_ref().map(Spanned::span),
            layer.converter.as_ref().map(Spanned::span),
        ];
        if let Some(span) = misplaced.into_iter().flatten().next() {
            return Err(syn::Error::new(span, "only allowed on fields and accessors"));
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        if path.is_ident(ORDER) {
            let content;
            parenthesized!(content in meta.input);
            let names = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            set_once(&mut self.order, names.into_iter().collect(), meta)?;
        } else if path.is_ident(BOUND) {
            let content;
            parenthesized!(content in meta.input);
            let bounds = Punctuated::<BoundAttribute, Token![,]>::parse_terminated(&content)?;
            self.bounds.extend(bounds);
        } else if path.is_ident(GETTER) {
            self.getters.push(AccessorAttribute::parse_meta(meta)?);
        } else if path.is_ident(SETTER) {
            self.setters.push(AccessorAttribute::parse_meta(meta)?);
        } else if path.is_ident(CREATOR) {
            self.creators.push(CreatorAttribute::parse_meta(meta)?);
        } else if path.is_ident(NO_DEFAULT) {
            set_once(&mut self.no_default, path.span(), meta)?;
        } else if path.is_ident(AUTO_REGISTER) {
            set_once(&mut self.auto_register, path.span(), meta)?;
        } else if !self.layer.parse_meta(meta)? {
            return Err(meta.error("unknown type attribute"));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BoundAttribute

/// `T = Shape` inside `bound(...)`.
pub(crate) struct BoundAttribute {
    pub param: Ident,
    pub ty: Type,
}

impl Parse for BoundAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let param = input.parse()?;
        input.parse::<Token![=]>()?;
        let ty = input.parse()?;
        Ok(Self { param, ty })
    }
}

// -----------------------------------------------------------------------------
// AccessorAttribute

/// `getter(name = "...", with = path, ..layer)` or the same for `setter`.
pub(crate) struct AccessorAttribute {
    pub name: LitStr,
    pub with: ExprPath,
    pub layer: LayerAttributes,
}

impl AccessorAttribute {
    fn parse_meta(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut with: Option<ExprPath> = None;
        let mut layer = LayerAttributes::default();

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident(NAME) {
                set_once(&mut name, inner.value()?.parse()?, &inner)
            } else if inner.path.is_ident(WITH) {
                set_once(&mut with, inner.value()?.parse()?, &inner)
            } else if layer.parse_meta(&inner)? {
                Ok(())
            } else {
                Err(inner.error("unknown accessor attribute"))
            }
        })?;

        let name = name.ok_or_else(|| meta.error("missing `name = \"...\"`"))?;
        let with = with.ok_or_else(|| meta.error("missing `with = path`"))?;
        Ok(Self { name, with, layer })
    }
}

// -----------------------------------------------------------------------------
// CreatorAttribute

/// `creator(with = path, params(...), designated, fallible)`.
pub(crate) struct CreatorAttribute {
    pub with: ExprPath,
    pub params: Vec<CreatorParamAttribute>,
    pub designated: bool,
    pub fallible: bool,
}

impl CreatorAttribute {
    fn parse_meta(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut with: Option<ExprPath> = None;
        let mut params: Option<Vec<CreatorParamAttribute>> = None;
        let mut designated: Option<Span> = None;
        let mut fallible: Option<Span> = None;

        meta.parse_nested_meta(|inner| {
            let path = &inner.path;
            if path.is_ident(WITH) {
                set_once(&mut with, inner.value()?.parse()?, &inner)
            } else if path.is_ident(PARAMS) {
                let content;
                parenthesized!(content in inner.input);
                let list = Punctuated::<CreatorParamAttribute, Token![,]>::parse_terminated(&content)?;
                set_once(&mut params, list.into_iter().collect(), &inner)
            } else if path.is_ident(DESIGNATED) {
                set_once(&mut designated, path.span(), &inner)
            } else if path.is_ident(FALLIBLE) {
                set_once(&mut fallible, path.span(), &inner)
            } else {
                Err(inner.error("unknown creator attribute"))
            }
        })?;

        Ok(Self {
            with: with.ok_or_else(|| meta.error("missing `with = path`"))?,
            params: params.ok_or_else(|| meta.error("missing `params(...)`"))?,
            designated: designated.is_some(),
            fallible: fallible.is_some(),
        })
    }
}

/// `"key": Type` or `_: Type` inside `params(...)`.
pub(crate) struct CreatorParamAttribute {
    pub name: Option<LitStr>,
    pub ty: Type,
}

impl Parse for CreatorParamAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = if input.peek(Token![_]) {
            input.parse::<Token![_]>()?;
            None
        } else {
            Some(input.parse()?)
        };
        input.parse::<Token![:]>()?;
        let ty = input.parse()?;
        Ok(Self { name, ty })
    }
}
