use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Fields, Ident, Token, Variant};

use super::{BindMeta, VariantAttributes};

/// An enum whose variants are all unit variants.
pub(crate) struct BindEnum<'a> {
    meta: BindMeta<'a>,
    variants: Vec<EnumVariant<'a>>,
}

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    /// The JSON name.
    pub name: String,
}

impl<'a> BindEnum<'a> {
    pub(crate) fn new(
        meta: BindMeta<'a>,
        variants: &'a Punctuated<Variant, Token![,]>,
    ) -> syn::Result<Self> {
        if meta.is_generic() {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Bind` cannot be derived for generic enums",
            ));
        }

        let variants = variants
            .iter()
            .map(|variant| {
                if !matches!(variant.fields, Fields::Unit) {
                    return Err(syn::Error::new(
                        variant.fields.span(),
                        "`Bind` supports unit variants only",
                    ));
                }
                let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
                Ok(EnumVariant {
                    ident: &variant.ident,
                    name: attrs
                        .rename
                        .map_or_else(|| variant.ident.unraw().to_string(), |name| name.value()),
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { meta, variants })
    }

    #[inline]
    pub(crate) fn meta(&self) -> &BindMeta<'a> {
        &self.meta
    }

    #[inline]
    pub(crate) fn variants(&self) -> &[EnumVariant<'a>] {
        &self.variants
    }
}
