use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Generics, Ident, WherePredicate, parse_quote};

use super::TypeAttributes;
use crate::path;

/// Data shared by every kind of bindable type.
pub(crate) struct BindMeta<'a> {
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    type_params: Vec<&'a Ident>,
    vc_bind_path: syn::Path,
}

impl<'a> BindMeta<'a> {
    pub(crate) fn new(
        attrs: TypeAttributes,
        ident: &'a Ident,
        generics: &'a Generics,
    ) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Bind` cannot be derived for types with lifetime parameters",
            ));
        }

        let type_params: Vec<&Ident> = generics.type_params().map(|param| &param.ident).collect();

        if let Some(bound) = attrs
            .bounds
            .iter()
            .find(|bound| !type_params.contains(&&bound.param))
        {
            return Err(syn::Error::new(bound.param.span(), "not a type parameter"));
        }

        Ok(Self {
            attrs,
            ident,
            generics,
            type_params,
            vc_bind_path: path::vc_bind(),
        })
    }

    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub(crate) fn vc_bind_path(&self) -> &syn::Path {
        &self.vc_bind_path
    }

    #[inline]
    pub(crate) fn type_params(&self) -> &[&'a Ident] {
        &self.type_params
    }

    /// Whether the type info depends on type arguments.
    #[inline]
    pub(crate) fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// `"module::path::Name"`, evaluated at the derive site.
    pub(crate) fn raw_path(&self) -> TokenStream {
        let name = self.ident.unraw().to_string();
        quote! {
            ::core::concat!(::core::module_path!(), "::", #name)
        }
    }

    /// The generics of the impl blocks.
    ///
    /// Every type parameter gets a `Bind` bound, followed by `extra`.
    pub(crate) fn impl_generics(&self, extra: impl IntoIterator<Item = WherePredicate>) -> Generics {
        let bind_ = path::bind_(&self.vc_bind_path);

        let mut generics = self.generics.clone();
        let where_clause = generics.make_where_clause();
        for param in &self.type_params {
            where_clause.predicates.push(parse_quote!(#param: #bind_));
        }
        where_clause.predicates.extend(extra);
        generics
    }

    /// `Name<T, ..>`, the derived type as written in impl blocks.
    pub(crate) fn self_ty(&self) -> TokenStream {
        let ident = self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote!(#ident #ty_generics)
    }
}
