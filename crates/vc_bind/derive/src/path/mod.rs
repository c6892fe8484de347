//! Paths of the `vc_bind` items used by the generated code.
//!
//! Keeping them here limits the changes when `vc_bind` is restructured.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `vc_bind` crate.
///
/// 1. For crates that depend on `vc_bind`, `::vc_bind` is returned.
/// 2. For crates that depend on `vc_jsonb`, `::vc_jsonb::bind` is returned.
/// 3. Otherwise `::vc_bind` is returned, which may be incorrect.
///
/// The manifest lookup is not free, so the path is computed once per
/// derive and passed around.
pub(crate) fn vc_bind() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_bind"))
}

// -----------------------------------------------------------------------------
// Modules

mod access;
mod info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use access::*;
pub(crate) use info::*;

#[inline(always)]
pub(crate) fn macro_exports_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn type_registry_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::registry::TypeRegistry
    }
}

#[inline(always)]
pub(crate) fn bind_error_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::error::BindError
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! {
        ::core::result::Result
    }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! {
        ::core::default::Default
    }
}
