use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn bind_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::access::Bind
    }
}

#[inline(always)]
pub(crate) fn dyn_bind_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::access::DynBind
    }
}

#[inline(always)]
pub(crate) fn bind_ref_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::access::BindRef
    }
}

#[inline(always)]
pub(crate) fn bind_mut_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::access::BindMut
    }
}

#[inline(always)]
pub(crate) fn object_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::access::Object
    }
}

#[inline(always)]
pub(crate) fn variants_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::access::Variants
    }
}
