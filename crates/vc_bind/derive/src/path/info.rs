use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Cells

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::cell::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::cell::GenericTypeInfoCell
    }
}

// -----------------------------------------------------------------------------
// Info

#[inline(always)]
pub(crate) fn type_info_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn object_info_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::ObjectInfo
    }
}

#[inline(always)]
pub(crate) fn enum_info_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn field_info_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::FieldInfo
    }
}

#[inline(always)]
pub(crate) fn accessor_info_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::AccessorInfo
    }
}

#[inline(always)]
pub(crate) fn creator_info_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::CreatorInfo
    }
}

#[inline(always)]
pub(crate) fn creator_param_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::CreatorParam
    }
}

#[inline(always)]
pub(crate) fn generic_param_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::GenericParam
    }
}

#[inline(always)]
pub(crate) fn type_expr_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::TypeExpr
    }
}

#[inline(always)]
pub(crate) fn modifiers_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::Modifiers
    }
}

#[inline(always)]
pub(crate) fn customization_(vc_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_bind_path::info::Customization
    }
}
