use proc_macro2::TokenStream;
use quote::quote;
use syn::Generics;

use crate::derive_data::BindMeta;
use crate::path;

/// The body of `Bind::type_info`, caching the info built by `info`.
pub(crate) fn type_info_body(meta: &BindMeta, info: TokenStream) -> TokenStream {
    let vc_bind_path = meta.vc_bind_path();

    if meta.is_generic() {
        let cell_ = path::generic_type_info_cell_(vc_bind_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| { #info })
        }
    } else {
        let cell_ = path::non_generic_type_info_cell_(vc_bind_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| { #info })
        }
    }
}

/// `impl DynBind`, with `bind_ref` and `bind_mut` returning the given views.
pub(crate) fn impl_dyn_bind(
    meta: &BindMeta,
    generics: &Generics,
    bind_ref: TokenStream,
    bind_mut: TokenStream,
) -> TokenStream {
    let vc_bind_path = meta.vc_bind_path();
    let bind_ = path::bind_(vc_bind_path);
    let dyn_bind_ = path::dyn_bind_(vc_bind_path);
    let bind_ref_ = path::bind_ref_(vc_bind_path);
    let bind_mut_ = path::bind_mut_(vc_bind_path);
    let type_info_ = path::type_info_(vc_bind_path);

    let self_ty = meta.self_ty();
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #dyn_bind_ for #self_ty #where_clause {
            #[inline]
            fn dyn_type_info(&self) -> &'static #type_info_ {
                <Self as #bind_>::type_info()
            }

            #[inline]
            fn bind_ref(&self) -> #bind_ref_<'_> {
                #bind_ref_::#bind_ref(self)
            }

            #[inline]
            fn bind_mut(&mut self) -> #bind_mut_<'_> {
                #bind_mut_::#bind_mut(self)
            }
        }
    }
}
