use quote::quote_spanned;

use crate::derive_data::BindMeta;

/// Generate the `auto_register` submission.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(meta: &BindMeta) -> proc_macro2::TokenStream {
    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    // No single instantiation to register.
    if meta.is_generic() {
        return crate::utils::empty();
    }

    let vc_bind_path = meta.vc_bind_path();
    let auto_register_ = crate::path::auto_register_(vc_bind_path);
    let type_registry_ = crate::path::type_registry_(vc_bind_path);
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::AutoRegistration(#type_registry_::register::<#ident>)
        }
    }
}

/// Generate the `auto_register` submission.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(_: &BindMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
