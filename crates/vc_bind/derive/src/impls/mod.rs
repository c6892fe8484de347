//! Code generation.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod common_impls;
mod enum_kind;
mod struct_kind;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::BindDerive;

pub(crate) fn match_bind_impls(ast: DeriveInput) -> TokenStream {
    let derive = match BindDerive::from_input(&ast) {
        Ok(derive) => derive,
        Err(err) => return err.into_compile_error(),
    };

    let (bind_impls, meta) = match &derive {
        BindDerive::Struct(data) => (struct_kind::impl_struct(data), data.meta()),
        BindDerive::Enum(data) => (enum_kind::impl_enum(data), data.meta()),
    };
    let auto_register = auto_register::impl_auto_register(meta);

    quote! {
        const _: () = {
            #bind_impls

            #auto_register
        };
    }
}
