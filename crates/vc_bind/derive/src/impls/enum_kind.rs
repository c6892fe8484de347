use proc_macro2::TokenStream;
use quote::quote;

use super::common_impls::{impl_dyn_bind, type_info_body};
use crate::derive_data::BindEnum;
use crate::path;

pub(crate) fn impl_enum(data: &BindEnum) -> TokenStream {
    let meta = data.meta();
    let vc_bind_path = meta.vc_bind_path();
    let bind_ = path::bind_(vc_bind_path);
    let variants_ = path::variants_(vc_bind_path);
    let type_info_ = path::type_info_(vc_bind_path);
    let enum_info_ = path::enum_info_(vc_bind_path);
    let dyn_bind_ = path::dyn_bind_(vc_bind_path);
    let macro_exports_ = path::macro_exports_(vc_bind_path);
    let option_ = path::option_();

    let generics = meta.impl_generics([]);
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let self_ty = meta.self_ty();

    let raw_path = meta.raw_path();
    let names = data.variants().iter().map(|variant| &variant.name);
    let count = data.variants().len();
    let indices: Vec<usize> = (0..count).collect();
    let idents: Vec<_> = data.variants().iter().map(|variant| variant.ident).collect();

    let info = quote! {
        #type_info_::Enum(#enum_info_::new::<Self>(
            #raw_path,
            [#(#names),*] as [&'static str; #count],
            |index| match index {
                #(#indices => #option_::Some(#macro_exports_::Box::new(Self::#idents) as #macro_exports_::Box<dyn #dyn_bind_>),)*
                _ => #option_::None,
            },
        ))
    };
    let type_info_body = type_info_body(meta, info);

    let dyn_bind = impl_dyn_bind(meta, &generics, quote!(Enum), quote!(Value));

    // An empty enum has no value to match on.
    let variant_index = if count == 0 {
        quote!(match *self {})
    } else {
        quote! {
            match self {
                #(Self::#idents => #indices,)*
            }
        }
    };

    quote! {
        impl #impl_generics #bind_ for #self_ty #where_clause {
            fn type_info() -> &'static #type_info_ {
                #type_info_body
            }
        }

        #dyn_bind

        impl #impl_generics #variants_ for #self_ty #where_clause {
            #[inline]
            fn variant_index(&self) -> usize {
                #variant_index
            }
        }
    }
}
