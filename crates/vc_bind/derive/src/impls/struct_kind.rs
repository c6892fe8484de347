use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Type, WherePredicate, parse_quote};

use super::common_impls::{impl_dyn_bind, type_info_body};
use crate::derive_data::{AccessorAttribute, BindMeta, BindStruct, CreatorAttribute, StructField};
use crate::path;
use crate::utils::empty;

pub(crate) fn impl_struct(data: &BindStruct) -> TokenStream {
    let meta = data.meta();
    let vc_bind_path = meta.vc_bind_path();
    let bind_ = path::bind_(vc_bind_path);
    let type_info_ = path::type_info_(vc_bind_path);
    let type_registry_ = path::type_registry_(vc_bind_path);

    let has_default = meta.attrs().no_default.is_none();

    // `with_default::<Self>()` needs `Self: Default` for every instantiation.
    let mut extra: Vec<WherePredicate> = Vec::new();
    if has_default && meta.is_generic() {
        let self_ty = meta.self_ty();
        let default_ = path::default_();
        extra.push(parse_quote!(#self_ty: #default_));
    }
    let generics = meta.impl_generics(extra);
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let self_ty = meta.self_ty();

    let info = object_info(data, has_default);
    let type_info_body = type_info_body(meta, info);
    let register_dependencies = register_dependencies(data, &type_registry_);

    let dyn_bind = impl_dyn_bind(meta, &generics, quote!(Object), quote!(Object));
    let object = impl_object(data, &generics);

    quote! {
        impl #impl_generics #bind_ for #self_ty #where_clause {
            fn type_info() -> &'static #type_info_ {
                #type_info_body
            }

            #register_dependencies
        }

        #dyn_bind

        #object
    }
}

// -----------------------------------------------------------------------------
// Type Info

fn object_info(data: &BindStruct, has_default: bool) -> TokenStream {
    let meta = data.meta();
    let attrs = meta.attrs();
    let vc_bind_path = meta.vc_bind_path();
    let type_info_ = path::type_info_(vc_bind_path);
    let object_info_ = path::object_info_(vc_bind_path);
    let field_info_ = path::field_info_(vc_bind_path);
    let accessor_info_ = path::accessor_info_(vc_bind_path);
    let creator_info_ = path::creator_info_(vc_bind_path);

    let raw_path = meta.raw_path();

    let fields = data.fields().iter().map(|field| field_info(meta, field));
    let field_count = data.fields().len();

    let getters = attrs
        .getters
        .iter()
        .enumerate()
        .map(|(index, getter)| accessor_info(meta, getter, index, quote!(getter)));
    let setters = attrs
        .setters
        .iter()
        .enumerate()
        .map(|(index, setter)| accessor_info(meta, setter, index, quote!(setter)));
    let accessor_count = attrs.getters.len() + attrs.setters.len();
    let with_accessors = if accessor_count == 0 {
        empty()
    } else {
        quote!(.with_accessors([#(#getters,)* #(#setters,)*] as [#accessor_info_; #accessor_count]))
    };

    let with_creators = if attrs.creators.is_empty() {
        empty()
    } else {
        let creators = attrs.creators.iter().map(|creator| creator_info(meta, creator));
        let count = attrs.creators.len();
        quote!(.with_creators([#(#creators),*] as [#creator_info_; #count]))
    };

    let with_order = match &attrs.order {
        Some(order) => {
            let count = order.len();
            quote!(.with_order([#(#order),*] as [&'static str; #count]))
        }
        None => empty(),
    };

    let with_default = if has_default {
        quote!(.with_default::<Self>())
    } else {
        empty()
    };

    let with_customization = attrs.layer.with_customization(vc_bind_path);
    let with_generics = generics_info(meta);

    quote! {
        #type_info_::Object(
            #object_info_::new::<Self>(#raw_path, [#(#fields),*] as [#field_info_; #field_count])
                #with_accessors
                #with_creators
                #with_order
                #with_default
                #with_customization
                #with_generics
        )
    }
}

fn field_info(meta: &BindMeta, field: &StructField) -> TokenStream {
    let vc_bind_path = meta.vc_bind_path();
    let field_info_ = path::field_info_(vc_bind_path);
    let modifiers_ = path::modifiers_(vc_bind_path);

    let ty = field.ty;
    let name = field.name();
    let index = field.index;

    let with_declared = if meta.mentions_param(ty) {
        let expr = meta.type_expr(ty);
        quote!(.with_declared(#expr))
    } else {
        empty()
    };
    let with_modifiers = match (field.public, field.attrs.skip.is_some()) {
        (false, false) => empty(),
        (true, false) => quote!(.with_modifiers(#modifiers_::PUBLIC)),
        (false, true) => quote!(.with_modifiers(#modifiers_::TRANSIENT)),
        (true, true) => quote!(.with_modifiers(#modifiers_::PUBLIC.union(#modifiers_::TRANSIENT))),
    };
    let with_customization = field.attrs.layer.with_customization(vc_bind_path);
    let as_parent = if field.attrs.parent.is_some() {
        quote!(.as_parent())
    } else {
        empty()
    };

    quote! {
        #field_info_::new::<#ty>(#name, #index)
            #with_declared
            #with_modifiers
            #with_customization
            #as_parent
    }
}

fn accessor_info(
    meta: &BindMeta,
    accessor: &AccessorAttribute,
    index: usize,
    kind: TokenStream,
) -> TokenStream {
    let vc_bind_path = meta.vc_bind_path();
    let accessor_info_ = path::accessor_info_(vc_bind_path);

    let name = &accessor.name;
    let with = &accessor.with;
    let with_customization = accessor.layer.with_customization(vc_bind_path);

    quote! {
        #accessor_info_::#kind::<Self, _>(#name, #index, #with)
            #with_customization
    }
}

fn creator_info(meta: &BindMeta, creator: &CreatorAttribute) -> TokenStream {
    let vc_bind_path = meta.vc_bind_path();
    let creator_info_ = path::creator_info_(vc_bind_path);
    let creator_param_ = path::creator_param_(vc_bind_path);
    let dyn_bind_ = path::dyn_bind_(vc_bind_path);
    let macro_exports_ = path::macro_exports_(vc_bind_path);
    let result_ = path::result_();

    let params = creator.params.iter().map(|param| {
        let ty = &param.ty;
        match &param.name {
            Some(name) => quote!(#creator_param_::named::<#ty>(#name)),
            None => quote!(#creator_param_::unnamed::<#ty>()),
        }
    });
    let count = creator.params.len();

    let args = creator.params.iter().enumerate().map(|(index, param)| {
        let ty = &param.ty;
        quote!(args.take::<#ty>(#index)?)
    });

    let with = &creator.with;
    let call = if creator.fallible {
        quote!(#with(#(#args),*).map_err(#macro_exports_::creator_failed::<Self, _>)?)
    } else {
        quote!(#with(#(#args),*))
    };

    let args_pat = if count == 0 {
        quote!(_args)
    } else {
        quote!(mut args)
    };

    let designated = if creator.designated {
        quote!(.designated())
    } else {
        empty()
    };

    quote! {
        #creator_info_::new(
            [#(#params),*] as [#creator_param_; #count],
            |#args_pat| {
                let value: Self = #call;
                #result_::Ok(#macro_exports_::Box::new(value) as #macro_exports_::Box<dyn #dyn_bind_>)
            },
        )
        #designated
    }
}

fn generics_info(meta: &BindMeta) -> TokenStream {
    if !meta.is_generic() {
        return empty();
    }

    let generic_param_ = path::generic_param_(meta.vc_bind_path());

    let params = meta.type_params().iter().map(|param| {
        let name = param.to_string();
        let with_bound = meta
            .attrs()
            .bounds
            .iter()
            .find(|bound| bound.param == **param)
            .map(|bound| {
                let expr = meta.type_expr(&bound.ty);
                quote!(.with_bound(#expr))
            })
            .unwrap_or_default();
        quote!(#generic_param_::new::<#param>(#name) #with_bound)
    });

    quote!(.with_generics([#(#params),*].into()))
}

fn register_dependencies(data: &BindStruct, type_registry_: &TokenStream) -> TokenStream {
    let mut seen: Vec<String> = Vec::new();
    let mut types: Vec<&Type> = Vec::new();
    let attrs = data.meta().attrs();
    let creator_params = attrs
        .creators
        .iter()
        .flat_map(|creator| creator.params.iter().map(|param| &param.ty));
    // Bounds are the decode targets of dynamic arguments.
    let bounds = attrs.bounds.iter().map(|bound| &bound.ty);
    for ty in data
        .fields()
        .iter()
        .map(|field| field.ty)
        .chain(creator_params)
        .chain(bounds)
    {
        let key = ty.to_token_stream().to_string();
        if !seen.contains(&key) {
            seen.push(key);
            types.push(ty);
        }
    }

    if types.is_empty() {
        return empty();
    }

    quote! {
        fn register_dependencies(registry: &mut #type_registry_) {
            #(registry.register::<#types>();)*
        }
    }
}

// -----------------------------------------------------------------------------
// Object

fn impl_object(data: &BindStruct, generics: &syn::Generics) -> TokenStream {
    let meta = data.meta();
    let vc_bind_path = meta.vc_bind_path();
    let bind_ = path::bind_(vc_bind_path);
    let object_ = path::object_(vc_bind_path);
    let dyn_bind_ = path::dyn_bind_(vc_bind_path);
    let bind_error_ = path::bind_error_(vc_bind_path);
    let macro_exports_ = path::macro_exports_(vc_bind_path);
    let option_ = path::option_();
    let result_ = path::result_();

    let self_ty = meta.self_ty();
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let indices: Vec<usize> = data.fields().iter().map(|field| field.index).collect();
    let idents: Vec<_> = data.fields().iter().map(|field| field.ident).collect();

    let getter_indices = 0..meta.attrs().getters.len();
    let getter_paths = meta.attrs().getters.iter().map(|getter| &getter.with);
    let setter_indices = 0..meta.attrs().setters.len();
    let setter_paths = meta.attrs().setters.iter().map(|setter| &setter.with);

    let no_member = quote! {
        #macro_exports_::no_member(<Self as #bind_>::type_info().type_path(), index)
    };

    quote! {
        impl #impl_generics #object_ for #self_ty #where_clause {
            fn field_at(&self, index: usize) -> #option_<&dyn #dyn_bind_> {
                match index {
                    #(#indices => #option_::Some(&self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #dyn_bind_> {
                match index {
                    #(#indices => #option_::Some(&mut self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn set_field_at(
                &mut self,
                index: usize,
                value: #macro_exports_::Box<dyn #dyn_bind_>,
            ) -> #result_<(), #bind_error_> {
                match index {
                    #(#indices => #macro_exports_::set_field(&mut self.#idents, value),)*
                    _ => #result_::Err(#no_member),
                }
            }

            fn call_getter(&self, index: usize) -> #option_<#macro_exports_::Box<dyn #dyn_bind_>> {
                match index {
                    #(#getter_indices => #option_::Some(#macro_exports_::invoke_getter(self, #getter_paths)),)*
                    _ => #option_::None,
                }
            }

            fn call_setter(
                &mut self,
                index: usize,
                value: #macro_exports_::Box<dyn #dyn_bind_>,
            ) -> #result_<(), #bind_error_> {
                match index {
                    #(#setter_indices => #macro_exports_::invoke_setter(self, value, #setter_paths),)*
                    _ => {
                        let _ = value;
                        #result_::Err(#no_member)
                    }
                }
            }
        }
    }
}
