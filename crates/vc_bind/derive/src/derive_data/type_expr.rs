use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{GenericArgument, PathArguments, Type};

use super::BindMeta;
use crate::path;

impl BindMeta<'_> {
    /// Whether `ty` mentions a type parameter of the derived type.
    pub(crate) fn mentions_param(&self, ty: &Type) -> bool {
        self.is_generic() && mentions(ty.to_token_stream(), self.type_params())
    }

    /// The `TypeExpr` of a member declared as `ty`.
    ///
    /// A bare parameter becomes `TypeExpr::param`. A type mentioning
    /// parameters keeps its instantiation plus the expressions of its
    /// arguments; a slice argument such as `[T]` in `Box<[T]>` stands for its
    /// element.
    pub(crate) fn type_expr(&self, ty: &Type) -> TokenStream {
        let type_expr_ = path::type_expr_(self.vc_bind_path());

        if !self.mentions_param(ty) {
            return quote!(#type_expr_::of::<#ty>());
        }

        match ty {
            Type::Paren(inner) => self.type_expr(&inner.elem),
            Type::Group(inner) => self.type_expr(&inner.elem),
            Type::Slice(inner) => self.type_expr(&inner.elem),
            Type::Array(array) => {
                let elem = self.type_expr(&array.elem);
                quote!(#type_expr_::parameterized::<#ty>([#elem]))
            }
            Type::Path(type_path) if type_path.qself.is_none() => {
                if let Some(ident) = type_path.path.get_ident()
                    && self.type_params().contains(&ident)
                {
                    let name = ident.to_string();
                    return quote!(#type_expr_::param(#name));
                }

                let args: Vec<TokenStream> = type_path
                    .path
                    .segments
                    .last()
                    .map(|segment| match &segment.arguments {
                        PathArguments::AngleBracketed(bracketed) => bracketed
                            .args
                            .iter()
                            .filter_map(|arg| match arg {
                                GenericArgument::Type(arg) => Some(self.type_expr(arg)),
                                _ => None,
                            })
                            .collect(),
                        _ => Vec::new(),
                    })
                    .unwrap_or_default();

                if args.is_empty() {
                    return quote!(#type_expr_::of::<#ty>());
                }
                quote!(#type_expr_::parameterized::<#ty>([#(#args),*]))
            }
            _ => quote!(#type_expr_::of::<#ty>()),
        }
    }
}

fn mentions(tokens: TokenStream, params: &[&proc_macro2::Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => params.contains(&&ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}
