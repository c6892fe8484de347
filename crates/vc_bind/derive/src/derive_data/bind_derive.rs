use syn::{Data, DeriveInput};

use super::{BindEnum, BindMeta, BindStruct, TypeAttributes};

/// The parsed input of `#[derive(Bind)]`.
pub(crate) enum BindDerive<'a> {
    Struct(BindStruct<'a>),
    Enum(BindEnum<'a>),
}

impl<'a> BindDerive<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = BindMeta::new(attrs, &input.ident, &input.generics)?;

        match &input.data {
            Data::Struct(data) => BindStruct::new(meta, &data.fields).map(Self::Struct),
            Data::Enum(data) => {
                let attrs = meta.attrs();
                if !attrs.getters.is_empty()
                    || !attrs.setters.is_empty()
                    || !attrs.creators.is_empty()
                    || attrs.order.is_some()
                {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "accessors, creators and `order` only apply to structs",
                    ));
                }
                BindEnum::new(meta, &data.variants).map(Self::Enum)
            }
            Data::Union(_) => Err(syn::Error::new(
                input.ident.span(),
                "`Bind` cannot be derived for unions",
            )),
        }
    }
}
