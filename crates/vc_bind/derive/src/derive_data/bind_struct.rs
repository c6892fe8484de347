use syn::ext::IdentExt;
use syn::{Field, Fields, Ident, Type, Visibility};

use super::{BindMeta, FieldAttributes};

/// A struct with named fields.
pub(crate) struct BindStruct<'a> {
    meta: BindMeta<'a>,
    fields: Vec<StructField<'a>>,
}

/// A named field.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// Declaration position, the key of `field_at`.
    pub index: usize,
    pub public: bool,
}

impl<'a> BindStruct<'a> {
    pub(crate) fn new(meta: BindMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let Fields::Named(named) = fields else {
            return Err(syn::Error::new(
                meta.ident().span(),
                "`Bind` supports structs with named fields and unit-only enums",
            ));
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            fields.push(StructField::new(field, attrs, fields.len()));
        }

        Ok(Self { meta, fields })
    }

    #[inline]
    pub(crate) fn meta(&self) -> &BindMeta<'a> {
        &self.meta
    }

    #[inline]
    pub(crate) fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }
}

impl<'a> StructField<'a> {
    fn new(field: &'a Field, attrs: FieldAttributes, index: usize) -> Self {
        Self {
            // Named fields always carry an ident.
            ident: field.ident.as_ref().unwrap_or_else(|| unreachable!()),
            ty: &field.ty,
            attrs,
            index,
            public: !matches!(field.vis, Visibility::Inherited),
        }
    }

    /// The declared name, without a `r#` prefix.
    pub(crate) fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}
