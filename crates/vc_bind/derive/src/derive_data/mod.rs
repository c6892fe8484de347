//! Parsed input of the derive.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bind_derive;
mod bind_enum;
mod bind_meta;
mod bind_struct;
mod type_expr;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{AccessorAttribute, CreatorAttribute};
pub(crate) use attributes::{FieldAttributes, TypeAttributes, VariantAttributes};

pub(crate) use bind_derive::BindDerive;
pub(crate) use bind_enum::BindEnum;
pub(crate) use bind_meta::BindMeta;
pub(crate) use bind_struct::{BindStruct, StructField};
