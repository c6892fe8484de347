#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive emits `::vc_bind` paths, which also have to resolve inside this
// crate (unit tests and doc tests).
extern crate self as vc_bind;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod hash;

pub mod access;
pub mod cell;
pub mod config;
pub mod convert;
pub mod customize;
pub mod error;
pub mod impls;
pub mod info;
pub mod marshal;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod stream;
pub mod unmarshal;

mod jsonb;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use access::{Bind, DynBind, DynValue};
pub use config::JsonbConfig;
pub use error::BindError;
pub use jsonb::Jsonb;

/// Derive the capability set of a struct with named fields or of a unit-only enum.
///
/// See the crate documentation for the accepted `#[bind(...)]` attributes.
pub use vc_bind_derive::Bind;

/// The most used items.
pub mod prelude {
    pub use crate::Bind;
    pub use crate::access::{DynBind, DynValue};
    pub use crate::config::{BinaryStrategy, DateFormat, JsonbConfig};
    pub use crate::convert::{Adapter, Converter};
    pub use crate::customize::{NamingStrategy, PropertyOrdering};
    pub use crate::error::BindError;
    pub use crate::jsonb::Jsonb;
}
