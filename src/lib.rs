#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_bind as bind;

pub use vc_bind::{Bind, BindError, DynBind, DynValue, Jsonb, JsonbConfig};

/// The most used items.
pub mod prelude {
    pub use vc_bind::prelude::*;
}
