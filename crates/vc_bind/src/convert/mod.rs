//! Converters: user supplied ones and the built-in codecs.
//!
//! - [`Converter`]: token level encoding and decoding of one type, with
//!   access to the recursive walkers.
//! - [`Adapter`]: maps a type to another one that is encoded in its place.
//! - [`ComponentFactory`]: creates named converters on demand.
//! - [`ConverterRegistry`]: decides which converter handles a value.
//! - [`NumberFormat`]: decimal patterns of property level number formats.
//!
//! ## Dispatch order
//!
//! 1. The converter named by the property being converted.
//! 2. The converter registered for the exact type.
//! 3. The built-in converter of the type's shape.
//! 4. The object converter backed by the type's class model.

// -----------------------------------------------------------------------------
// Modules

mod binary;
mod component;
mod number;
mod registry;
mod scalar;
mod temporal;

// -----------------------------------------------------------------------------
// Exports

pub use component::{Adapter, AdapterConverter, ComponentFactory, Converter, DefaultFactory};
pub use number::NumberFormat;
pub use registry::{ConverterRegistry, Dispatch};

pub(crate) use binary::{decode_base64, encode_bytes};
pub(crate) use scalar::{Formats, decode_scalar, encode_scalar, key_from_string, key_to_string};
