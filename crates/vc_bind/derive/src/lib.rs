//! See [`Bind`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BIND_ATTRIBUTE_NAME: &str = "bind";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Binding Derivation
///
/// `#[derive(Bind)]` implements `Bind` and `DynBind`, plus:
///
/// - `Object` for structs with named fields;
/// - `Variants` for enums whose variants are all unit variants.
///
/// Every field type, getter return type, setter parameter type and creator
/// parameter type must implement `Bind`. Type parameters get a `Bind` bound.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Bind)]
/// #[bind(
///     order("id", "name"),          // property order, overrides the strategy
///     nillable,                     // write absent values as `null`
///     date_format = "%Y-%m-%d",     // default date format of the properties
///     number_format = "#0.00",      // default number format of the properties
///     bound(T = Shape),             // declared bound of a type parameter
///     getter(name = "area", with = Self::area),
///     setter(name = "area", with = Self::set_area),
///     creator(with = Self::new, params("id": u32, "name": String)),
///     no_default,                   // the type has no `Default` impl
///     auto_register,
/// )]
/// struct Record<T> { /* ... */ }
/// ```
///
/// Without `no_default` the type must implement `Default`; it is the
/// construction fallback when no creator applies.
///
/// ### Creators
///
/// `with` names a function returning `Self`, or `Result<Self, E>` with
/// `E: Display` when `fallible` is present. Parameters are listed in call
/// order. A parameter named `"key"` is bound to the JSON key `key`. A `_`
/// parameter has no key, and building the model of the type fails.
/// `designated` marks the creator that wins over the others.
///
/// ```rust, ignore
/// #[bind(no_default, creator(with = Self::parse, params("text": String), fallible, designated))]
/// ```
///
/// ### Auto Registration
///
/// `auto_register` adds the type to every `TypeRegistry::auto_register` call.
/// It has no effect on generic types and is a no-op without the
/// `auto_register` feature.
///
/// ## Field Attributes
///
/// - `skip`: the field carries the `TRANSIENT` modifier and never becomes a
///   property, whatever the visibility strategy.
/// - `rename = "..."`: the JSON name of the property.
/// - `transient`: the property is neither written nor read.
/// - `nillable` / `nillable = false`: whether an absent value is written as `null`.
/// - `date_format = "..."`, `number_format = "..."`: scalar formats.
/// - `converter = "..."`: name of a converter registered on the engine.
/// - `parent`: the field holds the ancestor part of the type. Its properties
///   are inherited, and declarations of the type itself win on name clashes.
///
/// `rename`, `transient`, `nillable`, the formats and `converter` are also
/// accepted inside `getter(...)` and `setter(...)`.
///
/// Private fields (no `pub`) are only visible under a visibility strategy that
/// allows them.
///
/// ## Enum Attributes
///
/// Variants accept `rename = "..."`, the JSON name of the variant.
///
/// ```rust, ignore
/// #[derive(Bind)]
/// enum Side {
///     Left,
///     #[bind(rename = "R")]
///     Right,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_bind_impls(ast).into()
}
