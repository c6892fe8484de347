//! Customization of property names, order and visibility.
//!
//! - [`NamingStrategy`]: translates logical property names to JSON names.
//! - [`PropertyOrdering`]: order of written properties.
//! - [`VisibilityStrategy`]: which members may be read or written.
//! - [`CustomizationRecord`]: the above, plus the flags of a configuration,
//!   shared by every model build under it.
//!
//! ## Layers
//!
//! Per-member customization is declared on four layers, from the least to the
//! most specific: package (configuration, by module prefix), type, field and
//! accessor. [`merge_side`] merges them for the read side (getter layer) or
//! the write side (setter layer); every attribute takes its most specific
//! value. A `transient` marker excludes the side; a rename on any layer of a
//! side excluded that way is a
//! [`TransientConflict`](crate::error::ModelError::TransientConflict).

// -----------------------------------------------------------------------------
// Modules

mod layers;
mod naming;
mod ordering;
mod record;
mod visibility;

// -----------------------------------------------------------------------------
// Exports

pub use layers::{MergedSide, merge_side};
pub use naming::{NameTranslator, NamingStrategy};
pub use ordering::{OrderStrategy, PropertyOrdering};
pub use record::CustomizationRecord;
pub use visibility::{AllMembers, PublicOnly, VisibilityStrategy};
