//! The token stream the walkers read and write.
//!
//! - [`Token`], [`TokenKind`]: structural events.
//! - [`TokenReader`]: a cursor over incoming tokens. The cursor may be shared
//!   with caller code; [`TokenReader::depth`] tells how many containers are
//!   open at the current position.
//! - [`TokenWriter`]: a sink for outgoing tokens.
//! - [`JsonReader`], [`JsonWriter`]: JSON text implementations on top of
//!   `serde_json`.
//! - [`TokenBuffer`]: an in-memory writer that can be read back.
//! - [`read_tree`], [`write_tree`]: raw token trees as [`serde_json::Value`].

// -----------------------------------------------------------------------------
// Modules

mod buffer;
mod reader;
mod token;
mod tree;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use buffer::TokenBuffer;
pub use reader::{JsonReader, TokenReader};
pub use token::{Token, TokenKind};
pub use tree::{read_tree, write_tree};
pub use writer::{JsonWriter, TokenWriter};
