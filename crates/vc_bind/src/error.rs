//! Error taxonomy of the binding engine.
//!
//! Every failure ends the current conversion; nothing is retried internally.
//!
//! - [`ResolutionError`]: a declared type could not be resolved to a concrete one.
//! - [`ModelError`]: the type is structurally unusable. These are cached by the
//!   model cache and returned again for every later request of the same type.
//! - [`ConstructionError`]: a value could not be built while decoding.
//! - [`StreamError`]: the token stream is not in the expected state.
//! - [`BindError::Conversion`]: a user supplied converter or adapter failed.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::error::Error as CoreError;

use thiserror::Error;

/// Boxed error raised by user supplied converters and adapters.
pub type ConvertError = Box<dyn CoreError + Send + Sync>;

// -----------------------------------------------------------------------------
// BindError

/// Any error produced by an encode or decode operation.
#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error("unknown json property `{name}` for `{ty}`")]
    UnknownProperty { ty: String, name: String },
    #[error("failed to convert `{ty}`{}: {source}", property_suffix(.property))]
    Conversion {
        ty: String,
        property: Option<String>,
        #[source]
        source: ConvertError,
    },
}

fn property_suffix(property: &Option<String>) -> String {
    match property {
        Some(name) => alloc::format!(" in property `{name}`"),
        None => String::new(),
    }
}

impl BindError {
    /// Wrap an error raised by user code with the type and property it was converting.
    ///
    /// Errors that already carry conversion context are returned unchanged.
    pub fn conversion(ty: &str, property: Option<&str>, source: impl Into<ConvertError>) -> Self {
        let source = source.into();
        match source.downcast::<BindError>() {
            Ok(inner) if matches!(*inner, BindError::Conversion { .. }) => *inner,
            Ok(inner) => Self::Conversion {
                ty: ty.to_string(),
                property: property.map(ToString::to_string),
                source: inner,
            },
            Err(source) => Self::Conversion {
                ty: ty.to_string(),
                property: property.map(ToString::to_string),
                source,
            },
        }
    }

    /// Adds the property name to a conversion error that has none yet.
    pub fn in_property(self, name: &str) -> Self {
        match self {
            Self::Conversion {
                ty,
                property: None,
                source,
            } => Self::Conversion {
                ty,
                property: Some(name.to_string()),
                source,
            },
            other => other,
        }
    }

    /// Returns `true` for errors caused by the incoming token stream.
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}

// -----------------------------------------------------------------------------
// ResolutionError

/// Failure to turn a declared type into a resolved descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("generic parameter `{param}` of `{owner}` has neither a binding nor a declared bound")]
    UnboundParameter { owner: String, param: String },
    #[error("property `{property}` resolves to `{resolved}` but is stored as `{actual}`")]
    IncompatibleBound {
        property: String,
        resolved: String,
        actual: String,
    },
    #[error("value of type `{actual}` cannot be used where `{expected}` is requested")]
    IncompatibleRuntime { expected: String, actual: String },
    #[error("no type is registered for descriptor `{descriptor}`")]
    Unregistered { descriptor: String },
    #[error("no converter named `{name}` is registered or can be created")]
    UnknownConverter { name: String },
}

// -----------------------------------------------------------------------------
// ModelError

/// A type whose class model cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("`{ty}` is not an object type")]
    NotAnObject { ty: String },
    #[error("property name `{name}` is used by more than one property of `{ty}`")]
    PropertyNameClash { ty: String, name: String },
    #[error("`{ty}` declares {count} eligible creators")]
    MultipleCreators { ty: String, count: usize },
    #[error("creator parameter #{index} of `{ty}` is not bound to a property{}", named(.name))]
    CreatorParameterNotAnnotated {
        ty: String,
        index: usize,
        name: Option<String>,
    },
    #[error("property `{property}` of `{ty}` is both transient and renamed")]
    TransientConflict { ty: String, property: String },
}

fn named(name: &Option<String>) -> String {
    match name {
        Some(name) => alloc::format!(" (`{name}`)"),
        None => String::new(),
    }
}

// -----------------------------------------------------------------------------
// ConstructionError

/// Failure to build a value while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("`{ty}` has no default constructor and no creator")]
    NoDefaultConstructor { ty: String },
    #[error("creator of `{ty}` failed: {message}")]
    Creator { ty: String, message: String },
    #[error("creator parameter `{name}` of `{ty}` is missing from the document")]
    MissingCreatorParameter { ty: String, name: String },
    #[error("null is not a valid value for `{ty}`")]
    NullValue { ty: String },
    #[error("`{ty}` expects {expected} items, found {actual}")]
    LengthMismatch {
        ty: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid value for `{ty}`: {message}")]
    Value { ty: String, message: String },
    #[error("expected a value of type `{expected}`, found `{actual}`")]
    TypeMismatch { expected: String, actual: String },
    #[error("`{ty}` has no member #{index}")]
    NoMember { ty: String, index: usize },
}

// -----------------------------------------------------------------------------
// StreamError

/// The token stream diverged from what the walker requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected end of the token stream")]
    UnexpectedEnd,
    #[error("cursor ended at depth {actual}, expected depth {expected}")]
    CursorMisaligned { expected: usize, actual: usize },
    #[error("invalid json: {0}")]
    Syntax(String),
    #[error("i/o failure: {0}")]
    Io(String),
    #[error("strict mode requires an object or array at the root, found `{ty}`")]
    ScalarRoot { ty: String },
}

impl StreamError {
    pub(crate) fn unexpected(expected: impl ToString, found: impl ToString) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_context_is_not_nested() {
        let inner = BindError::conversion("a::A", Some("x"), "boom");
        let outer = BindError::conversion("b::B", None, inner);
        match outer {
            BindError::Conversion { ty, property, .. } => {
                assert_eq!(ty, "a::A");
                assert_eq!(property.as_deref(), Some("x"));
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn display_mentions_property() {
        let err = BindError::conversion("a::A", Some("radius"), "bad");
        assert_eq!(
            err.to_string(),
            "failed to convert `a::A` in property `radius`: bad"
        );
    }
}
