use alloc::string::String;
use core::fmt;

use serde_json::Number;

/// One structural event of a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(String),
    String(String),
    /// A number in its exact lexical form.
    Number(Number),
    True,
    False,
    Null,
}

impl Token {
    #[inline]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::StartObject => TokenKind::StartObject,
            Self::EndObject => TokenKind::EndObject,
            Self::StartArray => TokenKind::StartArray,
            Self::EndArray => TokenKind::EndArray,
            Self::Key(_) => TokenKind::Key,
            Self::String(_) => TokenKind::String,
            Self::Number(_) => TokenKind::Number,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
            Self::Null => TokenKind::Null,
        }
    }

    #[inline]
    pub const fn bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key `{key}`"),
            Self::String(value) => write!(f, "string {value:?}"),
            Self::Number(value) => write!(f, "number {value}"),
            other => fmt::Display::fmt(&other.kind(), f),
        }
    }
}

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key,
    String,
    Number,
    True,
    False,
    Null,
}

impl TokenKind {
    /// Tokens that start a value.
    #[inline]
    pub const fn starts_value(self) -> bool {
        !matches!(self, Self::EndObject | Self::EndArray | Self::Key)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartObject => "`{`",
            Self::EndObject => "`}`",
            Self::StartArray => "`[`",
            Self::EndArray => "`]`",
            Self::Key => "key",
            Self::String => "string",
            Self::Number => "number",
            Self::True => "`true`",
            Self::False => "`false`",
            Self::Null => "`null`",
        };
        f.pad(name)
    }
}
