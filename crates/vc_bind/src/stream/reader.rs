use alloc::collections::VecDeque;
use alloc::string::ToString;
use std::io;

use serde_json::Value;

use crate::error::StreamError;
use crate::stream::{Token, TokenKind};

// -----------------------------------------------------------------------------
// TokenReader

/// A cursor over incoming tokens.
pub trait TokenReader {
    /// The kind of the next token, without consuming it; `None` at the end.
    fn peek(&mut self) -> Result<Option<TokenKind>, StreamError>;

    /// Consumes the next token; `None` at the end.
    fn next_token(&mut self) -> Result<Option<Token>, StreamError>;

    /// Containers opened and not yet closed before the cursor.
    fn depth(&self) -> usize;

    /// Consumes the next token, failing at the end.
    #[inline]
    fn read(&mut self) -> Result<Token, StreamError> {
        self.next_token()?.ok_or(StreamError::UnexpectedEnd)
    }

    /// Skips the next value, containers included.
    fn skip_value(&mut self) -> Result<(), StreamError> {
        let depth = self.depth();
        let token = self.read()?;
        match token.kind() {
            TokenKind::StartObject | TokenKind::StartArray => {
                while self.depth() > depth {
                    self.read()?;
                }
                Ok(())
            }
            kind if kind.starts_value() => Ok(()),
            _ => Err(StreamError::unexpected("a value", token)),
        }
    }

    /// Returns `true` if the current container has no more entries.
    fn at_container_end(&mut self) -> Result<bool, StreamError> {
        Ok(matches!(
            self.peek()?,
            None | Some(TokenKind::EndObject | TokenKind::EndArray)
        ))
    }
}

// -----------------------------------------------------------------------------
// JsonReader

/// A [`TokenReader`] over a parsed JSON document.
///
/// # Example
///
/// ```
/// use vc_bind::stream::{JsonReader, Token, TokenReader};
///
/// let mut reader = JsonReader::parse(r#"{"a": [1, true]}"#).unwrap();
/// assert_eq!(reader.read().unwrap(), Token::StartObject);
/// assert_eq!(reader.read().unwrap(), Token::Key("a".into()));
/// reader.skip_value().unwrap();
/// assert_eq!(reader.depth(), 1);
/// assert_eq!(reader.read().unwrap(), Token::EndObject);
/// assert_eq!(reader.next_token().unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonReader {
    tokens: VecDeque<Token>,
    depth: usize,
}

impl JsonReader {
    /// Parses JSON text.
    pub fn parse(text: &str) -> Result<Self, StreamError> {
        let value: Value = serde_json::from_str(text).map_err(syntax)?;
        Ok(Self::from_value(value))
    }

    /// Parses JSON read from `reader`.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, StreamError> {
        let value: Value = serde_json::from_reader(reader).map_err(syntax)?;
        Ok(Self::from_value(value))
    }

    /// Streams the tokens of a raw tree.
    pub fn from_value(value: Value) -> Self {
        let mut tokens = VecDeque::new();
        flatten(value, &mut tokens);
        Self { tokens, depth: 0 }
    }

    /// Streams the given tokens.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            depth: 0,
        }
    }

    /// Number of tokens left.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

fn syntax(err: serde_json::Error) -> StreamError {
    if err.is_io() {
        StreamError::Io(err.to_string())
    } else {
        StreamError::Syntax(err.to_string())
    }
}

fn flatten(value: Value, tokens: &mut VecDeque<Token>) {
    match value {
        Value::Null => tokens.push_back(Token::Null),
        Value::Bool(value) => tokens.push_back(Token::bool(value)),
        Value::Number(value) => tokens.push_back(Token::Number(value)),
        Value::String(value) => tokens.push_back(Token::String(value)),
        Value::Array(items) => {
            tokens.push_back(Token::StartArray);
            for item in items {
                flatten(item, tokens);
            }
            tokens.push_back(Token::EndArray);
        }
        Value::Object(entries) => {
            tokens.push_back(Token::StartObject);
            for (key, value) in entries {
                tokens.push_back(Token::Key(key));
                flatten(value, tokens);
            }
            tokens.push_back(Token::EndObject);
        }
    }
}

impl TokenReader for JsonReader {
    #[inline]
    fn peek(&mut self) -> Result<Option<TokenKind>, StreamError> {
        Ok(self.tokens.front().map(Token::kind))
    }

    fn next_token(&mut self) -> Result<Option<Token>, StreamError> {
        let token = self.tokens.pop_front();
        match token {
            Some(Token::StartObject | Token::StartArray) => self.depth += 1,
            Some(Token::EndObject | Token::EndArray) => {
                self.depth = self.depth.saturating_sub(1);
            }
            _ => {}
        }
        Ok(token)
    }

    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonReader, TokenReader};
    use crate::error::StreamError;
    use crate::stream::{Token, TokenKind};

    #[test]
    fn numbers_keep_their_lexical_form() {
        let mut reader = JsonReader::parse("[1.10, 12345678901234567890123]").unwrap();
        reader.read().unwrap();
        let Token::Number(first) = reader.read().unwrap() else {
            panic!("expected a number");
        };
        assert_eq!(first.to_string(), "1.10");
        let Token::Number(second) = reader.read().unwrap() else {
            panic!("expected a number");
        };
        assert_eq!(second.to_string(), "12345678901234567890123");
    }

    #[test]
    fn skip_value_consumes_one_structure() {
        let mut reader = JsonReader::parse(r#"[{"a": [1, {"b": null}]}, 2]"#).unwrap();
        assert_eq!(reader.read().unwrap(), Token::StartArray);
        reader.skip_value().unwrap();
        assert_eq!(reader.depth(), 1);
        assert_eq!(reader.peek().unwrap(), Some(TokenKind::Number));
        reader.skip_value().unwrap();
        assert!(reader.at_container_end().unwrap());
        assert!(matches!(
            reader.skip_value(),
            Err(StreamError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(matches!(
            JsonReader::parse("{\"a\": }"),
            Err(StreamError::Syntax(_))
        ));
    }
}
