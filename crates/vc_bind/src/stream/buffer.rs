use alloc::string::ToString;
use alloc::vec::Vec;

use serde_json::Number;

use crate::error::StreamError;
use crate::stream::{JsonReader, Token, TokenWriter};

/// A [`TokenWriter`] that keeps the tokens in memory.
///
/// # Example
///
/// ```
/// use vc_bind::stream::{Token, TokenBuffer, TokenReader, TokenWriter};
///
/// let mut buffer = TokenBuffer::new();
/// buffer.start_array().unwrap();
/// buffer.string("a").unwrap();
/// buffer.end_array().unwrap();
///
/// let mut reader = buffer.into_reader();
/// assert_eq!(reader.read().unwrap(), Token::StartArray);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    depth: usize,
}

impl TokenBuffer {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tokens: Vec::new(),
            depth: 0,
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    #[inline]
    pub fn into_reader(self) -> JsonReader {
        JsonReader::from_tokens(self.tokens)
    }

    fn close(&mut self, token: Token) -> Result<(), StreamError> {
        if self.depth == 0 {
            return Err(StreamError::unexpected("a value", token));
        }
        self.depth -= 1;
        self.tokens.push(token);
        Ok(())
    }
}

impl TokenWriter for TokenBuffer {
    fn start_object(&mut self) -> Result<(), StreamError> {
        self.depth += 1;
        self.tokens.push(Token::StartObject);
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), StreamError> {
        self.close(Token::EndObject)
    }

    fn start_array(&mut self) -> Result<(), StreamError> {
        self.depth += 1;
        self.tokens.push(Token::StartArray);
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), StreamError> {
        self.close(Token::EndArray)
    }

    fn key(&mut self, key: &str) -> Result<(), StreamError> {
        self.tokens.push(Token::Key(key.to_string()));
        Ok(())
    }

    fn string(&mut self, value: &str) -> Result<(), StreamError> {
        self.tokens.push(Token::String(value.to_string()));
        Ok(())
    }

    fn number(&mut self, value: &Number) -> Result<(), StreamError> {
        self.tokens.push(Token::Number(value.clone()));
        Ok(())
    }

    fn boolean(&mut self, value: bool) -> Result<(), StreamError> {
        self.tokens.push(Token::bool(value));
        Ok(())
    }

    fn null(&mut self) -> Result<(), StreamError> {
        self.tokens.push(Token::Null);
        Ok(())
    }

    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }
}
