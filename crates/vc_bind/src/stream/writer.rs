use alloc::vec::Vec;
use std::io;

use serde_json::Number;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::error::StreamError;
use crate::stream::Token;

// -----------------------------------------------------------------------------
// TokenWriter

/// A sink for outgoing tokens.
pub trait TokenWriter {
    fn start_object(&mut self) -> Result<(), StreamError>;

    fn end_object(&mut self) -> Result<(), StreamError>;

    fn start_array(&mut self) -> Result<(), StreamError>;

    fn end_array(&mut self) -> Result<(), StreamError>;

    fn key(&mut self, key: &str) -> Result<(), StreamError>;

    fn string(&mut self, value: &str) -> Result<(), StreamError>;

    fn number(&mut self, value: &Number) -> Result<(), StreamError>;

    fn boolean(&mut self, value: bool) -> Result<(), StreamError>;

    fn null(&mut self) -> Result<(), StreamError>;

    /// Containers opened and not yet closed.
    fn depth(&self) -> usize;

    /// Writes one token.
    fn write(&mut self, token: &Token) -> Result<(), StreamError> {
        match token {
            Token::StartObject => self.start_object(),
            Token::EndObject => self.end_object(),
            Token::StartArray => self.start_array(),
            Token::EndArray => self.end_array(),
            Token::Key(key) => self.key(key),
            Token::String(value) => self.string(value),
            Token::Number(value) => self.number(value),
            Token::True => self.boolean(true),
            Token::False => self.boolean(false),
            Token::Null => self.null(),
        }
    }
}

// -----------------------------------------------------------------------------
// JsonWriter

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object { first: bool, after_key: bool },
    Array { first: bool },
}

/// A [`TokenWriter`] producing JSON text.
///
/// # Example
///
/// ```
/// use vc_bind::stream::{JsonWriter, TokenWriter};
///
/// let mut writer = JsonWriter::new(Vec::new());
/// writer.start_object().unwrap();
/// writer.key("name").unwrap();
/// writer.string("John").unwrap();
/// writer.key("tags").unwrap();
/// writer.start_array().unwrap();
/// writer.boolean(true).unwrap();
/// writer.null().unwrap();
/// writer.end_array().unwrap();
/// writer.end_object().unwrap();
///
/// let text = String::from_utf8(writer.finish().unwrap()).unwrap();
/// assert_eq!(text, r#"{"name":"John","tags":[true,null]}"#);
/// ```
pub struct JsonWriter<W, F = CompactFormatter> {
    out: W,
    formatter: F,
    frames: Vec<Frame>,
}

impl<W: io::Write> JsonWriter<W> {
    /// A writer of compact JSON.
    #[inline]
    pub fn new(out: W) -> Self {
        Self::with_formatter(out, CompactFormatter)
    }
}

impl<W: io::Write> JsonWriter<W, PrettyFormatter<'static>> {
    /// A writer of indented JSON.
    #[inline]
    pub fn pretty(out: W) -> Self {
        Self::with_formatter(out, PrettyFormatter::new())
    }
}

impl<W: io::Write, F: Formatter> JsonWriter<W, F> {
    #[inline]
    pub fn with_formatter(out: W, formatter: F) -> Self {
        Self {
            out,
            formatter,
            frames: Vec::new(),
        }
    }

    /// Flushes and returns the output, failing if a container is still open.
    pub fn finish(mut self) -> Result<W, StreamError> {
        if !self.frames.is_empty() {
            return Err(StreamError::CursorMisaligned {
                expected: 0,
                actual: self.frames.len(),
            });
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn before_value(&mut self) -> Result<(), StreamError> {
        match self.frames.last_mut() {
            None => Ok(()),
            Some(Frame::Array { first }) => {
                let was_first = *first;
                *first = false;
                self.formatter.begin_array_value(&mut self.out, was_first)?;
                Ok(())
            }
            Some(Frame::Object {
                after_key: true, ..
            }) => Ok(()),
            Some(Frame::Object { .. }) => Err(StreamError::unexpected("a key", "a value")),
        }
    }

    fn after_value(&mut self) -> Result<(), StreamError> {
        match self.frames.last_mut() {
            None => Ok(()),
            Some(Frame::Array { .. }) => Ok(self.formatter.end_array_value(&mut self.out)?),
            Some(Frame::Object { after_key, .. }) => {
                *after_key = false;
                Ok(self.formatter.end_object_value(&mut self.out)?)
            }
        }
    }

    fn quoted(&mut self, value: &str) -> Result<(), StreamError> {
        serde_json::to_writer(&mut self.out, value).map_err(|err| StreamError::Io(err.to_string()))
    }
}

impl<W: io::Write, F: Formatter> TokenWriter for JsonWriter<W, F> {
    fn start_object(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.formatter.begin_object(&mut self.out)?;
        self.frames.push(Frame::Object {
            first: true,
            after_key: false,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), StreamError> {
        match self.frames.pop() {
            Some(Frame::Object {
                after_key: false, ..
            }) => {
                self.formatter.end_object(&mut self.out)?;
                self.after_value()
            }
            _ => Err(StreamError::unexpected("the end of an object", "`}`")),
        }
    }

    fn start_array(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.formatter.begin_array(&mut self.out)?;
        self.frames.push(Frame::Array { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), StreamError> {
        match self.frames.pop() {
            Some(Frame::Array { .. }) => {
                self.formatter.end_array(&mut self.out)?;
                self.after_value()
            }
            _ => Err(StreamError::unexpected("the end of an array", "`]`")),
        }
    }

    fn key(&mut self, key: &str) -> Result<(), StreamError> {
        let first = match self.frames.last_mut() {
            Some(Frame::Object { first, after_key }) if !*after_key => {
                let was_first = *first;
                *first = false;
                *after_key = true;
                was_first
            }
            _ => return Err(StreamError::unexpected("a value", "a key")),
        };
        self.formatter.begin_object_key(&mut self.out, first)?;
        self.quoted(key)?;
        self.formatter.end_object_key(&mut self.out)?;
        self.formatter.begin_object_value(&mut self.out)?;
        Ok(())
    }

    fn string(&mut self, value: &str) -> Result<(), StreamError> {
        self.before_value()?;
        self.quoted(value)?;
        self.after_value()
    }

    fn number(&mut self, value: &Number) -> Result<(), StreamError> {
        self.before_value()?;
        self.formatter
            .write_number_str(&mut self.out, &value.to_string())?;
        self.after_value()
    }

    fn boolean(&mut self, value: bool) -> Result<(), StreamError> {
        self.before_value()?;
        self.formatter.write_bool(&mut self.out, value)?;
        self.after_value()
    }

    fn null(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.formatter.write_null(&mut self.out)?;
        self.after_value()
    }

    #[inline]
    fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{JsonWriter, TokenWriter};
    use crate::error::StreamError;

    #[test]
    fn pretty_output_is_indented() {
        let mut writer = JsonWriter::pretty(Vec::new());
        writer.start_object().unwrap();
        writer.key("a").unwrap();
        writer.start_array().unwrap();
        writer.number(&1.into()).unwrap();
        writer.end_array().unwrap();
        writer.end_object().unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn misplaced_tokens_fail() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.start_object().unwrap();
        assert!(writer.string("x").is_err());
        assert!(writer.end_array().is_err());

        let mut writer = JsonWriter::new(Vec::new());
        writer.start_array().unwrap();
        assert!(matches!(
            writer.finish(),
            Err(StreamError::CursorMisaligned {
                expected: 0,
                actual: 1
            })
        ));
    }

    #[test]
    fn strings_are_escaped() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.string("a\"b\n").unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text, r#""a\"b\n""#);
    }
}
