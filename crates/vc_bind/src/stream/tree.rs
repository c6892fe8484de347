use alloc::vec::Vec;

use serde_json::{Map, Value};

use crate::error::StreamError;
use crate::stream::{Token, TokenReader, TokenWriter};

/// Reads the next value as a raw tree.
pub fn read_tree(reader: &mut dyn TokenReader) -> Result<Value, StreamError> {
    let token = reader.read()?;
    match token {
        Token::Null => Ok(Value::Null),
        Token::True => Ok(Value::Bool(true)),
        Token::False => Ok(Value::Bool(false)),
        Token::Number(value) => Ok(Value::Number(value)),
        Token::String(value) => Ok(Value::String(value)),
        Token::StartArray => {
            let mut items = Vec::new();
            while !reader.at_container_end()? {
                items.push(read_tree(reader)?);
            }
            expect_end(reader, Token::EndArray)?;
            Ok(Value::Array(items))
        }
        Token::StartObject => {
            let mut entries = Map::new();
            while !reader.at_container_end()? {
                match reader.read()? {
                    Token::Key(key) => {
                        let value = read_tree(reader)?;
                        entries.insert(key, value);
                    }
                    other => return Err(StreamError::unexpected("a key", other)),
                }
            }
            expect_end(reader, Token::EndObject)?;
            Ok(Value::Object(entries))
        }
        other => Err(StreamError::unexpected("a value", other)),
    }
}

fn expect_end(reader: &mut dyn TokenReader, end: Token) -> Result<(), StreamError> {
    let token = reader.read()?;
    if token == end {
        Ok(())
    } else {
        Err(StreamError::unexpected(end, token))
    }
}

/// Writes a raw tree.
pub fn write_tree(writer: &mut dyn TokenWriter, value: &Value) -> Result<(), StreamError> {
    match value {
        Value::Null => writer.null(),
        Value::Bool(value) => writer.boolean(*value),
        Value::Number(value) => writer.number(value),
        Value::String(value) => writer.string(value),
        Value::Array(items) => {
            writer.start_array()?;
            for item in items {
                write_tree(writer, item)?;
            }
            writer.end_array()
        }
        Value::Object(entries) => {
            writer.start_object()?;
            for (key, value) in entries {
                writer.key(key)?;
                write_tree(writer, value)?;
            }
            writer.end_object()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{read_tree, write_tree};
    use crate::stream::{JsonReader, TokenBuffer, TokenReader};

    #[test]
    fn trees_pass_through_unchanged() {
        let value = json!({"b": [1, "x", null], "a": {"c": false}});
        let mut buffer = TokenBuffer::new();
        write_tree(&mut buffer, &value).unwrap();
        let mut reader = buffer.into_reader();
        assert_eq!(read_tree(&mut reader).unwrap(), value);
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn reading_stops_after_one_value() {
        let mut reader = JsonReader::parse(r#"[{"a": 1}, 2]"#).unwrap();
        reader.read().unwrap();
        assert_eq!(read_tree(&mut reader).unwrap(), json!({"a": 1}));
        assert_eq!(reader.depth(), 1);
    }
}
