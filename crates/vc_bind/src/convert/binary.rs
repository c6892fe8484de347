use alloc::vec::Vec;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use serde_json::Number;

use crate::config::BinaryStrategy;
use crate::error::{BindError, ConstructionError};
use crate::stream::TokenWriter;

/// Writes a byte sequence with the given strategy.
pub(crate) fn encode_bytes(
    bytes: &[u8],
    strategy: BinaryStrategy,
    writer: &mut dyn TokenWriter,
) -> Result<(), BindError> {
    match strategy {
        BinaryStrategy::Bytes => {
            writer.start_array()?;
            for byte in bytes {
                writer.number(&Number::from(*byte))?;
            }
            writer.end_array()?;
        }
        BinaryStrategy::Base64 => writer.string(&STANDARD.encode(bytes))?,
        BinaryStrategy::Base64Url => writer.string(&URL_SAFE.encode(bytes))?,
    }
    Ok(())
}

/// Decodes a base64 string, trying the configured alphabet first.
pub(crate) fn decode_base64(text: &str, strategy: BinaryStrategy) -> Result<Vec<u8>, BindError> {
    let (first, second) = match strategy {
        BinaryStrategy::Base64Url => (&URL_SAFE, &STANDARD),
        BinaryStrategy::Bytes | BinaryStrategy::Base64 => (&STANDARD, &URL_SAFE),
    };
    first
        .decode(text)
        .or_else(|_| second.decode(text))
        .map_err(|err| {
            ConstructionError::Value {
                ty: "bytes".into(),
                message: alloc::format!("invalid base64: {err}"),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{Token, TokenBuffer};

    #[test]
    fn strategies() {
        let bytes = [0xfb_u8, 0xff, 0x01];

        let mut buffer = TokenBuffer::new();
        encode_bytes(&bytes, BinaryStrategy::Base64, &mut buffer).unwrap();
        assert_eq!(buffer.tokens(), [Token::String("+/8B".into())]);

        let mut buffer = TokenBuffer::new();
        encode_bytes(&bytes, BinaryStrategy::Base64Url, &mut buffer).unwrap();
        assert_eq!(buffer.tokens(), [Token::String("-_8B".into())]);

        let mut buffer = TokenBuffer::new();
        encode_bytes(&bytes[..1], BinaryStrategy::Bytes, &mut buffer).unwrap();
        assert_eq!(
            buffer.tokens(),
            [Token::StartArray, Token::Number(Number::from(251_u8)), Token::EndArray]
        );
    }

    #[test]
    fn either_alphabet_decodes() {
        assert_eq!(decode_base64("+/8B", BinaryStrategy::Base64Url).unwrap(), [0xfb, 0xff, 0x01]);
        assert_eq!(decode_base64("-_8B", BinaryStrategy::Base64).unwrap(), [0xfb, 0xff, 0x01]);
        assert!(decode_base64("*", BinaryStrategy::Base64).is_err());
    }
}
