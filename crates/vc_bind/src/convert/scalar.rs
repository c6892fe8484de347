use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::{Any, type_name};

use serde_json::Number;

use super::NumberFormat;
use super::temporal::{decode_temporal, encode_temporal};
use crate::DynBind;
use crate::access::BindRef;
use crate::config::DateFormat;
use crate::error::{BindError, ConstructionError, StreamError};
use crate::info::{ScalarKind, TypeInfo};
use crate::stream::{Token, TokenWriter};
use crate::DynValue;

/// Formats in effect for one scalar: the property's own, else the defaults.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Formats<'a> {
    pub date: &'a DateFormat,
    pub number: Option<&'a NumberFormat>,
}

/// Runs `$body` with `$ty` aliased to the integer type of `$kind`.
macro_rules! with_integer {
    ($kind:expr, $ty:ident => $body:expr, _ => $fallback:expr) => {
        match $kind {
            ScalarKind::I8 => { type $ty = i8; $body }
            ScalarKind::I16 => { type $ty = i16; $body }
            ScalarKind::I32 => { type $ty = i32; $body }
            ScalarKind::I64 => { type $ty = i64; $body }
            ScalarKind::I128 => { type $ty = i128; $body }
            ScalarKind::Isize => { type $ty = isize; $body }
            ScalarKind::U8 => { type $ty = u8; $body }
            ScalarKind::U16 => { type $ty = u16; $body }
            ScalarKind::U32 => { type $ty = u32; $body }
            ScalarKind::U64 => { type $ty = u64; $body }
            ScalarKind::U128 => { type $ty = u128; $body }
            ScalarKind::Usize => { type $ty = usize; $body }
            _ => $fallback,
        }
    };
}

pub(super) fn cast<T: Any>(value: &dyn Any, kind: ScalarKind) -> Result<&T, BindError> {
    value.downcast_ref::<T>().ok_or_else(|| {
        ConstructionError::TypeMismatch {
            expected: type_name::<T>().into(),
            actual: kind.name().into(),
        }
        .into()
    })
}

// -----------------------------------------------------------------------------
// Encode

pub(crate) fn encode_scalar(
    kind: ScalarKind,
    value: &dyn Any,
    formats: &Formats<'_>,
    writer: &mut dyn TokenWriter,
) -> Result<(), BindError> {
    with_integer!(kind, T => {
        let text = cast::<T>(value, kind)?.to_string();
        return encode_integer(&text, formats, writer);
    }, _ => ());

    match kind {
        ScalarKind::Bool => writer.boolean(*cast::<bool>(value, kind)?)?,
        ScalarKind::Char => {
            let mut buf = [0_u8; 4];
            writer.string(cast::<char>(value, kind)?.encode_utf8(&mut buf))?;
        }
        ScalarKind::F32 => {
            let value = *cast::<f32>(value, kind)?;
            return encode_float(f64::from(value), value.to_string(), formats, writer);
        }
        ScalarKind::F64 => {
            let value = *cast::<f64>(value, kind)?;
            return encode_float(value, value.to_string(), formats, writer);
        }
        ScalarKind::String => writer.string(cast::<String>(value, kind)?)?,
        ScalarKind::Number => writer.number(cast::<Number>(value, kind)?)?,
        _ => return encode_temporal(kind, value, formats.date, writer),
    }
    Ok(())
}

fn encode_integer(
    text: &str,
    formats: &Formats<'_>,
    writer: &mut dyn TokenWriter,
) -> Result<(), BindError> {
    match formats.number {
        Some(format) => writer.string(&format.format_integer(text))?,
        None => writer.number(&lexical_number(text)?)?,
    }
    Ok(())
}

// `text` is the shortest form of the original type, `f32` included.
fn encode_float(
    value: f64,
    text: String,
    formats: &Formats<'_>,
    writer: &mut dyn TokenWriter,
) -> Result<(), BindError> {
    if value.is_nan() {
        writer.string("NaN")?;
    } else if value.is_infinite() {
        writer.string(if value > 0.0 { "Infinity" } else { "-Infinity" })?;
    } else if let Some(format) = formats.number {
        writer.string(&format.format_float(value))?;
    } else {
        writer.number(&lexical_number(&text)?)?;
    }
    Ok(())
}

fn lexical_number(text: &str) -> Result<Number, BindError> {
    text.parse::<Number>().map_err(|err| {
        ConstructionError::Value {
            ty: "Number".into(),
            message: err.to_string(),
        }
        .into()
    })
}

// -----------------------------------------------------------------------------
// Decode

/// Decodes one scalar token.
pub(crate) fn decode_scalar(
    kind: ScalarKind,
    token: Token,
    formats: &Formats<'_>,
) -> Result<Box<dyn DynBind>, BindError> {
    with_integer!(kind, T => {
        let value: T = decode_integer(kind, token, formats)?;
        return Ok(Box::new(value));
    }, _ => ());

    Ok(match (kind, token) {
        (ScalarKind::Bool, Token::True) => Box::new(true),
        (ScalarKind::Bool, Token::False) => Box::new(false),
        (ScalarKind::Char, Token::String(text)) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Box::new(ch),
                _ => return Err(invalid(kind, "expected exactly one character")),
            }
        }
        (ScalarKind::F32, token) => Box::new(decode_float::<f32>(kind, token, formats)?),
        (ScalarKind::F64, token) => Box::new(decode_float::<f64>(kind, token, formats)?),
        (ScalarKind::String, Token::String(text)) => Box::new(text),
        (ScalarKind::Number, Token::Number(number)) => Box::new(number),
        (ScalarKind::Number, Token::String(text)) => Box::new(lexical_number(text.trim())?),
        (kind, token) if kind.is_temporal() => return decode_temporal(kind, token, formats.date),
        (kind, token) => return Err(StreamError::unexpected(expected(kind), token).into()),
    })
}

fn expected(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Bool => "a boolean",
        ScalarKind::Char | ScalarKind::String => "a string",
        _ => "a number",
    }
}

fn numeric_text(kind: ScalarKind, token: Token, formats: &Formats<'_>) -> Result<String, BindError> {
    match token {
        Token::Number(number) => Ok(number.to_string()),
        Token::String(text) => Ok(match formats.number {
            Some(format) => format.strip(&text),
            None => text.trim().to_string(),
        }),
        other => Err(StreamError::unexpected(expected(kind), other).into()),
    }
}

// Integers also accept integral forms such as `5.0` or `1e3`.
fn decode_integer<T: core::str::FromStr>(
    kind: ScalarKind,
    token: Token,
    formats: &Formats<'_>,
) -> Result<T, BindError> {
    let text = numeric_text(kind, token, formats)?;
    if let Ok(value) = text.parse::<T>() {
        return Ok(value);
    }
    let digits = integral_form(&text)
        .ok_or_else(|| invalid(kind, alloc::format!("`{text}` is not an integer")))?;
    digits
        .parse::<T>()
        .map_err(|_| invalid(kind, alloc::format!("`{text}` is out of range")))
}

/// The plain integer spelling of a decimal number such as `-1.50e2`, or
/// `None` if the number has a non-zero fraction.
fn integral_form(text: &str) -> Option<String> {
    // More digits than `u128::MAX` has, so the result is out of range.
    const MAX_DIGITS: usize = 40;

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() || !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = String::with_capacity(int.len() + frac.len());
    digits.push_str(int);
    digits.push_str(frac);
    let shift = exponent.checked_sub(i64::try_from(frac.len()).ok()?)?;
    if shift >= 0 {
        let zeros = usize::try_from(shift).map_or(MAX_DIGITS, |zeros| zeros.min(MAX_DIGITS));
        digits.extend(core::iter::repeat_n('0', zeros));
    } else {
        let cut = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
        let keep = digits.len().saturating_sub(cut);
        if digits[keep..].bytes().any(|b| b != b'0') {
            return None;
        }
        digits.truncate(keep);
    }

    let digits = digits.trim_start_matches('0');
    Some(match (digits.is_empty(), negative) {
        (true, _) => "0".into(),
        (false, true) => alloc::format!("-{digits}"),
        (false, false) => digits.into(),
    })
}

fn decode_float<T: core::str::FromStr>(
    kind: ScalarKind,
    token: Token,
    formats: &Formats<'_>,
) -> Result<T, BindError> {
    let text = numeric_text(kind, token, formats)?;
    // `NaN`, `Infinity` and `-Infinity` are accepted by `FromStr`.
    text.parse::<T>()
        .map_err(|_| invalid(kind, alloc::format!("`{text}` is not a number")))
}

// -----------------------------------------------------------------------------
// Map keys

/// Renders a key-like value as a JSON object key.
pub(crate) fn key_to_string(value: &dyn DynBind) -> Result<String, BindError> {
    let info = value.dyn_type_info();
    match (info, value.bind_ref()) {
        (TypeInfo::Scalar(scalar), BindRef::Value(any)) => {
            let kind = scalar.kind();
            with_integer!(kind, T => {
                return Ok(cast::<T>(any, kind)?.to_string());
            }, _ => ());
            match kind {
                ScalarKind::String => Ok(cast::<String>(any, kind)?.clone()),
                ScalarKind::Char => Ok(cast::<char>(any, kind)?.to_string()),
                ScalarKind::Bool => Ok(cast::<bool>(any, kind)?.to_string()),
                _ => Err(not_a_key(info)),
            }
        }
        (TypeInfo::Enum(enum_info), BindRef::Enum(variants)) => enum_info
            .variant_name(variants.variant_index())
            .map(ToString::to_string)
            .ok_or_else(|| not_a_key(info)),
        (_, BindRef::Dynamic(inner)) => key_to_string(inner),
        _ => Err(not_a_key(info)),
    }
}

/// Parses a JSON object key as a value of `info`.
pub(crate) fn key_from_string(
    info: &'static TypeInfo,
    key: String,
) -> Result<Box<dyn DynBind>, BindError> {
    match info {
        TypeInfo::Scalar(scalar) if scalar.kind() == ScalarKind::Bool => match key.as_str() {
            "true" => Ok(Box::new(true)),
            "false" => Ok(Box::new(false)),
            _ => Err(invalid(ScalarKind::Bool, alloc::format!("`{key}` is not a boolean"))),
        },
        TypeInfo::Scalar(scalar) if scalar.kind().is_key_like() => {
            let formats = Formats {
                date: &DateFormat::Iso,
                number: None,
            };
            decode_scalar(scalar.kind(), Token::String(key), &formats)
        }
        TypeInfo::Enum(enum_info) => enum_info
            .index_of(&key)
            .and_then(|index| enum_info.from_index(index))
            .ok_or_else(|| {
                ConstructionError::Value {
                    ty: info.type_path().into(),
                    message: alloc::format!("unknown variant `{key}`"),
                }
                .into()
            }),
        TypeInfo::Dynamic(_) => Ok(Box::new(DynValue::new(key))),
        _ => Err(not_a_key(info)),
    }
}

// -----------------------------------------------------------------------------
// Errors

fn invalid(kind: ScalarKind, message: impl ToString) -> BindError {
    ConstructionError::Value {
        ty: kind.name().into(),
        message: message.to_string(),
    }
    .into()
}

fn not_a_key(info: &TypeInfo) -> BindError {
    ConstructionError::Value {
        ty: info.type_path().into(),
        message: "not usable as a json object key".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::Bind;
    use crate::stream::TokenBuffer;

    const PLAIN: Formats<'static> = Formats {
        date: &DateFormat::Iso,
        number: None,
    };

    fn encode(kind: ScalarKind, value: &dyn Any, formats: &Formats<'_>) -> Vec<Token> {
        let mut buffer = TokenBuffer::new();
        encode_scalar(kind, value, formats, &mut buffer).unwrap();
        buffer.into_tokens()
    }

    fn number(text: &str) -> Token {
        Token::Number(text.parse().unwrap())
    }

    #[test]
    fn floats_keep_their_shortest_form() {
        assert_eq!(encode(ScalarKind::F32, &0.1_f32, &PLAIN), [number("0.1")]);
        assert_eq!(encode(ScalarKind::F64, &2.5_f64, &PLAIN), [number("2.5")]);
        assert_eq!(
            encode(ScalarKind::F64, &f64::NEG_INFINITY, &PLAIN),
            [Token::String("-Infinity".into())]
        );

        let nan = decode_scalar(ScalarKind::F64, Token::String("NaN".into()), &PLAIN).unwrap();
        assert!(nan.downcast_ref::<f64>().unwrap().is_nan());
    }

    #[test]
    fn integers_accept_integral_forms() {
        let value = decode_scalar(ScalarKind::U16, number("1e3"), &PLAIN).unwrap();
        assert_eq!(value.downcast_ref::<u16>(), Some(&1000));
        let value = decode_scalar(ScalarKind::I64, Token::String(" -12 ".into()), &PLAIN).unwrap();
        assert_eq!(value.downcast_ref::<i64>(), Some(&-12));

        assert!(decode_scalar(ScalarKind::U8, number("256"), &PLAIN).is_err());
        assert!(decode_scalar(ScalarKind::I32, number("1.5"), &PLAIN).is_err());
        assert!(decode_scalar(ScalarKind::I32, number("15e-1"), &PLAIN).is_err());
        let value = decode_scalar(ScalarKind::I32, number("-1.50e2"), &PLAIN).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&-150));
        let value = decode_scalar(ScalarKind::U8, number("-0.0"), &PLAIN).unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&0));
        assert!(decode_scalar(ScalarKind::U8, number("-1e0"), &PLAIN).is_err());
        assert!(decode_scalar(ScalarKind::I32, Token::True, &PLAIN).unwrap_err().is_stream());
    }

    #[test]
    fn integral_forms_are_exact() {
        let value = decode_scalar(ScalarKind::U128, number("2e38"), &PLAIN).unwrap();
        assert_eq!(value.downcast_ref::<u128>(), Some(&(2 * 10_u128.pow(38))));
        let value = decode_scalar(ScalarKind::I64, number("9007199254740993.0"), &PLAIN).unwrap();
        assert_eq!(value.downcast_ref::<i64>(), Some(&9_007_199_254_740_993));

        for text in ["1e39", "1e400", "-1e20"] {
            let kind = if text == "-1e20" { ScalarKind::I64 } else { ScalarKind::U128 };
            let err = decode_scalar(kind, number(text), &PLAIN).unwrap_err();
            assert!(err.to_string().contains("out of range"), "{text}: {err}");
        }
    }

    #[test]
    fn number_formats_write_strings() {
        let format = NumberFormat::parse("#,##0.00");
        let formats = Formats {
            date: &DateFormat::Iso,
            number: Some(&format),
        };
        assert_eq!(
            encode(ScalarKind::F64, &1234.5_f64, &formats),
            [Token::String("1,234.50".into())]
        );
        let value =
            decode_scalar(ScalarKind::F64, Token::String("1,234.50".into()), &formats).unwrap();
        assert_eq!(value.downcast_ref::<f64>(), Some(&1234.5));
        let value = decode_scalar(ScalarKind::U32, Token::String("1,000.00".into()), &formats)
            .unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&1000));
    }

    #[test]
    fn keys() {
        assert_eq!(key_to_string(&42_u8).unwrap(), "42");
        assert_eq!(key_to_string(&'x').unwrap(), "x");
        assert!(key_to_string(&1.5_f64).is_err());

        let key = key_from_string(<i32>::type_info(), "-7".into()).unwrap();
        assert_eq!(key.downcast_ref::<i32>(), Some(&-7));
        let key = key_from_string(<bool>::type_info(), "true".into()).unwrap();
        assert_eq!(key.downcast_ref::<bool>(), Some(&true));
        assert!(key_from_string(<f64>::type_info(), "1".into()).is_err());
    }
}
