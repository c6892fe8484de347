use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::Any;
use core::fmt::{self, Write};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use chrono::{SecondsFormat, Timelike, Utc};
use serde_json::Number;

use super::scalar::cast;
use crate::DynBind;
use crate::config::DateFormat;
use crate::error::{BindError, ConstructionError, StreamError};
use crate::info::ScalarKind;
use crate::stream::{Token, TokenWriter};

const DATE: &str = "%Y-%m-%d";
const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const TIME: &str = "%H:%M:%S%.f";
const MILLIS_PER_DAY: i64 = 86_400_000;

// -----------------------------------------------------------------------------
// Encode

pub(super) fn encode_temporal(
    kind: ScalarKind,
    value: &dyn Any,
    format: &DateFormat,
    writer: &mut dyn TokenWriter,
) -> Result<(), BindError> {
    let text = match (kind, format) {
        (_, DateFormat::TimeInMillis) => {
            let millis = to_millis(kind, value)?;
            writer.number(&Number::from(millis))?;
            return Ok(());
        }
        (ScalarKind::DateTimeUtc, DateFormat::Iso) => {
            cast::<DateTime<Utc>>(value, kind)?.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        }
        (ScalarKind::DateTimeOffset, DateFormat::Iso) => cast::<DateTime<FixedOffset>>(value, kind)?
            .to_rfc3339_opts(SecondsFormat::AutoSi, false),
        (ScalarKind::Date, DateFormat::Iso) => {
            render(kind, cast::<NaiveDate>(value, kind)?.format(DATE))?
        }
        (ScalarKind::DateTime, DateFormat::Iso) => {
            render(kind, cast::<NaiveDateTime>(value, kind)?.format(DATE_TIME))?
        }
        (ScalarKind::Time, DateFormat::Iso) => {
            render(kind, cast::<NaiveTime>(value, kind)?.format(TIME))?
        }
        (ScalarKind::DateTimeUtc, DateFormat::Pattern(pattern)) => {
            render(kind, cast::<DateTime<Utc>>(value, kind)?.format(pattern))?
        }
        (ScalarKind::DateTimeOffset, DateFormat::Pattern(pattern)) => {
            render(kind, cast::<DateTime<FixedOffset>>(value, kind)?.format(pattern))?
        }
        (ScalarKind::Date, DateFormat::Pattern(pattern)) => {
            render(kind, cast::<NaiveDate>(value, kind)?.format(pattern))?
        }
        (ScalarKind::DateTime, DateFormat::Pattern(pattern)) => {
            render(kind, cast::<NaiveDateTime>(value, kind)?.format(pattern))?
        }
        (ScalarKind::Time, DateFormat::Pattern(pattern)) => {
            render(kind, cast::<NaiveTime>(value, kind)?.format(pattern))?
        }
        _ => return Err(not_temporal(kind)),
    };
    writer.string(&text)?;
    Ok(())
}

fn to_millis(kind: ScalarKind, value: &dyn Any) -> Result<i64, BindError> {
    Ok(match kind {
        ScalarKind::DateTimeUtc => cast::<DateTime<Utc>>(value, kind)?.timestamp_millis(),
        ScalarKind::DateTimeOffset => cast::<DateTime<FixedOffset>>(value, kind)?.timestamp_millis(),
        ScalarKind::Date => cast::<NaiveDate>(value, kind)?
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis(),
        ScalarKind::DateTime => cast::<NaiveDateTime>(value, kind)?.and_utc().timestamp_millis(),
        ScalarKind::Time => {
            let time = cast::<NaiveTime>(value, kind)?;
            i64::from(time.num_seconds_from_midnight()) * 1000
                + i64::from(time.nanosecond() / 1_000_000)
        }
        _ => return Err(not_temporal(kind)),
    })
}

// Formatting fails on patterns chrono does not understand.
fn render(kind: ScalarKind, formatted: impl fmt::Display) -> Result<String, BindError> {
    let mut text = String::new();
    write!(text, "{formatted}").map_err(|_| invalid(kind, "invalid date pattern"))?;
    Ok(text)
}

// -----------------------------------------------------------------------------
// Decode

pub(super) fn decode_temporal(
    kind: ScalarKind,
    token: Token,
    format: &DateFormat,
) -> Result<Box<dyn DynBind>, BindError> {
    match (token, format) {
        (Token::Number(number), DateFormat::Iso | DateFormat::TimeInMillis) => {
            let millis = number
                .as_i64()
                .ok_or_else(|| invalid(kind, "timestamp is not an integral number of millis"))?;
            from_millis(kind, millis)
        }
        (Token::String(text), DateFormat::TimeInMillis) => {
            let millis = text.trim().parse::<i64>().map_err(|err| invalid(kind, err))?;
            from_millis(kind, millis)
        }
        (Token::String(text), DateFormat::Iso) => parse_iso(kind, &text),
        (Token::String(text), DateFormat::Pattern(pattern)) => parse_pattern(kind, &text, pattern),
        (other, _) => Err(StreamError::unexpected("a date string", other).into()),
    }
}

fn from_millis(kind: ScalarKind, millis: i64) -> Result<Box<dyn DynBind>, BindError> {
    let out_of_range = || invalid(kind, "timestamp out of range");
    if kind == ScalarKind::Time {
        if !(0..MILLIS_PER_DAY).contains(&millis) {
            return Err(out_of_range());
        }
        let seconds = u32::try_from(millis / 1000).map_err(|_| out_of_range())?;
        let nanos = u32::try_from(millis % 1000).map_err(|_| out_of_range())? * 1_000_000;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)
            .ok_or_else(out_of_range)?;
        return Ok(Box::new(time));
    }

    let utc = DateTime::from_timestamp_millis(millis).ok_or_else(out_of_range)?;
    Ok(match kind {
        ScalarKind::DateTimeUtc => Box::new(utc),
        ScalarKind::DateTimeOffset => Box::new(utc.fixed_offset()),
        ScalarKind::Date => Box::new(utc.date_naive()),
        ScalarKind::DateTime => Box::new(utc.naive_utc()),
        _ => return Err(not_temporal(kind)),
    })
}

fn parse_iso(kind: ScalarKind, text: &str) -> Result<Box<dyn DynBind>, BindError> {
    let text = text.trim();
    Ok(match kind {
        ScalarKind::DateTimeUtc => Box::new(
            DateTime::parse_from_rfc3339(text)
                .map_err(|err| invalid(kind, err))?
                .with_timezone(&Utc),
        ),
        ScalarKind::DateTimeOffset => {
            Box::new(DateTime::parse_from_rfc3339(text).map_err(|err| invalid(kind, err))?)
        }
        ScalarKind::Date => Box::new(text.parse::<NaiveDate>().map_err(|err| invalid(kind, err))?),
        ScalarKind::DateTime => {
            Box::new(text.parse::<NaiveDateTime>().map_err(|err| invalid(kind, err))?)
        }
        ScalarKind::Time => Box::new(text.parse::<NaiveTime>().map_err(|err| invalid(kind, err))?),
        _ => return Err(not_temporal(kind)),
    })
}

fn parse_pattern(kind: ScalarKind, text: &str, pattern: &str) -> Result<Box<dyn DynBind>, BindError> {
    Ok(match kind {
        ScalarKind::DateTimeUtc => {
            // Patterns without an offset are read as UTC.
            let parsed = DateTime::parse_from_str(text, pattern)
                .map(|value| value.with_timezone(&Utc))
                .or_else(|_| NaiveDateTime::parse_from_str(text, pattern).map(|value| value.and_utc()))
                .map_err(|err| invalid(kind, err))?;
            Box::new(parsed)
        }
        ScalarKind::DateTimeOffset => Box::new(
            DateTime::parse_from_str(text, pattern).map_err(|err| invalid(kind, err))?,
        ),
        ScalarKind::Date => Box::new(
            NaiveDate::parse_from_str(text, pattern).map_err(|err| invalid(kind, err))?,
        ),
        ScalarKind::DateTime => Box::new(
            NaiveDateTime::parse_from_str(text, pattern).map_err(|err| invalid(kind, err))?,
        ),
        ScalarKind::Time => Box::new(
            NaiveTime::parse_from_str(text, pattern).map_err(|err| invalid(kind, err))?,
        ),
        _ => return Err(not_temporal(kind)),
    })
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

fn not_temporal(kind: ScalarKind) -> BindError {
    invalid(kind, "not a date or time type")
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;

    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    use super::*;
    use crate::stream::TokenBuffer;

    fn encode(kind: ScalarKind, value: &dyn Any, format: &DateFormat) -> Token {
        let mut buffer = TokenBuffer::new();
        encode_temporal(kind, value, format, &mut buffer).unwrap();
        buffer.into_tokens().remove(0)
    }

    #[test]
    fn iso_strings() {
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap();
        assert_eq!(
            encode(ScalarKind::DateTimeUtc, &instant, &DateFormat::Iso),
            Token::String("2024-02-29T12:30:00Z".into())
        );
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            encode(ScalarKind::Date, &date, &DateFormat::Iso),
            Token::String("2024-02-29".into())
        );

        let decoded = decode_temporal(
            ScalarKind::DateTimeUtc,
            Token::String("2024-02-29T14:30:00+02:00".into()),
            &DateFormat::Iso,
        )
        .unwrap();
        assert_eq!(decoded.downcast_ref::<DateTime<Utc>>(), Some(&instant));
    }

    #[test]
    fn millis_accept_numbers_and_strings() {
        let time = NaiveTime::from_hms_milli_opt(1, 0, 0, 250).unwrap();
        assert_eq!(
            encode(ScalarKind::Time, &time, &DateFormat::TimeInMillis),
            Token::Number(Number::from(3_600_250))
        );

        let decoded = decode_temporal(
            ScalarKind::Date,
            Token::String("86400000".into()),
            &DateFormat::TimeInMillis,
        )
        .unwrap();
        assert_eq!(
            decoded.downcast_ref::<NaiveDate>(),
            NaiveDate::from_ymd_opt(1970, 1, 2).as_ref()
        );
        assert!(
            decode_temporal(ScalarKind::Time, Token::Number(Number::from(-1)), &DateFormat::Iso)
                .is_err()
        );
    }

    #[test]
    fn patterns() {
        let format = DateFormat::Pattern(Cow::Borrowed("%d.%m.%Y"));
        let date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(
            encode(ScalarKind::Date, &date, &format),
            Token::String("01.07.2023".into())
        );
        let decoded =
            decode_temporal(ScalarKind::Date, Token::String("01.07.2023".into()), &format).unwrap();
        assert_eq!(decoded.downcast_ref::<NaiveDate>(), Some(&date));

        let broken = DateFormat::Pattern(Cow::Borrowed("%Q"));
        let mut buffer = TokenBuffer::new();
        assert!(encode_temporal(ScalarKind::Date, &date, &broken, &mut buffer).is_err());
    }
}
