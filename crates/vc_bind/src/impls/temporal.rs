use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::impls::scalars::impl_scalar;

impl_scalar! {
    DateTime<Utc> => DateTimeUtc,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    NaiveTime => Time,
}
