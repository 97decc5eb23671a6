//! Parsing and formatting of transaction dates.
//!
//! Clients may send either an RFC3339 timestamp or a plain `YYYY-MM-DD` date.
//! Everything is normalised to UTC with second precision before it is stored,
//! and stored as `YYYY-MM-DD HH:MM:SS` text so that SQLite's date functions
//! (e.g. `strftime('%m', date)`) can bucket it.

use serde::{Deserialize, Deserializer, de};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::Error;

const DB_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const DATE_ONLY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Convert `date_time` to UTC and drop the sub-second part.
///
/// # Errors
/// Returns [Error::InvalidDate] if the UTC date falls outside the years
/// 1 to 9999, e.g. `9999-12-31T23:00:00-05:00`.
pub fn normalise(date_time: OffsetDateTime) -> Result<OffsetDateTime, Error> {
    let utc = date_time
        .checked_to_offset(UtcOffset::UTC)
        .filter(|utc| (1..=9999).contains(&utc.year()))
        .ok_or_else(|| Error::InvalidDate(date_time.to_string()))?;

    Ok(utc.replace_nanosecond(0).unwrap_or(utc))
}

/// Format a date-time the way it is stored in the database.
///
/// # Errors
/// Returns [Error::InvalidDate] if `date_time` cannot be normalised, see
/// [normalise].
pub fn to_db_timestamp(date_time: OffsetDateTime) -> Result<String, Error> {
    normalise(date_time)?
        .format(DB_TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidDate(date_time.to_string()))
}

/// Parse a timestamp previously written by [to_db_timestamp].
pub fn parse_db_timestamp(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(text, DB_TIMESTAMP_FORMAT).map(PrimitiveDateTime::assume_utc)
}

/// Parse a date sent by a client.
///
/// Accepts RFC3339 timestamps (any offset) and date-only strings, which are
/// interpreted as midnight UTC.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is in neither format or the year in
/// UTC is outside 1..=9999.
pub fn parse_request_date(text: &str) -> Result<OffsetDateTime, Error> {
    let text = text.trim();

    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| {
            Date::parse(text, DATE_ONLY_FORMAT).map(|date| date.midnight().assume_utc())
        })
        .ok()
        .and_then(|parsed| normalise(parsed).ok())
        .ok_or_else(|| Error::InvalidDate(text.to_owned()))
}

/// Serde helper for optional request dates, see [parse_request_date].
pub(crate) fn deserialize_optional_request_date<'de, D>(
    deserializer: D,
) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|text| parse_request_date(&text).map_err(de::Error::custom))
        .transpose()
}
