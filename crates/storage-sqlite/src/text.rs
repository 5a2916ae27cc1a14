//! Text encodings for stored values. Decimals, dates and timestamps live in
//! TEXT columns; decoding failures surface as conversion errors.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use trackmystartup_core::errors::{Error, Result};

pub(crate) fn encode_decimal(value: Decimal) -> String {
    value.to_string()
}

pub(crate) fn parse_decimal(column: &str, value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|err| Error::conversion(format!("{}: {} ({})", column, value, err)))
}

pub(crate) fn parse_opt_decimal(column: &str, value: Option<&str>) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(column, v)).transpose()
}

pub(crate) fn encode_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(column: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| Error::conversion(format!("{}: {} ({})", column, value, err)))
}

pub(crate) fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| Error::conversion(format!("{}: {} ({})", column, value, err)))
}
