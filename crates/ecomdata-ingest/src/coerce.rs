//! Per-column type normalization for loosely typed CSV fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use ecomdata_core::ColumnKind;

/// A value ready to be bound into an INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Coerce a raw field to the column's declared kind.
///
/// On failure returns the name of the expected type.
pub fn coerce(kind: ColumnKind, raw: &str) -> Result<SqlValue, &'static str> {
    match kind {
        ColumnKind::Integer => parse_integer(raw).map(SqlValue::Integer).ok_or("integer"),
        ColumnKind::Real => parse_real(raw).map(SqlValue::Real).ok_or("number"),
        ColumnKind::Date => normalize_date(raw).map(SqlValue::Text).ok_or("date"),
        ColumnKind::Text => Ok(SqlValue::Text(raw.to_string())),
    }
}

/// Parse an exact integer, accepting float notation with no fractional part.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    let value = raw.parse::<f64>().ok()?;
    // i64::MAX is not representable as f64; 2^63 is the first value past it.
    let bound = 2_f64.powi(63);
    if value.is_finite() && value.fract() == 0.0 && value >= -bound && value < bound {
        Some(value as i64)
    } else {
        None
    }
}

pub fn parse_real(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a date or datetime and re-emit it as `YYYY-MM-DD`, dropping any
/// time of day.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|datetime| datetime.date_naive())
        })?;
    Some(date.format("%Y-%m-%d").to_string())
}
