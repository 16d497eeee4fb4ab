//! Operator text -> typed column value.
//!
//! Dispatch goes through [`type_family`], so the normalized-name table in
//! `datatype` decides which rule applies. Coercion never panics and never
//! defaults a value: any text that does not fit is returned as a
//! [`CoercionError`] carrying the column, declared type and raw text.

use std::num::IntErrorKind;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{CoercionError, CoercionFailure};
use crate::types::datatype::{TypeFamily, type_family};
use crate::types::value::TypedValue;

/// What to do with a declared type the family table does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTypePolicy {
    /// Hand the raw text to the database unchanged.
    #[default]
    PassThrough,
    /// Fail closed with [`CoercionFailure::UnsupportedType`].
    Reject,
}

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn coerce(
    column: &str,
    raw: &str,
    declared_type: &str,
    policy: UnknownTypePolicy,
) -> Result<TypedValue, CoercionError> {
    coerce_family(type_family(declared_type), raw, policy).map_err(|failure| CoercionError {
        column: column.to_string(),
        declared_type: declared_type.to_string(),
        raw: raw.to_string(),
        failure,
    })
}

fn coerce_family(
    family: TypeFamily,
    raw: &str,
    policy: UnknownTypePolicy,
) -> Result<TypedValue, CoercionFailure> {
    match family {
        TypeFamily::Integer | TypeFamily::SmallInteger | TypeFamily::TinyInteger => {
            parse_bounded(raw, family).map(TypedValue::Int)
        }
        TypeFamily::BigInteger => parse_integer::<i64>(raw, "bigint").map(TypedValue::BigInt),
        TypeFamily::Decimal => parse_decimal(raw).map(TypedValue::Decimal),
        TypeFamily::Float => parse_float(raw).map(TypedValue::Double),
        TypeFamily::Boolean => parse_bool(raw).map(TypedValue::Bool),
        TypeFamily::DateTime => parse_date_time(raw).map(TypedValue::DateTime),
        TypeFamily::Text => Ok(TypedValue::Text(raw.to_string())),
        TypeFamily::Binary => STANDARD
            .decode(raw.trim())
            .map(TypedValue::Binary)
            .map_err(|_| CoercionFailure::Malformed {
                expected: "base64 encoded bytes",
            }),
        TypeFamily::Other => match policy {
            UnknownTypePolicy::PassThrough => Ok(TypedValue::Text(raw.to_string())),
            UnknownTypePolicy::Reject => Err(CoercionFailure::UnsupportedType),
        },
    }
}

fn parse_integer<T>(raw: &str, expected: &'static str) -> Result<T, CoercionFailure>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.trim().parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoercionFailure::OutOfRange { expected }
        }
        _ => CoercionFailure::Malformed { expected },
    })
}

/// Reads an integer stored as `i32` and checks it against the family's range,
/// so `-5` for `tinyint` is out of range rather than malformed.
fn parse_bounded(raw: &str, family: TypeFamily) -> Result<i32, CoercionFailure> {
    let expected = family.label();
    let n = parse_integer::<i64>(raw, expected)?;
    let in_range = family
        .int_bounds()
        .is_some_and(|(min, max)| (min..=max).contains(&n));
    if !in_range {
        return Err(CoercionFailure::OutOfRange { expected });
    }
    i32::try_from(n).map_err(|_| CoercionFailure::OutOfRange { expected })
}

fn parse_decimal(raw: &str) -> Result<Decimal, CoercionFailure> {
    Decimal::from_str_exact(raw.trim()).map_err(|_| CoercionFailure::Malformed {
        expected: "decimal",
    })
}

fn parse_float(raw: &str) -> Result<f64, CoercionFailure> {
    let expected = "float";
    let n: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoercionFailure::Malformed { expected })?;
    if !n.is_finite() {
        return Err(CoercionFailure::OutOfRange { expected });
    }
    Ok(n)
}

fn parse_bool(raw: &str) -> Result<bool, CoercionFailure> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(CoercionFailure::Malformed {
            expected: "true|false|1|0",
        }),
    }
}

fn parse_date_time(raw: &str) -> Result<NaiveDateTime, CoercionFailure> {
    let expected = "datetime 'YYYY-MM-DD[ HH:MM:SS[.fff]]'";
    let token = raw.trim();
    if let Some(ts) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
    {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(CoercionFailure::Malformed { expected })
}
