use crate::types::datatype::TypeFamily;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Int(i32),
    BigInt(i64),
    Decimal(Decimal),
    Double(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Text(String),
    Binary(Vec<u8>),
}

impl TypedValue {
    /// Whether a column of `family` can hold this value.
    pub fn fits(&self, family: TypeFamily) -> bool {
        match family {
            TypeFamily::Integer | TypeFamily::SmallInteger | TypeFamily::TinyInteger => {
                match (self, family.int_bounds()) {
                    (TypedValue::Int(n), Some((min, max))) => (min..=max).contains(&i64::from(*n)),
                    _ => false,
                }
            }
            TypeFamily::BigInteger => matches!(self, TypedValue::Int(_) | TypedValue::BigInt(_)),
            TypeFamily::Decimal => matches!(self, TypedValue::Decimal(_)),
            TypeFamily::Float => matches!(self, TypedValue::Double(_)),
            TypeFamily::Boolean => matches!(self, TypedValue::Bool(_)),
            TypeFamily::DateTime => matches!(self, TypedValue::DateTime(_)),
            TypeFamily::Text => matches!(self, TypedValue::Text(_)),
            TypeFamily::Binary => matches!(self, TypedValue::Binary(_)),
            TypeFamily::Other => true,
        }
    }
}

pub fn value_to_string(v: &TypedValue) -> String {
    match v {
        TypedValue::Int(n) => n.to_string(),
        TypedValue::BigInt(n) => n.to_string(),
        TypedValue::Decimal(d) => d.normalize().to_string(),
        TypedValue::Double(f) => f.to_string(),
        TypedValue::Bool(b) => b.to_string(),
        TypedValue::DateTime(ts) if ts.nanosecond() == 0 => {
            ts.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        TypedValue::DateTime(ts) => ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        TypedValue::Text(s) => s.clone(),
        TypedValue::Binary(b) => STANDARD.encode(b),
    }
}
