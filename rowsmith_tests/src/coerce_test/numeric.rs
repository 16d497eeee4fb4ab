use super::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

proptest! {
    #[test]
    fn every_i32_reads_back(n in any::<i32>()) {
        prop_assert_eq!(ok(&n.to_string(), "int"), TypedValue::Int(n));
    }

    #[test]
    fn values_beyond_i32_are_out_of_range(n in (i32::MAX as i64 + 1)..=i64::MAX) {
        prop_assert_eq!(
            failure(&n.to_string(), "int"),
            CoercionFailure::OutOfRange { expected: "int" }
        );
    }
}

#[test]
fn int_accepts_surrounding_whitespace() {
    assert_eq!(ok(" 42 ", "int"), TypedValue::Int(42));
    assert_eq!(ok("-7", "INT"), TypedValue::Int(-7));
}

#[test]
fn int_rejects_fractions_and_words() {
    assert!(matches!(failure("4.5", "int"), CoercionFailure::Malformed { .. }));
    assert!(matches!(failure("forty", "int"), CoercionFailure::Malformed { .. }));
    assert!(matches!(failure("", "int"), CoercionFailure::Malformed { .. }));
}

#[test]
fn smallint_is_sixteen_bit() {
    assert_eq!(ok("12", "smallint"), TypedValue::Int(12));
    assert_eq!(ok("-32768", "SMALLINT"), TypedValue::Int(-32768));
    assert_eq!(
        failure("70000", "smallint"),
        CoercionFailure::OutOfRange { expected: "smallint" }
    );
    assert_eq!(
        failure("-32769", "smallint"),
        CoercionFailure::OutOfRange { expected: "smallint" }
    );
}

#[test]
fn tinyint_is_unsigned_byte() {
    assert_eq!(ok("0", "tinyint"), TypedValue::Int(0));
    assert_eq!(ok("255", "tinyint"), TypedValue::Int(255));
    assert_eq!(
        failure("-5", "tinyint"),
        CoercionFailure::OutOfRange { expected: "tinyint" }
    );
    assert_eq!(
        failure("256", "tinyint"),
        CoercionFailure::OutOfRange { expected: "tinyint" }
    );
    assert!(matches!(failure("x", "tinyint"), CoercionFailure::Malformed { .. }));
}

#[test]
fn bigint_takes_64_bit_values() {
    assert_eq!(ok("9223372036854775807", "bigint"), TypedValue::BigInt(i64::MAX));
    assert_eq!(
        failure("9223372036854775808", "bigint"),
        CoercionFailure::OutOfRange { expected: "bigint" }
    );
}

#[test]
fn decimal_keeps_exact_digits() {
    let v = ok("1234.50", "decimal(10,2)");
    assert_eq!(v, TypedValue::Decimal(Decimal::from_str("1234.50").unwrap()));
    assert_eq!(value_to_string(&v), "1234.5");
    assert_eq!(ok("-0.001", "numeric"), TypedValue::Decimal(Decimal::from_str("-0.001").unwrap()));
    assert_eq!(ok("3", "money"), TypedValue::Decimal(Decimal::from(3)));
}

#[test]
fn decimal_rejects_text() {
    assert!(matches!(failure("12,5", "decimal"), CoercionFailure::Malformed { .. }));
    assert!(matches!(failure("abc", "decimal"), CoercionFailure::Malformed { .. }));
}

#[test]
fn float_reads_scientific_notation() {
    assert_eq!(ok("2.5e-3", "float"), TypedValue::Double(0.0025));
    assert_eq!(ok("-1", "real"), TypedValue::Double(-1.0));
}

#[test]
fn float_rejects_non_numbers() {
    assert!(matches!(failure("one", "float"), CoercionFailure::Malformed { .. }));
    assert!(matches!(failure("inf", "float"), CoercionFailure::OutOfRange { .. }));
}
