//! Parse-and-validate for request bodies.
//!
//! Every function here only ever fails with [`AppError::InvalidInput`], so a
//! bad payload can never be mistaken for a storage problem.

use crate::errors::{AppError, AppResult};
use serde_json::Value;

pub const INVALID_MINUTES: &str = "Invalid minutes";
pub const INVALID_TARGET: &str = "Invalid target";
pub const TARGET_NOT_POSITIVE: &str = "Target must be > 0";

const I64_BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

/// Integer coercion: JSON integers, decimal strings, finite floats (truncated).
fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(f64::trunc)
                .filter(|f| *f >= -I64_BOUND && *f < I64_BOUND)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `{"minutes": ...}` for work/relax. A missing field counts as 0.
pub fn parse_minutes(body: &Value) -> AppResult<i64> {
    let obj = body
        .as_object()
        .ok_or_else(|| AppError::invalid_input(INVALID_MINUTES))?;

    match obj.get("minutes") {
        None => Ok(0),
        Some(v) => coerce_int(v).ok_or_else(|| AppError::invalid_input(INVALID_MINUTES)),
    }
}

/// `{"target": ...}`. The field is required; positivity is checked by the ledger.
pub fn parse_target(body: &Value) -> AppResult<i64> {
    body.as_object()
        .and_then(|obj| obj.get("target"))
        .and_then(coerce_int)
        .ok_or_else(|| AppError::invalid_input(INVALID_TARGET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(err: AppError) -> String {
        match err {
            AppError::InvalidInput(m) => m,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn minutes_accepts_integers_strings_and_floats() {
        assert_eq!(parse_minutes(&json!({"minutes": 45})).unwrap(), 45);
        assert_eq!(parse_minutes(&json!({"minutes": " 30 "})).unwrap(), 30);
        assert_eq!(parse_minutes(&json!({"minutes": 12.9})).unwrap(), 12);
        assert_eq!(parse_minutes(&json!({"minutes": -12.9})).unwrap(), -12);
        assert_eq!(parse_minutes(&json!({"minutes": -20})).unwrap(), -20);
    }

    #[test]
    fn missing_minutes_is_zero() {
        assert_eq!(parse_minutes(&json!({})).unwrap(), 0);
    }

    #[test]
    fn minutes_rejects_non_integers() {
        for bad in [
            json!({"minutes": "abc"}),
            json!({"minutes": "4.5"}),
            json!({"minutes": null}),
            json!({"minutes": true}),
            json!({"minutes": [1]}),
            json!({"minutes": 1e300}),
            json!({"minutes": 18446744073709551615u64}),
            json!([1, 2]),
            json!("45"),
        ] {
            assert_eq!(msg(parse_minutes(&bad).unwrap_err()), INVALID_MINUTES, "{bad}");
        }
    }

    #[test]
    fn target_is_required() {
        assert_eq!(msg(parse_target(&json!({})).unwrap_err()), INVALID_TARGET);
        assert_eq!(msg(parse_target(&json!({"target": null})).unwrap_err()), INVALID_TARGET);
        assert_eq!(msg(parse_target(&json!({"target": "x"})).unwrap_err()), INVALID_TARGET);
    }

    #[test]
    fn target_parses_without_range_check() {
        assert_eq!(parse_target(&json!({"target": 90})).unwrap(), 90);
        assert_eq!(parse_target(&json!({"target": "0"})).unwrap(), 0);
        assert_eq!(parse_target(&json!({"target": -5})).unwrap(), -5);
    }
}
