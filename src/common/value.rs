use std::borrow::Cow;

use serde_json::Value;

/// Largest magnitude below which every integer is exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Coerce a scalar property or cell to text.
/// Strings are borrowed, numbers and booleans are formatted, null and containers yield `None`.
/// Whole floats print without a fraction (`1001.0` reads as `"1001"`), since dBase numeric
/// fields and spreadsheet cells surface integer codes that way.
pub(crate) fn value_as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(match n.as_f64() {
            Some(x) if n.is_f64() && x.is_finite() && x.fract() == 0.0 && x.abs() < MAX_EXACT_INTEGER => {
                format!("{}", x as i64)
            }
            _ => n.to_string(),
        })),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Coerce a scalar property or cell to a finite number.
///
/// Numeric strings are accepted with surrounding whitespace and with a decimal comma
/// (`"0,42"`), which is how French-locale spreadsheets export fractions.
pub(crate) fn value_as_number(value: &Value) -> Option<f64> {
    let x = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s)?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() { return None }
    s.parse::<f64>().ok().or_else(|| {
        // Only a single decimal comma is treated as a separator.
        (s.matches(',').count() == 1 && !s.contains('.'))
            .then(|| s.replace(',', "."))
            .and_then(|t| t.parse::<f64>().ok())
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_from_scalars() {
        assert_eq!(value_as_text(&json!("FR-01")).as_deref(), Some("FR-01"));
        assert_eq!(value_as_text(&json!(12)).as_deref(), Some("12"));
        assert_eq!(value_as_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(value_as_text(&Value::Null), None);
        assert_eq!(value_as_text(&json!([1, 2])), None);
    }

    #[test]
    fn whole_floats_read_as_integers() {
        assert_eq!(value_as_text(&json!(1001.0)).as_deref(), Some("1001"));
        assert_eq!(value_as_text(&json!(-4.0)).as_deref(), Some("-4"));
        assert_eq!(value_as_text(&json!(-0.0)).as_deref(), Some("0"));
        assert_eq!(value_as_text(&json!(1.5)).as_deref(), Some("1.5"));
    }

    #[test]
    fn numbers_from_strings() {
        assert_eq!(value_as_number(&json!(" 0.42 ")), Some(0.42));
        assert_eq!(value_as_number(&json!("0,3")), Some(0.3));
        assert_eq!(value_as_number(&json!(0.25)), Some(0.25));
    }

    #[test]
    fn unparseable_numbers() {
        assert_eq!(value_as_number(&json!("")), None);
        assert_eq!(value_as_number(&json!("n/a")), None);
        assert_eq!(value_as_number(&json!("NaN")), None);
        assert_eq!(value_as_number(&json!("inf")), None);
        assert_eq!(value_as_number(&json!("1,2,3")), None);
        assert_eq!(value_as_number(&Value::Null), None);
    }
}
