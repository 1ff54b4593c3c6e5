//! Loose value coercions for property values.
//!
//! Property values are [`serde_json::Value`]s. Attribute serialization
//! follows the loose rules of the scripting host the markup format comes
//! from: `0`, `""`, `false` and `null` are falsy, and values stringify the
//! way template literals would.

use serde_json::Value;

/// Whether `value` is truthy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Stringifies `value` for an attribute or text position.
pub fn to_display_string(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => match (n.as_i64(), n.as_u64()) {
			(Some(i), _) => i.to_string(),
			(None, Some(u)) => u.to_string(),
			_ => format_number(n.as_f64().unwrap_or(f64::NAN)),
		},
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|v| match v {
				Value::Null => String::new(),
				other => to_display_string(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => "[object Object]".to_string(),
	}
}

/// Formats a number the way text children render it.
///
/// Integral values print without a fractional part, `-0` prints as `0`,
/// and non-finite values use their conventional names.
pub fn format_number(n: f64) -> String {
	if n.is_nan() {
		return "NaN".to_string();
	}
	if n.is_infinite() {
		return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
	}
	if n == 0.0 {
		return "0".to_string();
	}
	if n.fract() == 0.0 && n.abs() < 1e21 {
		return format!("{:.0}", n);
	}
	format!("{}", n)
}
