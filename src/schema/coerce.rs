/* src/schema/coerce.rs */

//!
//! String-to-value coercion shared by the defaults and environment layers.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;
use std::time::Duration;

/// Errors raised when a raw string does not fit the target field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
	#[error("invalid boolean {0:?}")]
	Bool(String),

	#[error("invalid integer {input:?}: {source}")]
	Int {
		input: String,
		#[source]
		source: ParseIntError,
	},

	#[error("invalid float {input:?}: {source}")]
	Float {
		input: String,
		#[source]
		source: ParseFloatError,
	},

	/// `inf` and `NaN` cannot be written back to a configuration file.
	#[error("non-finite float {0:?}")]
	NonFiniteFloat(String),

	#[error("invalid duration {input:?}: {reason}")]
	Duration { input: String, reason: &'static str },
}

/// Parses the boolean spellings accepted by the binder.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
	match raw {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
		_ => Err(CoerceError::Bool(raw.to_string())),
	}
}

/// Parses a base-10 integer into the exact target width.
pub fn parse_int<N>(raw: &str) -> Result<N, CoerceError>
where
	N: FromStr<Err = ParseIntError>,
{
	raw.parse().map_err(|source| CoerceError::Int {
		input: raw.to_string(),
		source,
	})
}

/// Parses a base-10 float, rejecting results that are infinite or NaN.
pub fn parse_float<N>(raw: &str) -> Result<N, CoerceError>
where
	N: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
	let value: N = raw.parse().map_err(|source| CoerceError::Float {
		input: raw.to_string(),
		source,
	})?;
	if !value.into().is_finite() {
		return Err(CoerceError::NonFiniteFloat(raw.to_string()));
	}
	Ok(value)
}

/// Coerces a duration field: integer nanoseconds first, duration literal on failure.
pub fn coerce_duration(raw: &str) -> Result<Duration, CoerceError> {
	match raw.parse::<i64>() {
		Ok(nanos) => u64::try_from(nanos)
			.map(Duration::from_nanos)
			.map_err(|_| duration_error(raw, "negative duration")),
		Err(_) => parse_duration(raw),
	}
}

/// Splits a comma-separated list, trimming each element.
pub fn split_list(raw: &str) -> Vec<String> {
	raw.split(',').map(|part| part.trim().to_string()).collect()
}

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

// Fraction digits beyond this scale cannot change the result.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
	match unit {
		"ns" => Some(NANOSECOND),
		"us" | "µs" | "μs" => Some(MICROSECOND),
		"ms" => Some(MILLISECOND),
		"s" => Some(SECOND),
		"m" => Some(MINUTE),
		"h" => Some(HOUR),
		_ => None,
	}
}

fn duration_error(raw: &str, reason: &'static str) -> CoerceError {
	CoerceError::Duration {
		input: raw.to_string(),
		reason,
	}
}

/// Parses a duration literal such as `300ms`, `1.5h` or `1h30m`.
///
/// The grammar is a sequence of decimal numbers, each followed by a unit
/// (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`), with an optional leading sign.
/// A bare `0` is accepted. Negative results are rejected.
pub fn parse_duration(raw: &str) -> Result<Duration, CoerceError> {
	let (negative, mut rest) = match raw.as_bytes().first() {
		Some(b'-') => (true, &raw[1..]),
		Some(b'+') => (false, &raw[1..]),
		_ => (false, raw),
	};

	if rest == "0" {
		return Ok(Duration::ZERO);
	}
	if rest.is_empty() {
		return Err(duration_error(raw, "empty duration"));
	}

	let mut total: u128 = 0;
	while !rest.is_empty() {
		let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
		let mut whole: u128 = 0;
		for digit in rest[..digits].bytes() {
			whole = whole
				.checked_mul(10)
				.and_then(|v| v.checked_add(u128::from(digit - b'0')))
				.ok_or_else(|| duration_error(raw, "duration out of range"))?;
		}
		rest = &rest[digits..];

		let mut fraction: u128 = 0;
		let mut scale: u128 = 1;
		let mut fraction_digits = 0;
		if let Some(after_dot) = rest.strip_prefix('.') {
			fraction_digits = after_dot.bytes().take_while(u8::is_ascii_digit).count();
			for digit in after_dot[..fraction_digits].bytes() {
				if scale < MAX_FRACTION_SCALE {
					fraction = fraction * 10 + u128::from(digit - b'0');
					scale *= 10;
				}
			}
			rest = &after_dot[fraction_digits..];
		}

		if digits == 0 && fraction_digits == 0 {
			return Err(duration_error(raw, "expected a number"));
		}

		let unit_len = rest
			.find(|c: char| c == '.' || c.is_ascii_digit())
			.unwrap_or(rest.len());
		if unit_len == 0 {
			return Err(duration_error(raw, "missing unit"));
		}
		let unit = unit_nanos(&rest[..unit_len]).ok_or_else(|| duration_error(raw, "unknown unit"))?;
		rest = &rest[unit_len..];

		let part = whole
			.checked_mul(unit)
			.and_then(|v| v.checked_add(fraction * unit / scale))
			.ok_or_else(|| duration_error(raw, "duration out of range"))?;
		total = total
			.checked_add(part)
			.ok_or_else(|| duration_error(raw, "duration out of range"))?;
	}

	if negative && total > 0 {
		return Err(duration_error(raw, "negative duration"));
	}

	let nanos = u64::try_from(total).map_err(|_| duration_error(raw, "duration out of range"))?;
	Ok(Duration::from_nanos(nanos))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_duration_units() {
		assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
		assert_eq!(parse_duration("300ms").unwrap(), Duration::from_millis(300));
		assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
		assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
		assert_eq!(parse_duration("2us").unwrap(), Duration::from_micros(2));
		assert_eq!(parse_duration("2µs").unwrap(), Duration::from_micros(2));
		assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
		assert_eq!(parse_duration("+10ns").unwrap(), Duration::from_nanos(10));
	}

	#[test]
	fn test_parse_duration_zero() {
		assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
		assert_eq!(parse_duration("-0s").unwrap(), Duration::ZERO);
	}

	#[test]
	fn test_parse_duration_rejects() {
		for input in ["", "5", "s", "5x", "1h-5m", "-5s", ".s"] {
			assert!(
				matches!(parse_duration(input), Err(CoerceError::Duration { .. })),
				"{input:?} should be rejected"
			);
		}
	}

	#[test]
	fn test_coerce_duration_prefers_integer() {
		assert_eq!(coerce_duration("5").unwrap(), Duration::from_nanos(5));
		assert_eq!(coerce_duration("5s").unwrap(), Duration::from_secs(5));
		assert!(coerce_duration("-5").is_err());
		assert!(coerce_duration("five").is_err());
	}

	#[test]
	fn test_parse_float_rejects_non_finite() {
		assert_eq!(parse_float::<f64>("0.25").unwrap(), 0.25);
		for input in ["inf", "-inf", "NaN", "infinity"] {
			assert_eq!(
				parse_float::<f64>(input),
				Err(CoerceError::NonFiniteFloat(input.to_string()))
			);
		}
		// Overflows the narrower type.
		assert!(matches!(
			parse_float::<f32>("1e39"),
			Err(CoerceError::NonFiniteFloat(_))
		));
	}

	#[test]
	fn test_parse_bool_spellings() {
		for input in ["1", "t", "T", "TRUE", "true", "True"] {
			assert!(parse_bool(input).unwrap());
		}
		for input in ["0", "f", "F", "FALSE", "false", "False"] {
			assert!(!parse_bool(input).unwrap());
		}
		assert!(parse_bool("yes").is_err());
		assert!(parse_bool("tRUE").is_err());
	}
}
