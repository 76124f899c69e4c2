use std::sync::LazyLock;

use regex::Regex;

use crate::character::Ki;

const MILLION: f64 = 1_000_000.0;
const QUINTILLION: f64 = 1_000_000_000_000_000_000.0;

static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
		.expect("Decimal literal pattern must compile.")
});

/// Converts a raw ki into a comparable number.
///
/// The result is finite, positive infinity, or NaN. NaN is the "not comparable" sentinel and is
/// what every malformed input degrades to.
pub fn parse_ki(raw: &Ki) -> f64 {
	match raw {
		Ki::Number(value) => *value,
		Ki::Text(text) => parse_ki_str(text),
	}
}

pub fn parse_ki_str(raw: &str) -> f64 {
	let lower = raw.trim().to_lowercase();

	if lower.contains("million") {
		return leading_float(&lower) * MILLION;
	}
	if lower.contains("quintillion") {
		return leading_float(&lower) * QUINTILLION;
	}
	if lower.contains("infinit") {
		return f64::INFINITY;
	}
	if lower.contains("unknown") || lower.contains("unmeasurable") {
		return f64::NAN;
	}

	parse_number(raw)
}

pub fn is_comparable(value: f64) -> bool {
	!value.is_nan()
}

fn leading_float(text: &str) -> f64 {
	DECIMAL_PREFIX
		.find(text.trim_start())
		.and_then(|literal| literal.as_str().parse::<f64>().ok())
		.unwrap_or(f64::NAN)
}

// Whole-string parse with browser `Number(...)` leniency: blank is zero, radix prefixes allowed.
fn parse_number(raw: &str) -> f64 {
	let text = raw.trim();

	if text.is_empty() {
		return 0.0;
	}
	if let Some(value) = parse_radix_literal(text) {
		return value;
	}

	match DECIMAL_PREFIX.find(text) {
		Some(literal) if literal.end() == text.len() => text.parse::<f64>().unwrap_or(f64::NAN),
		_ => f64::NAN,
	}
}

fn parse_radix_literal(text: &str) -> Option<f64> {
	let prefix = text.get(..2)?.to_ascii_lowercase();
	let radix = match prefix.as_str() {
		"0x" => 16,
		"0o" => 8,
		"0b" => 2,
		_ => return None,
	};
	let digits = &text[2..];

	if digits.starts_with('+') {
		return Some(f64::NAN);
	}

	Some(u128::from_str_radix(digits, radix).map(|value| value as f64).unwrap_or(f64::NAN))
}
