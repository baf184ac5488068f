/// Parse the longest numeric prefix of `text`, the same way a browser's `parseFloat` does. Leading whitespace is skipped, trailing garbage is ignored, and `Infinity` is recognized. Returns `None` if `text` does not start with a number.
pub fn parse_float(text: &str) -> Option<f64> {
	let text = text.trim_start();
	let bytes = text.as_bytes();
	let mut end = 0;
	if let Some(b'+') | Some(b'-') = bytes.first() {
		end += 1;
	}
	let sign_len = end;
	if text[sign_len..].starts_with("Infinity") {
		return Some(if text.starts_with('-') {
			f64::NEG_INFINITY
		} else {
			f64::INFINITY
		});
	}
	let integer_digits = count_digits(&bytes[end..]);
	end += integer_digits;
	let mut fraction_digits = 0;
	if bytes.get(end) == Some(&b'.') {
		fraction_digits = count_digits(&bytes[end + 1..]);
		if integer_digits > 0 || fraction_digits > 0 {
			end += 1 + fraction_digits;
		}
	}
	if integer_digits == 0 && fraction_digits == 0 {
		return None;
	}
	// The exponent only counts if at least one digit follows it.
	if let Some(b'e') | Some(b'E') = bytes.get(end) {
		let mut exponent_end = end + 1;
		if let Some(b'+') | Some(b'-') = bytes.get(exponent_end) {
			exponent_end += 1;
		}
		let exponent_digits = count_digits(&bytes[exponent_end..]);
		if exponent_digits > 0 {
			end = exponent_end + exponent_digits;
		}
	}
	text[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

/// Turn the raw text of a form field into the number sent to the service. Absent, empty and non-numeric text become 0.0, as do NaN and infinite values, which have no JSON representation. This never fails.
pub fn coerce_field_value(text: Option<&str>) -> f64 {
	match text.and_then(parse_float) {
		Some(value) if value.is_finite() && value != 0.0 => value,
		_ => 0.0,
	}
}

#[test]
fn test_parse_float() {
	assert_eq!(parse_float("150"), Some(150.0));
	assert_eq!(parse_float("28.5"), Some(28.5));
	assert_eq!(parse_float("  7"), Some(7.0));
	assert_eq!(parse_float(".5"), Some(0.5));
	assert_eq!(parse_float("5."), Some(5.0));
	assert_eq!(parse_float("-3.25"), Some(-3.25));
	assert_eq!(parse_float("+4"), Some(4.0));
	assert_eq!(parse_float("12abc"), Some(12.0));
	assert_eq!(parse_float("1e3"), Some(1000.0));
	assert_eq!(parse_float("1e"), Some(1.0));
	assert_eq!(parse_float("2E-1x"), Some(0.2));
	assert_eq!(parse_float("1.2.3"), Some(1.2));
	assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
	assert_eq!(parse_float("-Infinityx"), Some(f64::NEG_INFINITY));
	assert_eq!(parse_float(""), None);
	assert_eq!(parse_float("   "), None);
	assert_eq!(parse_float("abc"), None);
	assert_eq!(parse_float("."), None);
	assert_eq!(parse_float("-"), None);
	assert_eq!(parse_float("inf"), None);
	assert_eq!(parse_float("NaN"), None);
	assert_eq!(parse_float("0x10"), Some(0.0));
}

#[test]
fn test_coerce_field_value() {
	assert_eq!(coerce_field_value(Some("45")), 45.0);
	assert_eq!(coerce_field_value(Some("0.5")), 0.5);
	assert_eq!(coerce_field_value(Some("")), 0.0);
	assert_eq!(coerce_field_value(Some("abc")), 0.0);
	assert_eq!(coerce_field_value(None), 0.0);
	assert_eq!(coerce_field_value(Some("Infinity")), 0.0);
	// Negative zero is reported as plain zero.
	assert!(coerce_field_value(Some("-0")).is_sign_positive());
}
