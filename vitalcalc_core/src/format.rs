//! Shared parsing and display helpers.

use crate::ValidationError;
use chrono::{DateTime, Local, Utc};

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render a number with exactly one decimal ("2145.0", "22.9")
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Render a timestamp in local time as date plus hours and minutes
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Parse a gram amount, treating blank or unparseable text as 0
///
/// Trailing text after the number is ignored, so "12g" reads as 12.
pub fn parse_grams(raw: Option<&str>) -> f64 {
    raw.and_then(leading_number).unwrap_or(0.0)
}

/// Parse a body measurement, rejecting blank or unparseable text
///
/// Trailing text after the number is ignored, so "70kg" reads as 70.
pub fn parse_measurement(raw: Option<&str>) -> Result<f64, ValidationError> {
    raw.and_then(leading_number)
        .ok_or(ValidationError::InvalidMeasurement)
}

/// The finite decimal number at the start of `raw`, if there is one
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// exponent only when it is followed by digits.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
