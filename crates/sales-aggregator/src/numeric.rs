//! Lenient numeric field parsing.
//!
//! Both parsers read the longest numeric prefix of a field and ignore whatever
//! follows it, so `"12 units"` is a quantity of 12 and `"50.0USD"` a revenue of
//! 50.0. A field with no numeric prefix at all is a [`NumberError`]; what an
//! aggregator does with that is decided by [`NumericPolicy`].

use crate::error::NumberError;

/// How aggregators treat a numeric field that failed to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// The field counts as NaN and poisons every sum it reaches.
    #[default]
    Propagate,
    /// The record is left out of the aggregate that needed the field.
    Skip,
}

impl NumericPolicy {
    /// Maps a parsed field to the value an aggregator should use, or `None`
    /// when the record must be skipped.
    pub fn resolve(self, parsed: Result<f64, NumberError>) -> Option<f64> {
        match (self, parsed) {
            (_, Ok(value)) => Some(value),
            (Self::Propagate, Err(_)) => Some(f64::NAN),
            (Self::Skip, Err(_)) => None,
        }
    }
}

fn split_sign(text: &str) -> (f64, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (-1.0, rest)
    } else {
        (1.0, text.strip_prefix('+').unwrap_or(text))
    }
}

fn digit_prefix_len(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parses the integer prefix of `text`.
///
/// A `0x` prefix selects hexadecimal. Fractions are dropped, not rounded.
pub fn parse_integer(text: &str) -> Result<f64, NumberError> {
    let (sign, unsigned) = split_sign(text.trim_start());

    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));

    let magnitude = match hex {
        Some(digits) => digits
            .chars()
            .map_while(|c| c.to_digit(16))
            .fold(None, |acc: Option<f64>, d| {
                Some(acc.unwrap_or(0.0) * 16.0 + f64::from(d))
            }),
        None => {
            let len = digit_prefix_len(unsigned);
            if len == 0 {
                None
            } else {
                unsigned[..len].parse::<f64>().ok()
            }
        }
    };

    magnitude
        .map(|value| sign * value)
        .ok_or_else(|| NumberError::new(text))
}

/// Parses the floating-point prefix of `text`.
///
/// Accepts an optional sign, `Infinity`, digits with an optional fraction and
/// an optional exponent.
pub fn parse_decimal(text: &str) -> Result<f64, NumberError> {
    let trimmed = text.trim_start();
    let (sign, unsigned) = split_sign(trimmed);

    if unsigned.starts_with("Infinity") {
        return Ok(sign * f64::INFINITY);
    }

    let bytes = unsigned.as_bytes();
    let int_len = digit_prefix_len(unsigned);
    let mut end = int_len;
    let mut frac_len = 0;

    if bytes.get(end) == Some(&b'.') {
        frac_len = digit_prefix_len(&unsigned[end + 1..]);
        end += 1 + frac_len;
    }

    if int_len + frac_len == 0 {
        return Err(NumberError::new(text));
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_len = digit_prefix_len(&unsigned[exp_start..]);
        if exp_len > 0 {
            end = exp_start + exp_len;
        }
    }

    unsigned[..end]
        .parse::<f64>()
        .map(|value| sign * value)
        .map_err(|_| NumberError::new(text))
}
