//! Coordinate tokens: fixed-point decoding and field scanning.
//!
//! Tokens are either plain decimals (`-1.25`) or fixed-width digit strings
//! whose decimal point is implied by a [`FormatSpec`]. Decoding never fails:
//! short tokens are padded, long tokens keep their rightmost digits and
//! anything non-numeric decodes to zero.

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Which end of a fixed-width number had its zeros omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroSuppression {
    /// Leading zeros omitted; pad on the left.
    Leading,
    /// Trailing zeros omitted; pad on the right.
    Trailing,
    /// No suppression declared. Short tokens are left-padded.
    None,
}

/// Digit layout of one coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// Digits before the implied decimal point.
    pub integer_digits: u8,
    /// Digits after the implied decimal point.
    pub decimal_digits: u8,
    /// Zero-suppression rule for short tokens.
    pub zero_suppression: ZeroSuppression,
}

impl FormatSpec {
    /// Creates a format spec.
    pub const fn new(
        integer_digits: u8,
        decimal_digits: u8,
        zero_suppression: ZeroSuppression,
    ) -> Self {
        Self {
            integer_digits,
            decimal_digits,
            zero_suppression,
        }
    }

    /// Full width of a token in this format.
    pub fn total_digits(&self) -> usize {
        usize::from(self.integer_digits) + usize::from(self.decimal_digits)
    }
}

impl Default for FormatSpec {
    /// `4.6` with leading-zero suppression, the layout KiCad writes.
    fn default() -> Self {
        Self::new(4, 6, ZeroSuppression::Leading)
    }
}

/// Decode a coordinate token into a signed value in file-native units.
///
/// A token containing `.` is parsed as a plain decimal and `format` is
/// ignored. Otherwise the digits are fitted to `format.total_digits()` and
/// the last `decimal_digits` of them become the fraction.
pub fn decode(token: &str, format: FormatSpec) -> f64 {
    let (sign, digits) = split_sign(token);

    if digits.contains('.') {
        return sign * digits.parse::<f64>().unwrap_or(0.0);
    }

    let fitted = fit_to_width(digits, format.total_digits(), format.zero_suppression);
    if fitted.is_empty() || !fitted.bytes().all(|b| b.is_ascii_digit()) {
        return 0.0;
    }

    let normalized = insert_decimal_point(&fitted, format.decimal_digits);
    sign * normalized.parse::<f64>().unwrap_or(0.0)
}

/// Find the first `letter` (any case) directly followed by a number and return
/// that number's text.
///
/// The number is an optional sign, optional integer digits, and an optional
/// `.` with fraction digits; at least one digit must be present. `X5.` yields
/// `5` and `X.5` yields `.5`. Occurrences of `letter` not followed by a
/// number are skipped.
pub fn find_field(line: &str, letter: char) -> Option<&str> {
    line.char_indices()
        .filter(|(_, ch)| ch.eq_ignore_ascii_case(&letter))
        .find_map(|(idx, ch)| {
            let start = idx + ch.len_utf8();
            line.get(start..).and_then(number_prefix)
        })
}

/// Longest leading number in `text`, using the same grammar as [`find_field`].
pub fn number_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_start = end;
    end += count_digits(bytes.get(end..).unwrap_or_default());
    let has_int = end > int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac = count_digits(bytes.get(end + 1..).unwrap_or_default());
        if frac > 0 {
            return text.get(..end + 1 + frac);
        }
    }

    if has_int {
        text.get(..end)
    } else {
        None
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn fit_to_width(digits: &str, total: usize, suppression: ZeroSuppression) -> String {
    let len = digits.chars().count();

    if len < total {
        return match suppression {
            ZeroSuppression::Trailing => format!("{digits:0<total$}"),
            ZeroSuppression::Leading | ZeroSuppression::None => format!("{digits:0>total$}"),
        };
    }

    // Over-long tokens silently lose their leftmost digits.
    if len > total && total > 0 {
        return digits.chars().skip(len - total).collect();
    }

    digits.to_string()
}

fn insert_decimal_point(digits: &str, decimal_digits: u8) -> String {
    let decimal_count = usize::from(decimal_digits);
    if decimal_count == 0 {
        return digits.to_string();
    }

    let split_index = digits.len().saturating_sub(decimal_count);
    let (int_part, frac_part) = digits.split_at(split_index);
    format!("{int_part}.{frac_part}")
}

fn split_sign(raw: &str) -> (f64, &str) {
    match (raw.strip_prefix('-'), raw.strip_prefix('+')) {
        (Some(rest), _) => (-1.0, rest),
        (None, Some(rest)) => (1.0, rest),
        (None, None) => (1.0, raw),
    }
}
