//! Lenient numeric parsing at the boundary between raw user input and the
//! pricing core. Non-numeric input is never an error: it becomes 0.

/// Parse the longest leading decimal number in `raw`, or 0.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12.5kg"`
/// is 12.5 and `"abc"` is 0. Non-finite results (`"inf"`, overflow) are 0.
pub fn parse_decimal_or_zero(raw: &str) -> f64 {
    parse_leading_decimal(raw).unwrap_or(0.0)
}

/// Like [`parse_decimal_or_zero`] but keeps "nothing entered" distinct.
/// Used for optional fields such as the competitor price.
pub fn parse_optional_decimal(raw: &str) -> Option<f64> {
    parse_leading_decimal(raw)
}

fn parse_leading_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
