//! Prefix number parsing for form text.
//!
//! Lab sheets get typed with units and stray suffixes ("20V", "3 cases"), so
//! both parsers read the longest numeric prefix and ignore the rest.

/// Leading integer of `text`, after leading whitespace and an optional sign.
/// A `0x`/`0X` prefix switches to hexadecimal. `None` when no digit follows.
///
/// Values too large for `i64` saturate.
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, s) = split_sign(s);

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }

    seen.then_some(if negative { -value } else { value })
}

/// Leading decimal number of `text`, after leading whitespace. Accepts an
/// optional sign, digits with an optional fraction, an optional exponent,
/// or the literal `Infinity`. NaN when no prefix matches.
pub fn leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let (negative, rest) = split_sign(s);
    let sign = if negative { -1.0 } else { 1.0 };

    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let end = float_prefix_len(rest);
    if end == 0 {
        return f64::NAN;
    }
    rest[..end]
        .parse::<f64>()
        .map_or(f64::NAN, |v| sign * v)
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Byte length of the unsigned decimal literal at the start of `s`, or 0.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();

    let int_digits = digit_run(bytes, 0);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    // The exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_digits = digit_run(bytes, exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}
