//! Fixed-locale number formatting for value badges
//!
//! Values are shown with thousands grouping and at most two fractional
//! digits. The same two-digit rounding decides whether a value change is
//! visible at all (see `core::memo`).

/// Separator pair used when printing numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group: char,
    pub decimal: char,
}

/// The locale every badge is printed in
pub const EN_US: NumberLocale = NumberLocale {
    group: ',',
    decimal: '.',
};

/// Round to the displayed precision
///
/// Agrees with the badge text: two values round equal iff they print the
/// same.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let (negative, whole, frac) = rounded_parts(value);
    let text = if frac.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, frac)
    };
    let magnitude: f64 = text.parse().unwrap_or(value.abs());
    if negative { -magnitude } else { magnitude }
}

/// Format `value` in the badge locale
pub fn format_value(value: f64) -> String {
    format_value_in(value, EN_US)
}

/// Format `value` with the given separators, dropping trailing zero digits
pub fn format_value_in(value: f64, locale: NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (negative, whole, frac) = rounded_parts(value);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(&whole, locale.group));
    if !frac.is_empty() {
        out.push(locale.decimal);
        out.push_str(&frac);
    }
    out
}

/// Split a finite value into (negative, integer digits, fraction digits),
/// rounded half away from zero to two places on its shortest decimal form.
/// Trailing zero fraction digits are dropped.
fn rounded_parts(value: f64) -> (bool, String, String) {
    // Display never uses exponent notation and keeps every integer digit
    let text = format!("{}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let to_text = |ds: &[u8]| ds.iter().map(|&d| char::from(b'0' + d)).collect::<String>();
    let whole = to_text(&digits[..split]);
    let frac = to_text(&digits[split..]).trim_end_matches('0').to_string();
    (value.is_sign_negative(), whole, frac)
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.001), 1.0);
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(-2.346), -2.35);
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(0.285), 0.29);
        assert_eq!(round2(1e21), 1e21);
    }

    #[test]
    fn test_format_rounds_shortest_decimal() {
        // Binary expansions sit just below the half: 1.00499.., 0.28499..
        assert_eq!(format_value(1.005), "1.01");
        assert_eq!(format_value(0.285), "0.29");
        assert_eq!(format_value(9.995), "10");
        assert_eq!(format_value(99_999.999), "100,000");
        assert_eq!(format_value(0.0001), "0");
    }

    #[test]
    fn test_format_large_magnitudes() {
        assert_eq!(format_value(1e21), "1,000,000,000,000,000,000,000");
        assert_eq!(format_value(-1e15), "-1,000,000,000,000,000");
        assert_eq!(format_value(12_345_678.9), "12,345,678.9");
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(1.25), "1.25");
        assert_eq!(format_value(1.004), "1");
        assert_eq!(format_value(3.999), "4");
    }

    #[test]
    fn test_format_grouping() {
        assert_eq!(format_value(1234.5), "1,234.5");
        assert_eq!(format_value(1_000_000.0), "1,000,000");
        assert_eq!(format_value(999.0), "999");
        assert_eq!(format_value(-12345.678), "-12,345.68");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "∞");
        assert_eq!(format_value(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_format_custom_locale() {
        let de = NumberLocale {
            group: '.',
            decimal: ',',
        };
        assert_eq!(format_value_in(1234.5, de), "1.234,5");
    }
}
