//! FILENAME: core/cube-engine/src/format.rs
//! Display formatting for dashboard scalars.
//!
//! Amounts are two fixed decimals with thousands grouping and carry no
//! currency symbol; callers prefix whichever symbol their locale uses.

/// Formats a monetary amount: `1234567.891` -> `"1,234,567.89"`.
pub fn format_amount(value: f64) -> String {
    add_thousands_separator(&format!("{:.2}", value))
}

/// Formats a whole count with thousands grouping: `12345.0` -> `"12,345"`.
pub fn format_count(value: f64) -> String {
    add_thousands_separator(&format!("{:.0}", value))
}

/// Formats a percentage with one decimal: `42.35` -> `"42.3%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Inserts thousands separators into a plain numeric string.
fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(13_530_000.0), "13,530,000.00");
        assert_eq!(format_amount(1234.567), "1,234.57");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-1234.5), "-1,234.50");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(12345.0), "12,345");
        assert_eq!(format_count(7.0), "7");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(42.35), "42.3%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(150.0), "150.0%");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567"), "1,234,567");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("-1234.56"), "-1,234.56");
    }
}
