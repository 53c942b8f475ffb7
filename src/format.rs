//! Number formatting shared by status messages and the display formatter.

/// Format an unsigned count with `,` thousands separators (`20000` -> `20,000`)
pub fn format_count(count: usize) -> String {
    group_digits(&count.to_string())
}

/// Format a signed integer with `,` thousands separators
pub fn format_integer(value: i64) -> String {
    let digits = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Format a float with grouped integer digits and a fixed number of decimals
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut result = String::new();
    if value.is_sign_negative() && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.push('-');
    }
    result.push_str(&group_digits(whole));
    if let Some(fraction) = fraction {
        result.push('.');
        result.push_str(fraction);
    }
    result
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_should_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(5), "5");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(20000), "20,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn format_integer_should_keep_sign_outside_groups() {
        assert_eq!(format_integer(-1234), "-1,234");
        assert_eq!(format_integer(-12), "-12");
        assert_eq!(format_integer(123456), "123,456");
    }

    #[test]
    fn format_decimal_should_round_and_group() {
        assert_eq!(format_decimal(1234.5, 4), "1,234.5000");
        assert_eq!(format_decimal(-0.00001, 4), "0.0000");
        assert_eq!(format_decimal(-9876543.21, 2), "-9,876,543.21");
        assert_eq!(format_decimal(3.0, 0), "3");
    }
}
