/// Format `amount` as US dollars with thousands separators, rounded to cents:
/// `1234.5` becomes `$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

/// Card title: the first `max` characters followed by an ellipsis.
pub fn truncate_name(name: &str, max: usize) -> String {
    let mut short: String = name.chars().take(max).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(3.0), "$3.00");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1_000_000.05), "$1,000,000.05");
        assert_eq!(format_usd(-12.3), "-$12.30");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Classic Leather Weekender Bag", 20), "Classic Leather Week...");
        assert_eq!(truncate_name("Mug", 20), "Mug...");
    }
}
