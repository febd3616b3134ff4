// Number and text formatters
//
// Shared formatting utilities for displaying values in the TUI.

use unicode_width::UnicodeWidthChar;

/// Format a large number with commas for readability
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::new();

    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }

    result
}

/// Format a number compactly with K/M suffixes
pub fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Format a checkout amount given in the smallest currency unit
///
/// NGN amounts come in kobo and are shown without decimals; other
/// currencies keep two.
pub fn format_amount(amount: u64, currency: &str) -> String {
    match currency {
        "NGN" => format!("₦{}", format_number(amount / 100)),
        "USD" => format!("${}.{:02}", format_number(amount / 100), amount % 100),
        other => format!("{} {}.{:02}", other, format_number(amount / 100), amount % 100),
    }
}

/// Truncate a string to at most `max_width` display columns, appending `…`
/// when anything was cut. Width-aware so CJK and emoji don't overflow cells.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0usize;
    let mut out = String::new();

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += ch_width;
        out.push(ch);
    }

    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_compact_number() {
        assert_eq!(format_compact_number(954), "954");
        assert_eq!(format_compact_number(954_356), "954K");
        assert_eq!(format_compact_number(1_500_000), "1.5M");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_500_000, "NGN"), "₦15,000");
        assert_eq!(format_amount(2_950, "USD"), "$29.50");
    }

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate_to_width("/api/users", 20), "/api/users");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        let truncated = truncate_to_width("/api/very/long/endpoint/path", 10);
        assert!(truncated.ends_with('…'));
        assert!(truncated.chars().count() <= 10);
    }
}
