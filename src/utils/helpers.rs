//! Formatting helpers shared by the report and the export

/// Group digits of an integer nanosecond value: `1234567` -> `1,234,567`
pub fn group_digits<T: ToString>(value: T) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Right-align a nanosecond value to `width` columns with an `ns` suffix
pub fn pad_nanos<T: ToString>(value: T, width: usize) -> String {
    format!("{:>width$} ns", value.to_string(), width = width)
}

/// Horizontal rule used between report sections
pub fn separator(width: usize) -> String {
    "=".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits(0u64), "0");
        assert_eq!(group_digits(999u64), "999");
        assert_eq!(group_digits(1_000u64), "1,000");
        assert_eq!(group_digits(1_234_567u64), "1,234,567");
        assert_eq!(group_digits(u128::from(u64::MAX)), "18,446,744,073,709,551,615");
    }

    #[test]
    fn pads_like_the_summary_lines() {
        assert_eq!(pad_nanos(42u64, 6), "    42 ns");
    }
}
