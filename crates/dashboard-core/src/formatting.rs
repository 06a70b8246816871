//! Number formatting shared by the table views, chart labels and the
//! plain-text summary.

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(48_210.5, 1), "48,210.5");
/// assert_eq!(format_number(1_250_000.0, 0), "1,250,000");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-3_120.75, 2), "-3,120.75");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by one ULP at the target precision so binary midpoints such as
    // 1.005 round the way they read.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let scaled = ((abs_value * factor) + epsilon).round() as u64;

    let divisor = 10_u64.pow(decimals);
    let grouped = group_thousands(&(scaled / divisor).to_string());

    let body = if decimals == 0 {
        grouped
    } else {
        format!(
            "{}.{:0width$}",
            grouped,
            scaled % divisor,
            width = decimals as usize
        )
    };

    if negative && scaled != 0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a revenue amount in dollars with two decimals.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(5_053.97), "$5,053.97");
/// assert_eq!(format_currency(0.0), "$0.00");
/// assert_eq!(format_currency(-12.5), "-$12.50");
/// ```
pub fn format_currency(amount: f64) -> String {
    let digits = format_number(amount.abs(), 2);
    if amount < 0.0 && digits != "0.00" {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Format a value with a short magnitude suffix for chart axes and bar labels.
///
/// * `< 1 000`         → `"950"`
/// * `< 1 000 000`     → `"12.5K"`
/// * `< 1 000 000 000` → `"2.3M"`
/// * otherwise         → `"1.2B"`
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(12_500.0), "12.5K");
/// assert_eq!(format_compact(2_340_000.0), "2.3M");
/// assert_eq!(format_compact(-1_500.0), "-1.5K");
/// ```
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs < 1_000.0 {
        format!("{}{:.0}", sign, abs)
    } else if abs < 1_000_000.0 {
        format!("{}{:.1}K", sign, abs / 1_000.0)
    } else if abs < 1_000_000_000.0 {
        format!("{}{:.1}M", sign, abs / 1_000_000.0)
    } else {
        format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` when `whole` is zero.
///
/// ```
/// use dashboard_core::formatting::percentage;
///
/// assert!((percentage(1.0, 3.0, 1) - 33.3).abs() < 1e-9);
/// assert_eq!(percentage(4.0, 0.0, 1), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Percentage label with one decimal, e.g. `"52.4%"`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 1))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert a comma every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_below_thousand() {
        assert_eq!(format_number(267.224, 2), "267.22");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(12_345.0, 0), "12,345");
        assert_eq!(format_number(123_456_789.0, 0), "123,456,789");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-5_053.97, 2), "-5,053.97");
    }

    #[test]
    fn test_format_number_negative_rounds_to_zero() {
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number_midpoint_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    #[test]
    fn test_format_number_carries_into_integer_part() {
        assert_eq!(format_number(999.996, 2), "1,000.00");
    }

    #[test]
    fn test_format_number_keeps_leading_fraction_zeros() {
        assert_eq!(format_number(3.05, 2), "3.05");
        assert_eq!(format_number(0.09, 3), "0.090");
    }

    // ── format_currency ──────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_positive() {
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-9.99), "-$9.99");
    }

    // ── format_compact ───────────────────────────────────────────────────────

    #[test]
    fn test_format_compact_small() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(999.0), "999");
    }

    #[test]
    fn test_format_compact_thousands() {
        assert_eq!(format_compact(1_000.0), "1.0K");
        assert_eq!(format_compact(48_210.5), "48.2K");
    }

    #[test]
    fn test_format_compact_millions_and_billions() {
        assert_eq!(format_compact(7_260_000.0), "7.3M");
        assert_eq!(format_compact(1_200_000_000.0), "1.2B");
    }

    #[test]
    fn test_format_compact_negative() {
        assert_eq!(format_compact(-2_500.0), "-2.5K");
        assert_eq!(format_compact(-12.0), "-12");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_share() {
        let p = percentage(3.0, 8.0, 1);
        assert!((p - 37.5).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 1), 0.0);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(52.4), "52.4%");
        assert_eq!(format_percent(100.0), "100.0%");
    }
}
