//! Pure display-formatting helpers for prices and discounts.
//!
//! Stateless conversions from raw numeric values to display-ready strings.
//! Price formatting follows Indian-rupee conventions: a `₹` prefix, two
//! decimal places, and Indian digit grouping where the last three integer
//! digits form one group and every group above it has two digits
//! (`1234567.5` → `"₹12,34,567.50"`).

/// Formats a raw price value for display in Indian-rupee notation.
#[must_use]
pub fn format_price(value: f64) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let rounded = format!("{:.2}", value.abs());
    let (integer, fraction) = rounded
        .split_once('.')
        .unwrap_or((rounded.as_str(), "00"));
    format!("{sign}₹{}.{fraction}", group_indian(integer))
}

/// Computes the rounded percentage discount between an original and a
/// current price.
///
/// Returns `0` when `original` is not a positive finite number, so records
/// without a known original price read as "no discount".
#[must_use]
pub fn discount_percent(original: f64, current: f64) -> i64 {
    if !original.is_finite() || original <= 0.0 || !current.is_finite() {
        return 0;
    }
    let percent = (original - current) / original * 100.0;
    percent.round() as i64
}

/// Applies Indian digit grouping to an unsigned integer string: the last
/// three digits form one group, every group above has two digits.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
