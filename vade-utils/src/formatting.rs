/// Format a point balance with one decimal place (e.g. 5 -> "5.0").
pub fn format_points(points: f64) -> String {
    format!("{:.1}", points)
}

/// Format a naira amount with thousands separators (e.g. 12000.5 -> "₦12,000.50").
pub fn format_naira(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-₦{}.{:02}", grouped, fraction)
    } else {
        format!("₦{}.{:02}", grouped, fraction)
    }
}

/// Percentage of `current` toward `target`, clamped to [0, 100].
pub fn progress_percent(current: f64, target: f64) -> u8 {
    if target <= 0.0 {
        return 100;
    }

    let ratio = (current / target).clamp(0.0, 1.0);
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::{format_naira, format_points, progress_percent};

    #[test]
    fn points_use_one_decimal() {
        assert_eq!(format_points(0.0), "0.0");
        assert_eq!(format_points(5.0), "5.0");
        assert_eq!(format_points(12.34), "12.3");
    }

    #[test]
    fn naira_amounts_are_grouped() {
        assert_eq!(format_naira(0.0), "₦0.00");
        assert_eq!(format_naira(500.0), "₦500.00");
        assert_eq!(format_naira(5000.0), "₦5,000.00");
        assert_eq!(format_naira(12000.5), "₦12,000.50");
        assert_eq!(format_naira(1234567.89), "₦1,234,567.89");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(0.0, 5000.0), 0);
        assert_eq!(progress_percent(2500.0, 5000.0), 50);
        assert_eq!(progress_percent(7500.0, 5000.0), 100);
        assert_eq!(progress_percent(100.0, 0.0), 100);
    }
}
