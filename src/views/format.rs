//! Currency, date and bar formatting shared by every view.

use chrono::{DateTime, TimeZone, Utc};

/// Formats an amount as US currency with thousands separators, e.g.
/// `$1,234.50` or `-$12.00`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$--".to_string();
    }

    // Cast safety: amount is finite; values beyond u64 cents are not
    // meaningful prices and saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

/// Formats a point in time in the viewer's time zone, e.g.
/// `Oct 19, 2026, 2:05 PM`.
#[must_use]
pub fn format_date<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%b %-d, %Y, %-I:%M %p")
        .to_string()
}

/// Horizontal bar scaled against `peak`, e.g. `████████░░`.
#[must_use]
pub fn format_bar(value: f64, peak: f64, width: usize) -> String {
    let ratio = if peak > 0.0 && value > 0.0 {
        (value / peak).clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Cast safety: ratio ∈ [0, 1] and width is a small column count.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
