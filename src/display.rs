//! Presentation helpers for payroll users.
//!
//! Amounts are shown in Mexican pesos with two decimals and comma grouping;
//! timestamps use Spanish month abbreviations. These helpers are the only
//! place money is rounded to cents.

use chrono::{DateTime, Datelike, Timelike, Utc};
use rust_decimal::Decimal;

use crate::precision::round_currency;

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Formats an amount as MXN currency, e.g. `$15,000.00`.
///
/// # Examples
///
/// ```
/// use payroll_engine::display::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(15000)), "$15,000.00");
/// assert_eq!(format_currency(Decimal::from_str("616.438356").unwrap()), "$616.44");
/// assert_eq!(format_currency(Decimal::from_str("-1234.5").unwrap()), "-$1,234.50");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

/// Formats a timestamp as `16 oct 2026, 14:05` (UTC).
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let month = MONTHS[timestamp.month0() as usize];
    format!(
        "{} {} {}, {:02}:{:02}",
        timestamp.day(),
        month,
        timestamp.year(),
        timestamp.hour(),
        timestamp.minute()
    )
}
