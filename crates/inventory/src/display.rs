//! Indonesian-locale display helpers (IDR currency, short dates).

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format an amount as rupiah: `1234567.5` -> `"Rp 1.234.567,50"`.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    rounded = rounded.abs();
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}Rp {grouped},{frac}")
}

/// Format an RFC 3339 timestamp or `YYYY-MM-DD` date as `"5 Mar 2024"`.
///
/// Anything else is returned unchanged.
pub fn format_date(value: &str) -> String {
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match date {
        Ok(d) => format!("{} {} {}", d.day(), MONTHS_SHORT[d.month0() as usize], d.year()),
        Err(_) => value.to_string(),
    }
}
