// Utility helpers for coercion, dates and basic statistics.
//
// The reports API is loose about types: numbers arrive as JSON numbers, as
// strings with thousands separators, as null, or not at all. Everything that
// turns those into clean values lives here so the aggregation code can assume
// finite, non-negative numbers and typed dates.
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// Read a revenue or count typed by outlet staff, e.g. `"1,500,000"` or
/// `"12 500"`. Text such as `"n/a"` or `"1e5"` is rejected, as is anything
/// that parses to a non-finite value.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace([',', ' ', '_'], "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a loose JSON value as a number.
///
/// `None` means the value was absent, null, or blank; `Some(None)` means it
/// was present but not a number.
fn loose_number(v: Option<&Value>) -> Option<Option<f64>> {
    match v? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().filter(|f| f.is_finite())),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(parse_f64_safe(Some(s.as_str()))),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Some(None),
    }
}

/// Coerce a loose value to a finite non-negative number; anything else is 0.
pub fn coerce_amount(v: Option<&Value>) -> f64 {
    match loose_number(v).flatten() {
        Some(n) if n > 0.0 => n,
        _ => 0.0,
    }
}

/// Coerce a loose value to a non-negative count, rounding to the nearest integer.
pub fn coerce_count(v: Option<&Value>) -> u64 {
    // `as` saturates for values beyond u64::MAX.
    coerce_amount(v).round() as u64
}

/// Like [`coerce_amount`] but absent values fall back to `default`.
pub fn coerce_amount_or(v: Option<&Value>, default: f64) -> f64 {
    match loose_number(v) {
        None => default,
        Some(Some(n)) if n > 0.0 => n,
        Some(_) => 0.0,
    }
}

/// Render a loose value as trimmed text; numbers keep their JSON spelling.
pub fn coerce_text(v: Option<&Value>) -> Option<String> {
    let s = match v? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// True when a loose numeric field had to be zeroed or defaulted.
pub fn is_malformed_number(v: Option<&Value>) -> bool {
    match loose_number(v) {
        None => false,
        Some(Some(n)) => n < 0.0,
        Some(None) => true,
    }
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // The API has returned plain dates, RFC 3339 timestamps and local
    // datetimes; CSV exports from spreadsheets use day-first dates.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Short Indonesian-locale label such as `17 Agu`.
pub fn short_date_label(d: NaiveDate) -> String {
    format!("{} {}", d.day(), MONTHS_ID[d.month0() as usize])
}

pub fn round_to(n: f64, decimals: i32) -> f64 {
    // `f64::round` goes half away from zero, which is half-up for the
    // non-negative values we feed it.
    let factor = 10f64.powi(decimals);
    (n * factor).round() / factor
}

/// Zero-safe division.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Mean of per-report percentages; a day without reports averages to 0.
pub fn average(v: &[f64]) -> f64 {
    ratio(v.iter().sum(), v.len() as f64)
}

/// Rupiah-style amount for dashboard tiles: `1,234,567.89`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }
    out.push_str(&format_int(whole.parse::<u64>().unwrap_or(0)));
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Visitor and row counts with thousands separators.
pub fn format_int<T: ToFormattedString>(n: T) -> String {
    n.to_formatted_string(&Locale::en)
}

pub fn format_money(n: &f64) -> String {
    format_number(*n, 0)
}

pub fn format_percent(n: &f64) -> String {
    format!("{}%", format_number(*n, 1))
}
