use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Largest serial a spreadsheet will produce (9999-12-31).
const MAX_SPREADSHEET_SERIAL: f64 = 2_958_465.0;

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3,9})-(\d{4})$").unwrap());

static SERIAL_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(\.\d+)?$").unwrap());

/// Parse a date given as text: calendar formats, ISO timestamps, `Mon-YYYY`, or a
/// five-digit spreadsheet serial.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(d) = parse_month_year(text) {
        return Some(d);
    }

    if SERIAL_TEXT.is_match(text) {
        return text.parse::<f64>().ok().and_then(from_spreadsheet_serial);
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// `Sep-2018` (or `September-2018`) → 2018-09-01.
pub fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let caps = MONTH_YEAR.captures(text.trim())?;
    let month = month_from_name(caps.get(1)?.as_str())?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Month number for an English month name or any prefix of at least three letters.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim().to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(&lower))
        .map(|idx| idx as u32 + 1)
}

/// Days since 1899-12-30; any fractional (time-of-day) part is dropped.
pub fn from_spreadsheet_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SPREADSHEET_SERIAL {
        return None;
    }
    // Serial 25569 is 1970-01-01.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(chrono::Days::new(serial.floor() as u64))
}

/// Build a date from separate parts; day defaults to 1.
pub fn from_year_month(year: i64, month: i64, day: Option<i64>) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day.unwrap_or(1)).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
