// src/extract/dates.rs

use chrono::Month;
use tracing::warn;

use super::words::year_to_words;
use super::Anomaly;

/// Placeholder written into the month slot when the month name is unknown.
pub const UNKNOWN_MONTH: &str = "undefined";

static MONTH_NUMBERS: [(&str, &str); 12] = [
    ("january", "01"),
    ("february", "02"),
    ("march", "03"),
    ("april", "04"),
    ("may", "05"),
    ("june", "06"),
    ("july", "07"),
    ("august", "08"),
    ("september", "09"),
    ("october", "10"),
    ("november", "11"),
    ("december", "12"),
];

static DAY_ORDINALS: [&str; 31] = [
    "First",
    "Second",
    "Third",
    "Fourth",
    "Fifth",
    "Sixth",
    "Seventh",
    "Eighth",
    "Ninth",
    "Tenth",
    "Eleventh",
    "Twelfth",
    "Thirteenth",
    "Fourteenth",
    "Fifteenth",
    "Sixteenth",
    "Seventeenth",
    "Eighteenth",
    "Nineteenth",
    "Twentieth",
    "Twenty-first",
    "Twenty-second",
    "Twenty-third",
    "Twenty-fourth",
    "Twenty-fifth",
    "Twenty-sixth",
    "Twenty-seventh",
    "Twenty-eighth",
    "Twenty-ninth",
    "Thirtieth",
    "Thirty-first",
];

/// Two-digit month number for a month name, case-insensitive.
pub fn month_number(name: &str) -> Option<&'static str> {
    MONTH_NUMBERS
        .iter()
        .find(|(month, _)| month.eq_ignore_ascii_case(name))
        .map(|(_, number)| *number)
}

/// Ordinal word for a day of the month (1-based).
pub fn day_ordinal(day: usize) -> Option<&'static str> {
    DAY_ORDINALS.get(day.checked_sub(1)?).copied()
}

/// Rewrite `"<day> <month-name> <year>"` into `DD/MM/YYYY`.
///
/// Never fails: an unknown month name leaves `undefined` in the month slot and
/// is pushed onto `anomalies` under `field`. Empty input stays empty.
pub fn canonicalize_date(raw: &str, field: &str, anomalies: &mut Vec<Anomaly>) -> String {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let Some(day) = tokens.first() else {
        return String::new();
    };
    let month_token = tokens.get(1).map_or("", |t| t.trim_end_matches(','));
    let year = tokens.get(2).copied().unwrap_or_default();

    let month = match month_number(month_token) {
        Some(number) => number,
        None => {
            warn!(field, token = month_token, raw, "unrecognized month name");
            anomalies.push(Anomaly::UnrecognizedMonthName {
                field: field.to_string(),
                token: month_token.to_string(),
            });
            UNKNOWN_MONTH
        }
    };

    format!("{:0>2}/{}/{}", day, month, year)
}

/// Render a canonical `DD/MM/YYYY` date as prose, e.g.
/// `"Fifth of May Nineteen Ninety"`. `None` if the date does not parse.
pub fn date_to_words(canonical: &str) -> Option<String> {
    let mut parts = canonical.trim().split('/');
    let day: usize = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let year: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let day_word = day_ordinal(day)?;
    let month_name = Month::try_from(month).ok()?.name();
    Some(format!("{} of {} {}", day_word, month_name, year_to_words(year)))
}
