use chrono::{Datelike, Days, Locale, NaiveDate, Weekday};

/// Locale for the human-facing long date form.
const DISPLAY_LOCALE: Locale = Locale::id_ID;

/// The date the next collection run is for: tomorrow, except on Saturday the
/// Sunday gap is skipped and the run lands on Monday.
pub fn collection_date(today: NaiveDate) -> NaiveDate {
    let days = if today.weekday() == Weekday::Sat { 2 } else { 1 };
    today + Days::new(days)
}

/// Storage key form, `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a storage key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Long display form, e.g. `Senin, 10 Maret 2025`.
pub fn display_date(date: NaiveDate) -> String {
    date.format_localized("%A, %-d %B %Y", DISPLAY_LOCALE)
        .to_string()
}
