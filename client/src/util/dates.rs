//! Calendar-date helpers for form fields.
//!
//! Form inputs carry dates as `YYYY-MM-DD` strings (the HTML `date` input
//! format and the backend wire format); these helpers parse and compare them.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::Date;
use time::macros::format_description;

/// Parse a `YYYY-MM-DD` string, ignoring surrounding whitespace.
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// `true` when both dates parse and `end` falls strictly before `start`.
///
/// Unparseable or blank values are reported by required-field checks instead.
#[must_use]
pub fn ends_before_start(start: &str, end: &str) -> bool {
    match (parse_iso_date(start), parse_iso_date(end)) {
        (Some(start), Some(end)) => end < start,
        _ => false,
    }
}

/// `true` when `date` parses and is on or before `reference`.
#[must_use]
pub fn is_on_or_before(date: &str, reference: Date) -> bool {
    parse_iso_date(date).is_some_and(|d| d <= reference)
}

/// The user's current local calendar date.
pub fn today() -> Date {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let parts = (now.get_full_year() as i32, now.get_month() as u8 + 1, now.get_date() as u8);
        time::Month::try_from(parts.1)
            .ok()
            .and_then(|month| Date::from_calendar_date(parts.0, month, parts.2).ok())
            .unwrap_or_else(|| time::OffsetDateTime::UNIX_EPOCH.date())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        time::OffsetDateTime::now_utc().date()
    }
}

/// [`today`] formatted as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    format_iso_date(today())
}
