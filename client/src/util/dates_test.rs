use super::*;
use time::macros::date;

#[test]
fn parse_iso_date_accepts_trimmed_values() {
    assert_eq!(parse_iso_date(" 2026-03-09 "), Some(date!(2026 - 03 - 09)));
}

#[test]
fn parse_iso_date_rejects_garbage_and_impossible_days() {
    assert_eq!(parse_iso_date(""), None);
    assert_eq!(parse_iso_date("09/03/2026"), None);
    assert_eq!(parse_iso_date("2026-02-30"), None);
}

#[test]
fn format_iso_date_zero_pads() {
    assert_eq!(format_iso_date(date!(2026 - 01 - 05)), "2026-01-05");
}

#[test]
fn ends_before_start_only_when_both_parse() {
    assert!(ends_before_start("2026-05-10", "2026-05-09"));
    assert!(!ends_before_start("2026-05-10", "2026-05-10"));
    assert!(!ends_before_start("2026-05-10", ""));
    assert!(!ends_before_start("", "2026-05-09"));
}

#[test]
fn is_on_or_before_includes_reference_day() {
    let reference = date!(2026 - 10 - 16);
    assert!(is_on_or_before("2026-10-16", reference));
    assert!(is_on_or_before("2026-10-01", reference));
    assert!(!is_on_or_before("2026-10-17", reference));
    assert!(!is_on_or_before("not a date", reference));
}

#[test]
fn today_iso_round_trips_through_parser() {
    let today = today_iso();
    assert_eq!(today.len(), 10);
    assert!(parse_iso_date(&today).is_some());
}
