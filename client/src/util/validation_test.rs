use super::*;

#[test]
fn insert_keeps_first_message_per_key() {
    let mut errors = FieldErrors::new();
    errors.insert("budget_cap", "Budget is required");
    errors.insert("budget_cap", "Budget must be zero or greater");
    assert_eq!(errors.get("budget_cap"), Some("Budget is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn require_flags_blank_values_only() {
    let mut errors = FieldErrors::new();
    errors.require("client_name", "   ", "Client name");
    errors.require("project_name", "Atlas", "Project name");
    assert_eq!(errors.get("client_name"), Some("Client name is required"));
    assert!(!errors.contains("project_name"));
}

#[test]
fn into_result_reflects_emptiness() {
    assert_eq!(FieldErrors::new().into_result(), Ok(()));
    let mut errors = FieldErrors::new();
    errors.insert("x", "bad");
    assert!(errors.into_result().is_err());
}

#[test]
fn keys_are_sorted() {
    let mut errors = FieldErrors::new();
    errors.insert("start_date", "a");
    errors.insert("budget_cap", "b");
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["budget_cap", "start_date"]);
}

#[test]
fn is_percentage_bounds_are_inclusive() {
    assert!(is_percentage(0));
    assert!(is_percentage(100));
    assert!(!is_percentage(-1));
    assert!(!is_percentage(101));
}

#[test]
fn trimmed_len_counts_characters() {
    assert_eq!(trimmed_len("  héllo  "), 5);
}

#[test]
fn parse_number_distinguishes_missing_from_malformed() {
    assert_eq!(parse_number("  "), None);
    assert_eq!(parse_number("12.5"), Some(Ok(12.5)));
    assert_eq!(parse_number("abc"), Some(Err(())));
    assert_eq!(parse_number("inf"), Some(Err(())));
}

#[test]
fn parse_int_rejects_decimals() {
    assert_eq!(parse_int(" 3 "), Some(3));
    assert_eq!(parse_int("2.5"), None);
    assert_eq!(parse_int(""), None);
}

#[test]
fn rejected_input_keeps_text_and_last_good_value() {
    let mut rejected = RejectedInputs::default();
    let mut pct = 60;

    rejected.set_int("internal", "50.5", &mut pct);
    assert_eq!(pct, 60);
    assert!(rejected.contains("internal"));
    assert_eq!(rejected.text("internal", pct), "50.5");

    rejected.set_int("internal", "", &mut pct);
    assert_eq!(pct, 60);
    assert_eq!(rejected.text("internal", pct), "");

    rejected.set_int("internal", "45", &mut pct);
    assert_eq!(pct, 45);
    assert!(rejected.is_empty());
    assert_eq!(rejected.text("internal", pct), "45");
}
