use super::*;

#[test]
fn thousands_are_grouped() {
    assert_eq!(group_thousands(0.0), "0");
    assert_eq!(group_thousands(999.4), "999");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(1_234_567.8), "1,234,568");
    assert_eq!(group_thousands(-42_000.0), "-42,000");
    assert_eq!(group_thousands(f64::NAN), EMPTY);
}

#[test]
fn money_prefixes_currency() {
    assert_eq!(money(41_000.0, "USD"), "USD 41,000");
    assert_eq!(money(5.0, ""), "5");
}

#[test]
fn percent_drops_needless_decimals() {
    assert_eq!(percent(32.0), "32%");
    assert_eq!(percent(33.333), "33.3%");
    assert_eq!(percent(f64::INFINITY), EMPTY);
}

#[test]
fn or_dash_fills_blanks() {
    assert_eq!(or_dash(None), EMPTY);
    assert_eq!(or_dash(Some("  ")), EMPTY);
    assert_eq!(or_dash(Some("Pune")), "Pune");
}
