//! Display formatting for money, percentages, and optional values.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Placeholder rendered for absent values.
pub const EMPTY: &str = "—";

/// `1234567.8` → `"1,234,568"` (whole units, thousands separated).
#[must_use]
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return EMPTY.to_owned();
    }
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && out != "0" { format!("-{out}") } else { out }
}

#[must_use]
pub fn money(value: f64, currency: &str) -> String {
    format!("{} {}", currency.trim(), group_thousands(value)).trim().to_owned()
}

/// Whole-number percentage with one decimal only when needed.
#[must_use]
pub fn percent(value: f64) -> String {
    if !value.is_finite() {
        return EMPTY.to_owned();
    }
    if (value - value.round()).abs() < 0.05 { format!("{value:.0}%") } else { format!("{value:.1}%") }
}

#[must_use]
pub fn or_dash(value: Option<&str>) -> String {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(EMPTY).to_owned()
}
