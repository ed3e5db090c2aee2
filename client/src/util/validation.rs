//! Field-keyed validation error maps shared by every form.
//!
//! DESIGN
//! ======
//! Forms validate locally before anything is sent. Each failure is recorded
//! under the field key the view renders it next to (`"budget_cap"`,
//! `"roles.0.role_name"`); only the first message per key is kept.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

/// Ordered map from field key to its first validation message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `key` unless the key already has one.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.entry(key.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Record "`label` is required" when `value` is blank.
    pub fn require(&mut self, key: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.insert(key, format!("{label} is required"));
        }
    }
}

/// Whole-number percentage bounds enforced on every allocation field.
#[must_use]
pub fn is_percentage(value: i32) -> bool {
    (0..=100).contains(&value)
}

/// Number of characters after trimming surrounding whitespace.
#[must_use]
pub fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Parse a decimal form input, treating blanks as absent.
///
/// Returns `Some(Err(()))` for non-numeric input so callers can distinguish
/// "missing" from "malformed".
#[must_use]
pub fn parse_number(raw: &str) -> Option<Result<f64, ()>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or(()))
}

/// Parse an integer form input; blanks and garbage become `None`.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Text of integer inputs that did not parse, keyed by field name.
///
/// The numeric field keeps its last good value while the typed text is held
/// here, so a cleared or decimal entry is reported instead of becoming 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectedInputs(BTreeMap<&'static str, String>);

impl RejectedInputs {
    /// Parse `raw` into `slot`, or remember `raw` and leave `slot` unchanged.
    pub fn set_int(&mut self, field: &'static str, raw: &str, slot: &mut i32) {
        match parse_int(raw) {
            Some(value) => {
                *slot = value;
                self.0.remove(field);
            }
            None => {
                self.0.insert(field, raw.to_owned());
            }
        }
    }

    /// What the input should show: the rejected text, else `value`.
    #[must_use]
    pub fn text(&self, field: &str, value: i32) -> String {
        self.0.get(field).cloned().unwrap_or_else(|| value.to_string())
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
