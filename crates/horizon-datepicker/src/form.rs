//! Payload carried by the `input` and `change` notifications.

use serde::Serialize;

use crate::dates::{format_short_iso, CalendarDate};
use crate::validity::Validity;

/// Snapshot of the field as a form host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldData {
    /// Form field name.
    pub name: String,
    /// Short ISO date, or `None` when empty.
    pub value: Option<String>,
    /// The same date as a value.
    pub value_as_date: Option<CalendarDate>,
    /// Whether no validity flag is set.
    pub is_valid: bool,
    pub validity: Validity,
}

impl FormFieldData {
    /// Build the payload for `date` with the given flags.
    pub fn new(name: impl Into<String>, date: Option<CalendarDate>, validity: Validity) -> Self {
        Self {
            name: name.into(),
            value: date.map(format_short_iso),
            value_as_date: date,
            is_valid: validity.is_valid(),
            validity,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Derive a form field name from a label: lowercased, with each run of
/// non-alphanumeric characters removed and the following character
/// uppercased (`"Date of birth"` becomes `"dateOfBirth"`).
pub fn camel_case_name(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    let mut upper_next = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next && !name.is_empty() {
                name.push(c.to_ascii_uppercase());
            } else {
                name.push(c.to_ascii_lowercase());
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    name
}
