//! Host-supplied attributes.
//!
//! [`DatePickerAttributes`] mirrors the attribute surface of the widget:
//! every key is optional, kebab-case, and carries strings exactly as a
//! host would write them (dates as short ISO, lists comma-separated).
//! Attributes can be read from a TOML document:
//!
//! ```
//! use horizon_datepicker::attributes::DatePickerAttributes;
//!
//! let attrs = DatePickerAttributes::from_toml_str(r#"
//!     label = "Start date"
//!     required = true
//!     min-date = "2022-02-02"
//!     max-date = "2022-02-22"
//!     disabled-dates = "2022-02-04, 2022-02-08"
//!     disabled-week-days = "6,7"
//!     first-day-of-week = 1
//! "#).unwrap();
//!
//! assert_eq!(attrs.field_name(), "startDate");
//! assert!(attrs.range().unwrap().min.is_some());
//! ```
//!
//! [`range`](DatePickerAttributes::range),
//! [`initial_focus`](DatePickerAttributes::initial_focus) and
//! [`first_day_of_week`](DatePickerAttributes::first_day_of_week) reject
//! malformed values. The `effective_*` variants, which the picker uses, log
//! them and fall back to unset instead.

use std::path::Path;

use chrono::Weekday;
use horizon_datepicker_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::dates::{
    parse_date_list, parse_date_string, parse_weekday_list, weekday_from_sunday_index,
    AvailabilityRule, CalendarDate, DateRange, WeekNumbering,
};
use crate::error::{Error, Result};
use crate::form::camel_case_name;
use crate::segments::{SegmentLabels, SegmentOrder};
use crate::validity::ErrorMessages;

/// Attribute set accepted from the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DatePickerAttributes {
    /// Initial value, short ISO.
    pub value: Option<String>,
    /// Form field name; derived from `label` when absent.
    pub name: Option<String>,
    pub label: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    /// Date the grid opens on when there is no value.
    pub focus_date: Option<String>,
    /// Comma-separated short ISO dates.
    pub disabled_dates: Option<String>,
    /// Comma-separated ISO weekday numbers, 1 = Monday .. 7 = Sunday.
    pub disabled_week_days: Option<String>,
    pub show_week_numbers: bool,
    pub week_numbering: WeekNumbering,
    /// Leftmost grid column, 0 = Sunday .. 6 = Saturday.
    pub first_day_of_week: Option<u32>,
    /// Locale used to pick the field order.
    pub locale: Option<String>,
    pub day_label: Option<String>,
    pub month_label: Option<String>,
    pub year_label: Option<String>,
    pub required_error_message: Option<String>,
    pub range_error_message: Option<String>,
    pub unavailable_error_message: Option<String>,
}

impl DatePickerAttributes {
    /// Parse attributes from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read attributes from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(target: targets::ATTRIBUTES, path = %path.display(), "loading attributes");
        Self::from_toml_str(&content)
    }

    /// Form field name: `name`, or the camel-cased label.
    pub fn field_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => camel_case_name(self.label.as_deref().unwrap_or_default()),
        }
    }

    /// The min/max bounds.
    pub fn range(&self) -> Result<DateRange> {
        let min = parse_optional("min-date", self.min_date.as_deref())?;
        let max = parse_optional("max-date", self.max_date.as_deref())?;
        let range = DateRange::new(min, max);
        if range.is_empty() {
            tracing::warn!(
                target: targets::ATTRIBUTES,
                ?min,
                ?max,
                "min-date is after max-date, every date is unavailable"
            );
        }
        Ok(range)
    }

    /// The initial grid focus for an empty picker.
    pub fn initial_focus(&self) -> Result<Option<CalendarDate>> {
        parse_optional("focus-date", self.focus_date.as_deref())
    }

    /// The min/max bounds, dropping a malformed bound with a warning.
    pub fn effective_range(&self) -> DateRange {
        let range = DateRange::new(
            parse_or_warn("min-date", self.min_date.as_deref()),
            parse_or_warn("max-date", self.max_date.as_deref()),
        );
        if range.is_empty() {
            tracing::warn!(
                target: targets::ATTRIBUTES,
                min = ?range.min,
                max = ?range.max,
                "min-date is after max-date, every date is unavailable"
            );
        }
        range
    }

    /// The initial grid focus, `None` if the attribute is malformed.
    pub fn effective_initial_focus(&self) -> Option<CalendarDate> {
        parse_or_warn("focus-date", self.focus_date.as_deref())
    }

    /// Leftmost grid column, Sunday when unset or out of range.
    pub fn effective_first_day_of_week(&self) -> Weekday {
        self.first_day_of_week().unwrap_or_else(|err| {
            tracing::warn!(target: targets::ATTRIBUTES, %err, "using Sunday as first day of week");
            Weekday::Sun
        })
    }

    /// Disabled dates and weekdays. Malformed list entries are skipped.
    pub fn availability(&self) -> AvailabilityRule {
        AvailabilityRule::new()
            .with_disabled_dates(self.disabled_dates.as_deref().map(parse_date_list).unwrap_or_default())
            .with_disabled_weekdays(
                self.disabled_week_days
                    .as_deref()
                    .map(parse_weekday_list)
                    .unwrap_or_default(),
            )
    }

    /// Leftmost grid column, Sunday when unset.
    pub fn first_day_of_week(&self) -> Result<Weekday> {
        match self.first_day_of_week {
            None => Ok(Weekday::Sun),
            Some(index) => weekday_from_sunday_index(index).ok_or_else(|| {
                Error::attribute("first-day-of-week", format!("{index} is not in 0-6"))
            }),
        }
    }

    /// Field order for the locale; day-month-year when unset.
    pub fn segment_order(&self) -> SegmentOrder {
        self.locale
            .as_deref()
            .map(SegmentOrder::from_locale)
            .unwrap_or_default()
    }

    /// Field labels, falling back to "Day", "Month", "Year".
    pub fn labels(&self) -> SegmentLabels {
        let defaults = SegmentLabels::default();
        SegmentLabels {
            day: self.day_label.clone().unwrap_or(defaults.day),
            month: self.month_label.clone().unwrap_or(defaults.month),
            year: self.year_label.clone().unwrap_or(defaults.year),
        }
    }

    /// Validation messages, falling back to the built-in texts.
    pub fn messages(&self) -> ErrorMessages {
        let defaults = ErrorMessages::default();
        ErrorMessages {
            required: self.required_error_message.clone().unwrap_or(defaults.required),
            range: self.range_error_message.clone().unwrap_or(defaults.range),
            unavailable: self
                .unavailable_error_message
                .clone()
                .unwrap_or(defaults.unavailable),
        }
    }
}

fn parse_optional(attribute: &'static str, value: Option<&str>) -> Result<Option<CalendarDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(text) => parse_date_string(text)
            .map(Some)
            .map_err(|e| Error::invalid_date(attribute, e)),
    }
}

fn parse_or_warn(attribute: &'static str, value: Option<&str>) -> Option<CalendarDate> {
    parse_optional(attribute, value).unwrap_or_else(|err| {
        tracing::warn!(target: targets::ATTRIBUTES, %err, "ignoring malformed attribute");
        None
    })
}
