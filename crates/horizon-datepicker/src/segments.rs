//! Segmented input controller.
//!
//! The text side of the date picker is three numeric fields (day, month,
//! year) that the user edits independently. This controller owns those
//! fields. It clamps each one as it is typed, decides when focus should
//! move on to the next field, and merges the three into a candidate date
//! once all are filled in.
//!
//! Out-of-bounds input is corrected, not rejected: typing `32` into the
//! day of a 28-day February leaves `28` in the field. A lone leading zero
//! (`0` in day or month, `0`..`000` in year) is kept as in-progress text so
//! that `05` can be typed digit by digit.
//!
//! # Example
//!
//! ```
//! use horizon_datepicker::segments::{SegmentKind, SegmentedInput};
//!
//! let mut input = SegmentedInput::new();
//! input.update_segment(SegmentKind::Year, "2023");
//! input.update_segment(SegmentKind::Month, "2");
//! let update = input.update_segment(SegmentKind::Day, "32");
//! assert_eq!(update.display, "28");
//! assert!(input.to_candidate_date().is_some());
//! ```

use std::fmt;

use chrono::Datelike;
use horizon_datepicker_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, add_months, clamped_date, days_in_month, CalendarDate, MAX_YEAR, MIN_YEAR};

/// Leap year used to bound the day while the year field is still empty.
const ANY_LEAP_YEAR: i32 = 2000;

/// One of the three editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    /// Day of month.
    Day,
    /// Month, shown as 1-12.
    Month,
    /// Four-digit year.
    Year,
}

impl SegmentKind {
    /// Maximum number of digits the field holds.
    pub fn max_digits(self) -> usize {
        match self {
            Self::Day | Self::Month => 2,
            Self::Year => 4,
        }
    }

    fn format_value(self, value: u32) -> String {
        match self {
            Self::Day | Self::Month => format!("{value:02}"),
            Self::Year => value.to_string(),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// State of a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// The typed text had no usable digits.
    Invalid,
    /// Empty, or a zero prefix that could still become a value.
    #[default]
    Intermediate,
    /// Holds a value within the field's bounds.
    Acceptable,
}

/// Left-to-right order of the fields, which follows the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentOrder {
    /// `dd/mm/yyyy`
    #[default]
    DayMonthYear,
    /// `mm/dd/yyyy`
    MonthDayYear,
    /// `yyyy-mm-dd`
    YearMonthDay,
}

impl SegmentOrder {
    /// Pick the field order a locale writes short dates in.
    pub fn from_locale(locale: &str) -> Self {
        let locale = locale.trim().to_ascii_lowercase().replace('_', "-");
        let mut parts = locale.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.last().filter(|r| r.len() == 2).unwrap_or_default();

        match (language, region) {
            ("en", "" | "us" | "ph" | "pr" | "um") | ("es", "us") | ("fil" | "tl", _) => {
                Self::MonthDayYear
            }
            ("en" | "fr", "ca") | ("zh" | "ja" | "ko" | "hu" | "lt" | "sv" | "mn", _) => {
                Self::YearMonthDay
            }
            _ => Self::DayMonthYear,
        }
    }

    /// The fields in display order.
    pub fn kinds(self) -> [SegmentKind; 3] {
        use SegmentKind::*;
        match self {
            Self::DayMonthYear => [Day, Month, Year],
            Self::MonthDayYear => [Month, Day, Year],
            Self::YearMonthDay => [Year, Month, Day],
        }
    }

    /// Separator drawn between fields.
    pub fn separator(self) -> char {
        match self {
            Self::DayMonthYear | Self::MonthDayYear => '/',
            Self::YearMonthDay => '-',
        }
    }

    /// Leftmost field.
    pub fn first(self) -> SegmentKind {
        self.kinds()[0]
    }

    /// Rightmost field.
    pub fn last(self) -> SegmentKind {
        self.kinds()[2]
    }

    /// Field to the right of `kind`.
    pub fn next(self, kind: SegmentKind) -> Option<SegmentKind> {
        let kinds = self.kinds();
        let index = kinds.iter().position(|k| *k == kind)?;
        kinds.get(index + 1).copied()
    }

    /// Field to the left of `kind`.
    pub fn previous(self, kind: SegmentKind) -> Option<SegmentKind> {
        let kinds = self.kinds();
        let index = kinds.iter().position(|k| *k == kind)?;
        index.checked_sub(1).map(|i| kinds[i])
    }
}

/// Accessible labels for the fields; placeholders derive from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentLabels {
    /// Label of the day field.
    pub day: String,
    /// Label of the month field.
    pub month: String,
    /// Label of the year field.
    pub year: String,
}

impl Default for SegmentLabels {
    fn default() -> Self {
        Self {
            day: "Day".to_string(),
            month: "Month".to_string(),
            year: "Year".to_string(),
        }
    }
}

impl SegmentLabels {
    /// Label for a field.
    pub fn label(&self, kind: SegmentKind) -> &str {
        match kind {
            SegmentKind::Day => &self.day,
            SegmentKind::Month => &self.month,
            SegmentKind::Year => &self.year,
        }
    }

    /// Placeholder for a field: the label's first letter, lowercased,
    /// repeated to the field width (`dd`, `mm`, `yyyy`).
    pub fn placeholder(&self, kind: SegmentKind) -> String {
        self.label(kind)
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect::<String>().repeat(kind.max_digits()))
            .unwrap_or_default()
    }
}

/// Result of [`SegmentedInput::update_segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentUpdate {
    /// The field that was edited.
    pub kind: SegmentKind,
    /// Text the field should now display.
    pub display: String,
    /// State of the edited field.
    pub state: ValidationState,
    /// Whether the typed value was corrected into bounds.
    pub clamped: bool,
    /// Whether an existing day was pulled in because the month got shorter.
    pub day_reclamped: bool,
    /// Whether focus should move on to the next field.
    pub advance: bool,
}

/// Result of [`SegmentedInput::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to step.
    Unchanged,
    /// An empty year was seeded from today.
    Seeded,
    /// A lone field changed; the others are still empty.
    Adjusted,
    /// All fields are filled and the merged date moved to this date.
    Merged(CalendarDate),
}

/// A single numeric field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Segment {
    text: String,
    value: Option<u32>,
}

impl Segment {
    fn set(&mut self, kind: SegmentKind, value: u32) {
        self.text = kind.format_value(value);
        self.value = Some(value);
    }

    fn clear(&mut self) {
        self.text.clear();
        self.value = None;
    }

    fn state(&self) -> ValidationState {
        if self.value.is_some() {
            ValidationState::Acceptable
        } else {
            ValidationState::Intermediate
        }
    }
}

/// The three day/month/year fields.
#[derive(Debug, Clone, Default)]
pub struct SegmentedInput {
    day: Segment,
    month: Segment,
    year: Segment,
    order: SegmentOrder,
}

impl SegmentedInput {
    /// Create empty fields in day-month-year order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field order using builder pattern.
    pub fn with_order(mut self, order: SegmentOrder) -> Self {
        self.order = order;
        self
    }

    /// The field order.
    pub fn order(&self) -> SegmentOrder {
        self.order
    }

    /// Change the field order.
    pub fn set_order(&mut self, order: SegmentOrder) {
        self.order = order;
    }

    fn segment(&self, kind: SegmentKind) -> &Segment {
        match kind {
            SegmentKind::Day => &self.day,
            SegmentKind::Month => &self.month,
            SegmentKind::Year => &self.year,
        }
    }

    fn segment_mut(&mut self, kind: SegmentKind) -> &mut Segment {
        match kind {
            SegmentKind::Day => &mut self.day,
            SegmentKind::Month => &mut self.month,
            SegmentKind::Year => &mut self.year,
        }
    }

    /// The parsed day, if set.
    pub fn day(&self) -> Option<u32> {
        self.day.value
    }

    /// The parsed month (1-12), if set.
    pub fn month(&self) -> Option<u32> {
        self.month.value
    }

    /// The parsed year, if set.
    pub fn year(&self) -> Option<i32> {
        self.year.value.map(|y| y as i32)
    }

    /// Text currently shown in a field.
    pub fn display(&self, kind: SegmentKind) -> &str {
        &self.segment(kind).text
    }

    /// State of a field.
    pub fn state(&self, kind: SegmentKind) -> ValidationState {
        self.segment(kind).state()
    }

    /// Check whether every field is empty.
    pub fn is_empty(&self) -> bool {
        [&self.day, &self.month, &self.year]
            .iter()
            .all(|s| s.text.is_empty())
    }

    /// Check whether every field holds a value.
    pub fn is_complete(&self) -> bool {
        [&self.day, &self.month, &self.year]
            .iter()
            .all(|s| s.value.is_some())
    }

    /// Largest day allowed by the current month and year fields.
    pub fn max_day(&self) -> u32 {
        match self.month.value {
            Some(month) => days_in_month(self.year().unwrap_or(ANY_LEAP_YEAR), month),
            None => 31,
        }
    }

    fn bounds(&self, kind: SegmentKind) -> (u32, u32) {
        match kind {
            SegmentKind::Day => (1, self.max_day()),
            SegmentKind::Month => (1, 12),
            SegmentKind::Year => (MIN_YEAR as u32, MAX_YEAR as u32),
        }
    }

    /// Parse the text typed into a field and store it, clamped into bounds.
    ///
    /// Non-digit characters are dropped. A clamped value rewrites the field
    /// text. Editing month or year also re-clamps an existing day.
    pub fn update_segment(&mut self, kind: SegmentKind, raw: &str) -> SegmentUpdate {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let had_garbage = digits.len() != raw.trim().len();

        let mut clamped = false;
        if digits.is_empty() {
            self.segment_mut(kind).clear();
        } else {
            let typed = parse_digits(&digits);
            if typed == 0 && digits.len() < kind.max_digits() {
                let segment = self.segment_mut(kind);
                segment.text = digits.clone();
                segment.value = None;
            } else {
                let (min, max) = self.bounds(kind);
                let value = typed.clamp(min, max);
                clamped = value != typed;
                let segment = self.segment_mut(kind);
                segment.value = Some(value);
                segment.text = if clamped {
                    kind.format_value(value)
                } else {
                    digits.clone()
                };
            }
        }

        let day_reclamped = kind != SegmentKind::Day && self.reclamp_day();

        let state = if had_garbage && digits.is_empty() {
            ValidationState::Invalid
        } else {
            self.segment(kind).state()
        };
        let advance = !digits.is_empty() && Self::should_advance(kind, &digits);

        if clamped {
            tracing::debug!(
                target: targets::SEGMENTS,
                %kind,
                raw,
                display = %self.display(kind),
                "segment value clamped"
            );
        }

        SegmentUpdate {
            kind,
            display: self.display(kind).to_string(),
            state,
            clamped,
            day_reclamped,
            advance,
        }
    }

    /// Check whether typing `raw` into `kind` leaves nothing more to type,
    /// so focus should move to the next field.
    ///
    /// A day advances once it has two digits or exceeds 3, a month once it
    /// has two digits or exceeds 1, a year once it has four digits. A short
    /// zero prefix never advances.
    pub fn advance_on_overflow(&self, kind: SegmentKind, raw: &str) -> bool {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        !digits.is_empty() && Self::should_advance(kind, &digits)
    }

    fn should_advance(kind: SegmentKind, digits: &str) -> bool {
        if digits.len() >= kind.max_digits() {
            return true;
        }
        let value = parse_digits(digits);
        match kind {
            SegmentKind::Day => value > 3,
            SegmentKind::Month => value > 1,
            SegmentKind::Year => false,
        }
    }

    fn reclamp_day(&mut self) -> bool {
        let max = self.max_day();
        match self.day.value {
            Some(day) if day > max => {
                self.day.set(SegmentKind::Day, max);
                true
            }
            _ => false,
        }
    }

    /// Merge the fields into a date, or `None` while any field is empty.
    pub fn to_candidate_date(&self) -> Option<CalendarDate> {
        let (Some(day), Some(month), Some(year)) = (self.day(), self.month(), self.year()) else {
            return None;
        };
        clamped_date(year, month, day)
    }

    /// Show a committed date in all three fields.
    pub fn set_from_date(&mut self, date: CalendarDate) {
        self.day.set(SegmentKind::Day, date.day());
        self.month.set(SegmentKind::Month, date.month());
        self.year.set(SegmentKind::Year, date.year().max(0) as u32);
    }

    /// Empty all three fields.
    pub fn clear(&mut self) {
        self.day.clear();
        self.month.clear();
        self.year.clear();
    }

    /// Arrow Up (`delta = 1`) or Down (`delta = -1`) on a field.
    ///
    /// With all fields filled, the merged date moves by one unit of `kind`.
    /// An empty year is seeded to today's year plus `delta` without merging.
    /// A lone filled field steps within its bounds.
    pub fn step(&mut self, kind: SegmentKind, delta: i32, today: CalendarDate) -> StepOutcome {
        if self.segment(kind).value.is_none() {
            if kind == SegmentKind::Year && self.segment(kind).text.is_empty() {
                let year = (today.year() + delta).clamp(MIN_YEAR, MAX_YEAR);
                self.year.set(SegmentKind::Year, year as u32);
                self.reclamp_day();
                return StepOutcome::Seeded;
            }
            return StepOutcome::Unchanged;
        }

        if let Some(date) = self.to_candidate_date() {
            let moved = match kind {
                SegmentKind::Day => add_days(date, i64::from(delta)),
                SegmentKind::Month => add_months(date, delta),
                SegmentKind::Year => add_months(date, delta.saturating_mul(12)),
            };
            if !(MIN_YEAR..=MAX_YEAR).contains(&moved.year()) {
                return StepOutcome::Unchanged;
            }
            self.set_from_date(moved);
            return StepOutcome::Merged(moved);
        }

        let (min, max) = self.bounds(kind);
        let Some(current) = self.segment(kind).value else {
            return StepOutcome::Unchanged;
        };
        let stepped = (i64::from(current) + i64::from(delta)).clamp(i64::from(min), i64::from(max)) as u32;
        if stepped == current {
            return StepOutcome::Unchanged;
        }
        self.segment_mut(kind).set(kind, stepped);
        if kind != SegmentKind::Day {
            self.reclamp_day();
        }
        StepOutcome::Adjusted
    }
}

/// Parse ASCII digits, saturating instead of overflowing.
fn parse_digits(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')))
}
