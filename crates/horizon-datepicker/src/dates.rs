//! Date math utilities.
//!
//! Pure functions over calendar dates: month lengths, day and month
//! arithmetic, month grids, range and availability predicates, and the
//! date-string wire format.
//!
//! A [`CalendarDate`] is a `chrono::NaiveDate`: a Gregorian (year, month,
//! day) triple with no time-of-day and no timezone. Months are 1-based
//! throughout (1 = January).
//!
//! # Accepted date strings
//!
//! [`parse_date_string`] tries these forms in order and takes the first
//! that matches:
//!
//! 1. `YYYY-MM-DD` (ISO 8601 short form; one-digit month/day accepted)
//! 2. `M/D/YYYY` (month first)
//! 3. `M-D-YY` (month first; `00`-`68` is 20YY, `69`-`99` is 19YY)
//!
//! Day-first strings such as `D/M/YYYY` are never inferred: `13/1/2022`
//! is an invalid month, not the 13th of January.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::iter::FusedIterator;
use std::sync::OnceLock;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use horizon_datepicker_core::logging::targets;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A calendar date with no time-of-day component.
pub type CalendarDate = NaiveDate;

/// Smallest year the widget accepts.
pub const MIN_YEAR: i32 = 1;
/// Largest year the widget accepts.
pub const MAX_YEAR: i32 = 9999;

/// Error returned when a date string cannot be turned into a [`CalendarDate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The string was empty or only whitespace.
    #[error("empty date string")]
    Empty,
    /// The string matches none of the accepted forms.
    #[error("unrecognized date format: '{0}'")]
    UnrecognizedFormat(String),
    /// The month field is outside 1-12.
    #[error("month {month} is out of range 1-12")]
    InvalidMonth { month: u32 },
    /// The day does not exist in the given month.
    #[error("day {day} does not exist in {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    /// The year is outside 1-9999.
    #[error("year {year} is out of range 1-9999")]
    InvalidYear { year: i32 },
}

// =========================================================================
// Month arithmetic
// =========================================================================

/// Check if a year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get the number of days in a month.
///
/// `month` is 1-based. Returns 0 for a month outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Add `n` days (negative to go back), rolling month and year as needed.
///
/// Saturates at the ends of the representable range.
pub fn add_days(date: CalendarDate, n: i64) -> CalendarDate {
    date.checked_add_signed(Duration::days(n))
        .unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Add `n` months, clamping the day to the length of the target month.
///
/// Saturates at the ends of the representable range.
pub fn add_months(date: CalendarDate, n: i32) -> CalendarDate {
    let months = Months::new(n.unsigned_abs());
    let shifted = if n < 0 {
        date.checked_sub_months(months)
    } else {
        date.checked_add_months(months)
    };
    shifted.unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Carry an out-of-range month into the year.
///
/// Month 0 is December of the previous year and month 13 is January of the
/// next year; any distance is carried.
pub fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let zero_based = month - 1;
    let year = year + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Build a date, clamping the day into the month.
///
/// Returns `None` only if the month is outside 1-12 or the year cannot be
/// represented.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<CalendarDate> {
    let max_day = days_in_month(year, month);
    if max_day == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, max_day))
}

/// Compare two dates.
pub fn compare_dates(a: CalendarDate, b: CalendarDate) -> Ordering {
    a.cmp(&b)
}

// =========================================================================
// Month grid
// =========================================================================

/// Column of `day` in a week that starts on `first_day_of_week` (0-6).
pub fn weekday_index(day: Weekday, first_day_of_week: Weekday) -> u32 {
    let first = first_day_of_week.num_days_from_sunday();
    let this = day.num_days_from_sunday();
    (this + 7 - first) % 7
}

/// Weekday from a 0-6 index where 0 is Sunday.
pub fn weekday_from_sunday_index(index: u32) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Weekday from an ISO 1-7 number where 1 is Monday and 7 is Sunday.
pub fn weekday_from_iso_number(number: u32) -> Option<Weekday> {
    match number {
        7 => Some(Weekday::Sun),
        n @ 1..=6 => weekday_from_sunday_index(n),
        _ => None,
    }
}

/// Iterator over the weeks of a month, see [`weeks_of_month`].
#[derive(Debug, Clone)]
pub struct WeeksOfMonth {
    cursor: Option<CalendarDate>,
    end: CalendarDate,
}

impl Iterator for WeeksOfMonth {
    type Item = [CalendarDate; 7];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor.filter(|start| *start <= self.end)?;
        let week = std::array::from_fn(|i| add_days(start, i as i64));
        self.cursor = start.checked_add_signed(Duration::days(7));
        Some(week)
    }
}

impl FusedIterator for WeeksOfMonth {}

/// The weeks covering a month, each padded to 7 days with dates from the
/// adjacent months.
///
/// Every day of the month appears exactly once, weeks are consecutive, and
/// the first column is `first_day_of_week`. A month spans 4 to 6 weeks. The
/// iterator is `Clone`; a clone restarts from wherever the original was.
/// An invalid month yields no weeks.
pub fn weeks_of_month(year: i32, month: u32, first_day_of_week: Weekday) -> WeeksOfMonth {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return WeeksOfMonth {
            cursor: None,
            end: NaiveDate::MIN,
        };
    };
    let last = add_days(first, i64::from(days_in_month(year, month)) - 1);

    let lead = weekday_index(first.weekday(), first_day_of_week);
    let trail = 6 - weekday_index(last.weekday(), first_day_of_week);

    WeeksOfMonth {
        cursor: Some(add_days(first, -i64::from(lead))),
        end: add_days(last, i64::from(trail)),
    }
}

/// How week numbers are shown beside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekNumbering {
    /// ISO 8601 week of year, taken from the row's Thursday.
    #[default]
    Iso,
    /// Position of the row within the displayed month, starting at 1.
    WeekOfMonth,
}

impl WeekNumbering {
    /// Number for a grid row.
    ///
    /// `row` is the 0-based index of `week` within its month grid.
    pub fn number(self, week: &[CalendarDate; 7], row: usize) -> u32 {
        match self {
            Self::Iso => week
                .iter()
                .find(|day| day.weekday() == Weekday::Thu)
                .map_or(0, |thursday| thursday.iso_week().week()),
            Self::WeekOfMonth => row as u32 + 1,
        }
    }
}

// =========================================================================
// Range and availability
// =========================================================================

/// Where a date lies relative to a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// Earlier than `min`.
    Before,
    /// Inside the range.
    Within,
    /// Later than `max`.
    After,
}

/// Optional inclusive lower and upper bounds.
///
/// A missing bound is unbounded on that side. When `min > max` no date is
/// in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// Earliest selectable date.
    pub min: Option<CalendarDate>,
    /// Latest selectable date.
    pub max: Option<CalendarDate>,
}

impl DateRange {
    /// Create a range from optional bounds.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        Self { min, max }
    }

    /// A range with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Check whether the bounds exclude every date.
    pub fn is_empty(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    /// Where `date` lies relative to the bounds.
    pub fn position(&self, date: CalendarDate) -> RangePosition {
        if self.min.is_some_and(|min| date < min) {
            RangePosition::Before
        } else if self.max.is_some_and(|max| date > max) {
            RangePosition::After
        } else {
            RangePosition::Within
        }
    }

    /// Check if `date` lies inside the range.
    pub fn contains(&self, date: CalendarDate) -> bool {
        !self.is_empty() && self.position(date) == RangePosition::Within
    }

    /// Move `date` to the nearest bound if it lies outside.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        match self.position(date) {
            RangePosition::Before => self.min.unwrap_or(date),
            RangePosition::After => self.max.unwrap_or(date),
            RangePosition::Within => date,
        }
    }
}

/// Explicitly disabled dates and weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityRule {
    disabled_dates: BTreeSet<CalendarDate>,
    disabled_weekdays: HashSet<Weekday>,
}

impl AvailabilityRule {
    /// A rule that disables nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set disabled dates using builder pattern.
    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        self.disabled_dates.extend(dates);
        self
    }

    /// Set disabled weekdays using builder pattern.
    pub fn with_disabled_weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.disabled_weekdays.extend(days);
        self
    }

    /// Disable a single date.
    pub fn disable_date(&mut self, date: CalendarDate) {
        self.disabled_dates.insert(date);
    }

    /// Disable every occurrence of a weekday.
    pub fn disable_weekday(&mut self, day: Weekday) {
        self.disabled_weekdays.insert(day);
    }

    /// The explicitly disabled dates, in order.
    pub fn disabled_dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.disabled_dates.iter().copied()
    }

    /// Check if a weekday is disabled.
    pub fn is_weekday_disabled(&self, day: Weekday) -> bool {
        self.disabled_weekdays.contains(&day)
    }

    /// Check if the rule disables `date`, ignoring any range.
    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        self.disabled_dates.contains(&date) || self.is_weekday_disabled(date.weekday())
    }
}

/// Check if a date lies inside a range.
pub fn is_in_range(date: CalendarDate, range: &DateRange) -> bool {
    range.contains(date)
}

/// Check if a date can be selected: in range and not disabled.
pub fn is_available(date: CalendarDate, range: &DateRange, rule: &AvailabilityRule) -> bool {
    is_in_range(date, range) && !rule.is_disabled(date)
}

// =========================================================================
// Wire format
// =========================================================================

fn iso_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("ISO date pattern is valid")
    })
}

fn slash_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("slash date pattern is valid")
    })
}

fn short_dash_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{2})$").expect("short dash date pattern is valid")
    })
}

/// Map a two-digit year onto 1969-2068.
fn expand_two_digit_year(year: i32) -> i32 {
    if year <= 68 { 2000 + year } else { 1900 + year }
}

fn build_date(year: i32, month: u32, day: u32) -> Result<CalendarDate, ParseError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ParseError::InvalidYear { year });
    }
    if !(1..=12).contains(&month) {
        return Err(ParseError::InvalidMonth { month });
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDay { year, month, day })
}

/// Parse a date string, see the module docs for the accepted forms.
///
/// Never clamps: a month of 13 or a 30th of February is an error.
pub fn parse_date_string(s: &str) -> Result<CalendarDate, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let number = |text: &str| {
        text.parse::<u32>()
            .map_err(|_| ParseError::UnrecognizedFormat(s.to_string()))
    };

    if let Some(caps) = iso_pattern().captures(s) {
        return build_date(number(&caps[1])? as i32, number(&caps[2])?, number(&caps[3])?);
    }
    if let Some(caps) = slash_pattern().captures(s) {
        return build_date(number(&caps[3])? as i32, number(&caps[1])?, number(&caps[2])?);
    }
    if let Some(caps) = short_dash_pattern().captures(s) {
        let year = expand_two_digit_year(number(&caps[3])? as i32);
        return build_date(year, number(&caps[1])?, number(&caps[2])?);
    }

    Err(ParseError::UnrecognizedFormat(s.to_string()))
}

/// Format a date as zero-padded `YYYY-MM-DD`.
pub fn format_short_iso(date: CalendarDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a comma-separated list of dates.
///
/// Malformed entries are skipped and logged; blank entries are ignored.
pub fn parse_date_list(s: &str) -> Vec<CalendarDate> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match parse_date_string(entry) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(target: targets::DATES, entry, %err, "skipping malformed date in list");
                None
            }
        })
        .collect()
}

/// Parse a comma-separated list of ISO weekday numbers (1 = Monday .. 7 = Sunday).
///
/// Malformed entries are skipped and logged; blank entries are ignored.
pub fn parse_weekday_list(s: &str) -> Vec<Weekday> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let day = entry.parse::<u32>().ok().and_then(weekday_from_iso_number);
            if day.is_none() {
                tracing::warn!(target: targets::DATES, entry, "skipping malformed weekday in list");
            }
            day
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_add_days_rolls_over() {
        assert_eq!(add_days(date(2022, 12, 31), 1), date(2023, 1, 1));
        assert_eq!(add_days(date(2023, 1, 1), -1), date(2022, 12, 31));
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2022, 2, 1), -7), date(2022, 1, 25));
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2022, 1, 31), 1), date(2022, 2, 28));
        assert_eq!(add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(add_months(date(2022, 12, 15), 1), date(2023, 1, 15));
        assert_eq!(add_months(date(2024, 2, 29), 12), date(2025, 2, 28));
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month(2022, 0), (2021, 12));
        assert_eq!(normalize_month(2022, 13), (2023, 1));
        assert_eq!(normalize_month(2022, 6), (2022, 6));
        assert_eq!(normalize_month(2022, -12), (2020, 12));
        assert_eq!(normalize_month(2022, 25), (2024, 1));
    }

    #[test]
    fn test_weeks_of_month_january_2025() {
        // January 2025 starts on a Wednesday.
        let weeks: Vec<_> = weeks_of_month(2025, 1, Weekday::Sun).collect();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], date(2024, 12, 29));
        assert_eq!(weeks[0][3], date(2025, 1, 1));
        assert_eq!(weeks[4][6], date(2025, 2, 1));
    }

    #[test]
    fn test_weeks_of_month_respects_first_day() {
        let weeks: Vec<_> = weeks_of_month(2025, 1, Weekday::Mon).collect();
        assert!(weeks.iter().all(|w| w[0].weekday() == Weekday::Mon));
        assert_eq!(weeks[0][0], date(2024, 12, 30));
    }

    #[test]
    fn test_weeks_of_month_four_week_february() {
        // February 2015 starts on a Sunday and has 28 days.
        assert_eq!(weeks_of_month(2015, 2, Weekday::Sun).count(), 4);
    }

    #[test]
    fn test_weeks_of_month_is_restartable() {
        let mut weeks = weeks_of_month(2022, 2, Weekday::Sun);
        weeks.next();
        let rest = weeks.clone();
        assert_eq!(rest.count(), weeks.count());
        assert_eq!(weeks_of_month(2022, 0, Weekday::Sun).count(), 0);
    }

    #[test]
    fn test_weeks_cover_every_month_day_once() {
        for year in [1900, 2000, 2023, 2024, 9999] {
            for month in 1..=12 {
                for first in [Weekday::Sun, Weekday::Mon, Weekday::Sat] {
                    let days: Vec<_> = weeks_of_month(year, month, first).flatten().collect();
                    assert_eq!(days.len() % 7, 0);
                    assert!(days.windows(2).all(|w| add_days(w[0], 1) == w[1]));
                    let in_month = days
                        .iter()
                        .filter(|d| d.year() == year && d.month() == month)
                        .count();
                    assert_eq!(in_month as u32, days_in_month(year, month));
                }
            }
        }
    }

    #[test]
    fn test_week_numbering() {
        let weeks: Vec<_> = weeks_of_month(2025, 1, Weekday::Sun).collect();
        assert_eq!(WeekNumbering::Iso.number(&weeks[0], 0), 1);
        assert_eq!(WeekNumbering::Iso.number(&weeks[1], 1), 2);
        assert_eq!(WeekNumbering::WeekOfMonth.number(&weeks[3], 3), 4);

        // 2021-01-01 is a Friday in ISO week 53 of 2020.
        let weeks: Vec<_> = weeks_of_month(2021, 1, Weekday::Mon).collect();
        assert_eq!(WeekNumbering::Iso.number(&weeks[0], 0), 53);
    }

    #[test]
    fn test_range_predicates() {
        let range = DateRange::new(Some(date(2022, 2, 2)), Some(date(2022, 2, 22)));
        assert!(is_in_range(date(2022, 2, 2), &range));
        assert!(is_in_range(date(2022, 2, 22), &range));
        assert!(!is_in_range(date(2022, 2, 23), &range));
        assert_eq!(range.position(date(2022, 2, 1)), RangePosition::Before);
        assert_eq!(range.clamp(date(2022, 3, 1)), date(2022, 2, 22));
        assert_eq!(range.clamp(date(2021, 3, 1)), date(2022, 2, 2));

        let half_open = DateRange::new(None, Some(date(2022, 2, 22)));
        assert!(half_open.contains(date(1, 1, 1)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::new(Some(date(2022, 3, 1)), Some(date(2022, 2, 1)));
        assert!(range.is_empty());
        assert!(!range.contains(date(2022, 2, 15)));
        assert!(!range.contains(date(2022, 3, 1)));
    }

    #[test]
    fn test_availability() {
        let range = DateRange::unbounded();
        let rule = AvailabilityRule::new()
            .with_disabled_dates([date(2022, 2, 4)])
            .with_disabled_weekdays([Weekday::Sun]);

        assert!(!is_available(date(2022, 2, 4), &range, &rule));
        assert!(is_available(date(2022, 2, 5), &range, &rule));
        // 2022-02-06 is a Sunday.
        assert!(!is_available(date(2022, 2, 6), &range, &rule));
        assert!(!is_available(
            date(2022, 2, 5),
            &DateRange::new(Some(date(2022, 3, 1)), None),
            &rule
        ));
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date_string("2022-02-05"), Ok(date(2022, 2, 5)));
        assert_eq!(parse_date_string(" 2022-2-5 "), Ok(date(2022, 2, 5)));
    }

    #[test]
    fn test_parse_month_first_forms() {
        assert_eq!(parse_date_string("2/5/2022"), Ok(date(2022, 2, 5)));
        assert_eq!(parse_date_string("12/31/1999"), Ok(date(1999, 12, 31)));
        assert_eq!(parse_date_string("2-5-22"), Ok(date(2022, 2, 5)));
        assert_eq!(parse_date_string("2-5-68"), Ok(date(2068, 2, 5)));
        assert_eq!(parse_date_string("2-5-69"), Ok(date(1969, 2, 5)));
    }

    #[test]
    fn test_parse_never_reads_day_first() {
        assert_eq!(
            parse_date_string("13/1/2022"),
            Err(ParseError::InvalidMonth { month: 13 })
        );
        assert_eq!(parse_date_string("5/2/2022"), Ok(date(2022, 5, 2)));
    }

    #[test]
    fn test_parse_rejects_out_of_calendar() {
        assert_eq!(
            parse_date_string("2022-13-01"),
            Err(ParseError::InvalidMonth { month: 13 })
        );
        assert_eq!(
            parse_date_string("2023-02-29"),
            Err(ParseError::InvalidDay { year: 2023, month: 2, day: 29 })
        );
        assert_eq!(
            parse_date_string("0000-01-01"),
            Err(ParseError::InvalidYear { year: 0 })
        );
        assert_eq!(parse_date_string(""), Err(ParseError::Empty));
        assert!(matches!(
            parse_date_string("Feb 5 2022"),
            Err(ParseError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        for text in ["2-5-\u{662}\u{662}", "\u{662}/5/2022", "2022-\u{966}2-05"] {
            assert!(
                matches!(parse_date_string(text), Err(ParseError::UnrecognizedFormat(_))),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn test_format_short_iso() {
        assert_eq!(format_short_iso(date(2022, 2, 5)), "2022-02-05");
        assert_eq!(format_short_iso(date(12, 11, 30)), "0012-11-30");
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(
            parse_date_list("2022-02-04, nonsense, ,2/7/2022"),
            vec![date(2022, 2, 4), date(2022, 2, 7)]
        );
        assert_eq!(
            parse_weekday_list("1, 7,8,x"),
            vec![Weekday::Mon, Weekday::Sun]
        );
    }
}
