//! Calendar grid controller.
//!
//! Owns the month the grid displays and the *focus date*, the cell that
//! keyboard navigation acts on. The controller knows nothing about the
//! selected value's validity: it proposes candidates ([`GridAction::Commit`])
//! and the coordinator decides whether to accept them.
//!
//! Navigation:
//! - Arrow keys move focus by a day or a week, following it into the
//!   adjacent month when it crosses a boundary
//! - PageUp/PageDown page by month, with Shift by year
//! - Home/End focus the first/last day of the displayed month
//! - Enter/Space propose the focus date for commit
//! - Escape asks the coordinator to close the dropdown
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horizon_datepicker::calendar::CalendarGrid;
//!
//! let today = NaiveDate::from_ymd_opt(2022, 2, 10).unwrap();
//! let mut grid = CalendarGrid::new(today);
//! grid.move_focus(21);
//! assert_eq!((grid.view_year(), grid.view_month()), (2022, 3));
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use horizon_datepicker_core::logging::targets;

use crate::dates::{
    add_days, days_in_month, is_available, normalize_month, weeks_of_month, AvailabilityRule,
    CalendarDate, DateRange, WeekNumbering, MAX_YEAR, MIN_YEAR,
};
use crate::keys::{Key, KeyPress};

/// Direction of the last view change, for rendering a slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTransition {
    /// The view has not moved.
    #[default]
    None,
    /// Moved to a later month.
    Forward,
    /// Moved to an earlier month.
    Backward,
}

/// What the coordinator should do after a key press in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Nothing beyond the grid's own state change.
    None,
    /// Propose this date for commit.
    Commit(CalendarDate),
    /// Close the dropdown.
    Close,
}

/// One day cell of the render snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: CalendarDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_focused: bool,
    /// Padding day from the previous or next month.
    pub is_other_month: bool,
    /// Outside the range, or disabled by date or weekday.
    pub is_disabled: bool,
}

/// One row of the render snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWeek {
    pub week_number: u32,
    pub days: [GridCell; 7],
}

/// Month grid with a keyboard focus date.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    /// Cell keyboard navigation acts on.
    focus_date: CalendarDate,
    /// Displayed year.
    view_year: i32,
    /// Displayed month, 1-12.
    view_month: u32,
    /// Leftmost grid column.
    first_day_of_week: Weekday,
    /// Numbering for the week column.
    week_numbering: WeekNumbering,
    /// Direction of the last view change.
    transition: ViewTransition,
    /// The current calendar day, supplied by the host.
    today: CalendarDate,
}

impl CalendarGrid {
    /// Create a grid showing and focusing `today`.
    pub fn new(today: CalendarDate) -> Self {
        Self {
            focus_date: today,
            view_year: today.year(),
            view_month: today.month(),
            first_day_of_week: Weekday::Sun,
            week_numbering: WeekNumbering::default(),
            transition: ViewTransition::None,
            today,
        }
    }

    /// Set the first day of the week using builder pattern.
    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// Set the week numbering using builder pattern.
    pub fn with_week_numbering(mut self, numbering: WeekNumbering) -> Self {
        self.week_numbering = numbering;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The date keyboard navigation acts on.
    pub fn focus_date(&self) -> CalendarDate {
        self.focus_date
    }

    /// Displayed year.
    pub fn view_year(&self) -> i32 {
        self.view_year
    }

    /// Displayed month, 1-12.
    pub fn view_month(&self) -> u32 {
        self.view_month
    }

    /// Direction of the last view change.
    pub fn transition(&self) -> ViewTransition {
        self.transition
    }

    /// The leftmost grid column.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Change the leftmost grid column.
    pub fn set_first_day_of_week(&mut self, day: Weekday) {
        self.first_day_of_week = day;
    }

    /// Week numbering in use.
    pub fn week_numbering(&self) -> WeekNumbering {
        self.week_numbering
    }

    /// Change the week numbering.
    pub fn set_week_numbering(&mut self, numbering: WeekNumbering) {
        self.week_numbering = numbering;
    }

    /// The current calendar day.
    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Update the current calendar day (e.g. after midnight).
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Check whether `date` falls in the displayed month.
    pub fn is_in_view(&self, date: CalendarDate) -> bool {
        date.year() == self.view_year && date.month() == self.view_month
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Display `month` of `year`, carrying months outside 1-12 into the year.
    ///
    /// Views outside years 1-9999 are ignored.
    pub fn set_view(&mut self, month: i32, year: i32) {
        let (year, month) = normalize_month(year, month);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            tracing::debug!(target: targets::CALENDAR, year, "view outside supported years ignored");
            return;
        }

        self.transition = match (year, month).cmp(&(self.view_year, self.view_month)) {
            std::cmp::Ordering::Greater => ViewTransition::Forward,
            std::cmp::Ordering::Less => ViewTransition::Backward,
            std::cmp::Ordering::Equal => ViewTransition::None,
        };
        if self.transition != ViewTransition::None {
            tracing::trace!(target: targets::CALENDAR, year, month, "view changed");
        }
        self.view_year = year;
        self.view_month = month;
    }

    /// Move focus by `delta_days`, following it into another month.
    pub fn move_focus(&mut self, delta_days: i64) {
        let focus = add_days(self.focus_date, delta_days);
        if !(MIN_YEAR..=MAX_YEAR).contains(&focus.year()) {
            return;
        }
        self.focus_date = focus;
        if !self.is_in_view(focus) {
            self.set_view(focus.month() as i32, focus.year());
        }
    }

    /// Page the view by `direction` months.
    ///
    /// Focus lands on today when paging onto today's month, otherwise on
    /// the first of the month.
    pub fn page_month(&mut self, direction: i32) {
        self.set_view(self.view_month as i32 + direction, self.view_year);
        self.reset_focus_after_paging();
    }

    /// Page the view by `direction` years, keeping the month.
    pub fn page_year(&mut self, direction: i32) {
        self.set_view(self.view_month as i32, self.view_year.saturating_add(direction));
        self.reset_focus_after_paging();
    }

    fn reset_focus_after_paging(&mut self) {
        self.focus_date = if self.is_in_view(self.today) {
            self.today
        } else {
            self.first_of_view()
        };
    }

    fn first_of_view(&self) -> CalendarDate {
        NaiveDate::from_ymd_opt(self.view_year, self.view_month, 1).unwrap_or(self.focus_date)
    }

    /// Focus the first day of the displayed month.
    pub fn focus_month_start(&mut self) {
        self.focus_date = self.first_of_view();
    }

    /// Focus the last day of the displayed month.
    pub fn focus_month_end(&mut self) {
        let last = days_in_month(self.view_year, self.view_month);
        self.focus_date =
            NaiveDate::from_ymd_opt(self.view_year, self.view_month, last).unwrap_or(self.focus_date);
    }

    /// The focus date as a commit candidate.
    pub fn commit_focus(&self) -> CalendarDate {
        self.focus_date
    }

    /// Show and focus today. Returns today as a commit candidate.
    pub fn jump_to_today(&mut self) -> CalendarDate {
        self.set_view(self.today.month() as i32, self.today.year());
        self.focus_date = self.today;
        self.today
    }

    /// Show `date`'s month and focus `date`, clamped into `range`.
    ///
    /// The view follows `date` even when focus is pulled to a range bound.
    pub fn jump_to_date(&mut self, date: CalendarDate, range: &DateRange) {
        self.set_view(date.month() as i32, date.year());
        self.focus_date = range.clamp(date);
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Apply a key press to the grid.
    pub fn handle_key(&mut self, press: KeyPress) -> GridAction {
        match press.key {
            Key::ArrowLeft => self.move_focus(-1),
            Key::ArrowRight => self.move_focus(1),
            Key::ArrowUp => self.move_focus(-7),
            Key::ArrowDown => self.move_focus(7),
            Key::PageUp if press.shift => self.page_year(-1),
            Key::PageDown if press.shift => self.page_year(1),
            Key::PageUp => self.page_month(-1),
            Key::PageDown => self.page_month(1),
            Key::Home => self.focus_month_start(),
            Key::End => self.focus_month_end(),
            Key::Enter | Key::Space => return GridAction::Commit(self.commit_focus()),
            Key::Escape => return GridAction::Close,
            Key::Tab | Key::Backspace | Key::Other => {}
        }
        GridAction::None
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Build the rows for the displayed month.
    pub fn weeks(
        &self,
        selected: Option<CalendarDate>,
        range: &DateRange,
        rule: &AvailabilityRule,
    ) -> Vec<GridWeek> {
        weeks_of_month(self.view_year, self.view_month, self.first_day_of_week)
            .enumerate()
            .map(|(row, week)| GridWeek {
                week_number: self.week_numbering.number(&week, row),
                days: week.map(|date| GridCell {
                    date,
                    is_today: date == self.today,
                    is_selected: selected == Some(date),
                    is_focused: date == self.focus_date,
                    is_other_month: !self.is_in_view(date),
                    is_disabled: !is_available(date, range, rule),
                }),
            })
            .collect()
    }
}
