//! Selection coordinator.
//!
//! [`DatePicker`] owns the committed value and reconciles the two editing
//! surfaces, the [`CalendarGrid`] and the [`SegmentedInput`]. Neither
//! controller writes the other's state. Every candidate they produce comes
//! here, is checked against the range and the availability rule, and on
//! acceptance is pushed back into both.
//!
//! # Phases
//!
//! - `Idle`: nothing pending, no committed value
//! - `PendingCommit`: a candidate is being evaluated
//! - `Committed`: the value is in range and available
//! - `Invalid`: a validity flag is set; the last good value is kept
//!
//! # Notifications
//!
//! - `input` fires on live edits: a complete typed candidate, an arrow
//!   step, a grid focus move, and on every commit
//! - `change` fires only when a value is committed or cleared
//! - `focus_requested` asks the host to move keyboard focus
//! - `expanded_changed` reports the dropdown opening or closing
//!
//! # Deferred work
//!
//! Focus moves that depend on the host having rendered, and closing the
//! dropdown shortly after a selection, are queued rather than done inline.
//! The host calls [`DatePicker::run_deferred`] from its event loop, using
//! [`DatePicker::time_until_next`] to decide when. Closing the dropdown or
//! clearing the value cancels everything still queued.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horizon_datepicker::dates::DateRange;
//! use horizon_datepicker::DatePicker;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2022, 2, day).unwrap();
//! let mut picker = DatePicker::new()
//!     .with_today(d(10))
//!     .with_range(DateRange::new(Some(d(2)), Some(d(22))));
//!
//! picker.change.connect(|data| println!("changed: {:?}", data.value));
//!
//! picker.select_date(d(23));
//! assert!(picker.validity().out_of_range);
//! assert_eq!(picker.selected_date(), None);
//!
//! picker.select_date(d(5));
//! assert_eq!(picker.value().as_deref(), Some("2022-02-05"));
//! ```

use std::time::{Duration, Instant};

use chrono::{Local, Weekday};
use horizon_datepicker_core::logging::targets;
use horizon_datepicker_core::{DeferredQueue, Signal};

use crate::attributes::DatePickerAttributes;
use crate::calendar::{CalendarGrid, GridAction, GridWeek, ViewTransition};
use crate::dates::{
    format_short_iso, parse_date_string, AvailabilityRule, CalendarDate, DateRange, WeekNumbering,
};
use crate::focus::FocusTarget;
use crate::form::FormFieldData;
use crate::keys::{Key, KeyPress};
use crate::segments::{
    SegmentKind, SegmentLabels, SegmentOrder, SegmentUpdate, SegmentedInput, StepOutcome,
    ValidationState,
};
use crate::validity::{ErrorMessages, Rejection, Validity};

/// Delay before focusing the grid after the dropdown opens.
const GRID_FOCUS_DELAY: Duration = Duration::from_millis(200);
/// Delay before closing the dropdown after a selection.
const CLOSE_AFTER_COMMIT_DELAY: Duration = Duration::from_millis(100);
/// Delay before returning focus to the input after the dropdown closes.
const SEGMENT_FOCUS_DELAY: Duration = Duration::ZERO;

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Idle,
    PendingCommit,
    Committed,
    Invalid,
}

/// Queued follow-up work. Each kind is its own slot, so a newer task of a
/// kind supersedes an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DeferredTask {
    FocusGridCell,
    CloseDropdown,
    FocusFirstSegment,
    Validate,
}

/// Render state of one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentView {
    pub kind: SegmentKind,
    pub label: String,
    pub text: String,
    pub placeholder: String,
    pub state: ValidationState,
}

/// Everything the rendering collaborator needs, in one read-only value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerSnapshot {
    pub value: Option<CalendarDate>,
    pub view_year: i32,
    pub view_month: u32,
    pub transition: ViewTransition,
    pub weeks: Vec<GridWeek>,
    pub show_week_numbers: bool,
    /// Input fields in display order.
    pub segments: [SegmentView; 3],
    pub separator: char,
    pub expanded: bool,
    pub phase: SelectionPhase,
    pub validity: Validity,
    pub error_message: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
}

/// A date picker: segmented input, calendar dropdown, and the committed
/// value they share.
///
/// # Signals
///
/// - `input(FormFieldData)`: live edit or grid focus change
/// - `change(FormFieldData)`: value committed or cleared
/// - `focus_requested(FocusTarget)`: host should move keyboard focus
/// - `expanded_changed(bool)`: dropdown opened or closed
pub struct DatePicker {
    /// Form field name.
    name: String,
    required: bool,
    disabled: bool,
    readonly: bool,
    show_week_numbers: bool,
    range: DateRange,
    availability: AvailabilityRule,
    /// Where the grid opens when there is no value.
    initial_focus: Option<CalendarDate>,
    labels: SegmentLabels,
    messages: ErrorMessages,

    grid: CalendarGrid,
    segments: SegmentedInput,

    /// Last committed value.
    selected: Option<CalendarDate>,
    validity: Validity,
    phase: SelectionPhase,
    /// Whether the dropdown is open.
    expanded: bool,
    /// Whether the user has interacted with the input.
    had_focus: bool,
    deferred: DeferredQueue<DeferredTask, DeferredTask>,

    /// Signal emitted on live edits.
    pub input: Signal<FormFieldData>,
    /// Signal emitted when the value is committed or cleared.
    pub change: Signal<FormFieldData>,
    /// Signal emitted when keyboard focus should move.
    pub focus_requested: Signal<FocusTarget>,
    /// Signal emitted when the dropdown opens or closes.
    pub expanded_changed: Signal<bool>,
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl DatePicker {
    /// Create an empty picker using the local calendar day as today.
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            name: String::new(),
            required: false,
            disabled: false,
            readonly: false,
            show_week_numbers: false,
            range: DateRange::unbounded(),
            availability: AvailabilityRule::new(),
            initial_focus: None,
            labels: SegmentLabels::default(),
            messages: ErrorMessages::default(),
            grid: CalendarGrid::new(today),
            segments: SegmentedInput::new(),
            selected: None,
            validity: Validity::default(),
            phase: SelectionPhase::Idle,
            expanded: false,
            had_focus: false,
            deferred: DeferredQueue::new(),
            input: Signal::new(),
            change: Signal::new(),
            focus_requested: Signal::new(),
            expanded_changed: Signal::new(),
        }
    }

    /// Create a picker configured from host attributes.
    pub fn from_attributes(attrs: &DatePickerAttributes) -> Self {
        let mut picker = Self::new();
        picker.apply_attributes(attrs);
        picker
    }

    /// Reconfigure from host attributes, then re-seed from `attrs.value`.
    ///
    /// Malformed attributes are logged and treated as unset. The value is
    /// re-validated against the new range and availability even when it is
    /// unchanged.
    pub fn apply_attributes(&mut self, attrs: &DatePickerAttributes) {
        self.name = attrs.field_name();
        self.required = attrs.required;
        self.disabled = attrs.disabled;
        self.readonly = attrs.readonly;
        self.show_week_numbers = attrs.show_week_numbers;
        self.range = attrs.effective_range();
        self.availability = attrs.availability();
        self.initial_focus = attrs.effective_initial_focus();
        self.labels = attrs.labels();
        self.messages = attrs.messages();
        self.grid.set_first_day_of_week(attrs.effective_first_day_of_week());
        self.grid.set_week_numbering(attrs.week_numbering);
        self.segments.set_order(attrs.segment_order());

        tracing::debug!(target: targets::ATTRIBUTES, name = %self.name, "attributes applied");
        self.selected = parse_external(attrs.value.as_deref());
        self.reseed_value();
        if self.selected.is_none() {
            self.reseed_grid();
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set today's date using builder pattern, and show it in the grid.
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.grid.set_today(today);
        self.reseed_grid();
        self
    }

    /// Set the form field name using builder pattern.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether a value is required using builder pattern.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the min/max bounds using builder pattern.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Set the disabled dates and weekdays using builder pattern.
    pub fn with_availability(mut self, rule: AvailabilityRule) -> Self {
        self.availability = rule;
        self
    }

    /// Set the grid's first column using builder pattern.
    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.grid.set_first_day_of_week(day);
        self
    }

    /// Set whether week numbers are shown using builder pattern.
    pub fn with_week_numbers(mut self, show: bool) -> Self {
        self.show_week_numbers = show;
        self
    }

    /// Set the week numbering using builder pattern.
    pub fn with_week_numbering(mut self, numbering: WeekNumbering) -> Self {
        self.grid.set_week_numbering(numbering);
        self
    }

    /// Set the input field order using builder pattern.
    pub fn with_segment_order(mut self, order: SegmentOrder) -> Self {
        self.segments.set_order(order);
        self
    }

    /// Set the field labels using builder pattern.
    pub fn with_labels(mut self, labels: SegmentLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the validation messages using builder pattern.
    pub fn with_messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Set the date the grid opens on when empty, using builder pattern.
    pub fn with_initial_focus(mut self, date: Option<CalendarDate>) -> Self {
        self.initial_focus = date;
        self.reseed_grid();
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The committed date.
    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.selected
    }

    /// The committed date as short ISO.
    pub fn value(&self) -> Option<String> {
        self.selected.map(format_short_iso)
    }

    /// Form field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Check that no validity flag is set.
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Message for the highest-precedence validity flag.
    pub fn error_message(&self) -> Option<&str> {
        self.messages.for_validity(&self.validity)
    }

    /// Whether the dropdown is open.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the picker. Disabling closes the dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled && self.expanded {
            self.hide(false);
        }
        self.disabled = disabled;
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Make the picker read-only. This closes the dropdown.
    pub fn set_readonly(&mut self, readonly: bool) {
        if readonly && self.expanded {
            self.hide(false);
        }
        self.readonly = readonly;
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn availability(&self) -> &AvailabilityRule {
        &self.availability
    }

    /// The grid controller, read-only.
    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    /// The input controller, read-only.
    pub fn segments(&self) -> &SegmentedInput {
        &self.segments
    }

    /// Today's date as the picker sees it.
    pub fn today(&self) -> CalendarDate {
        self.grid.today()
    }

    /// Update today's date, e.g. after midnight.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.grid.set_today(today);
    }

    /// Current payload for form hosts.
    pub fn form_data(&self) -> FormFieldData {
        FormFieldData::new(self.name.clone(), self.selected, self.validity)
    }

    fn accepts_edits(&self) -> bool {
        !self.disabled && !self.readonly
    }

    // =========================================================================
    // External value
    // =========================================================================

    /// Re-seed from a value supplied by the host.
    ///
    /// No notification is emitted. A malformed string leaves the picker
    /// empty. A date that is out of range or unavailable is still shown,
    /// with the matching validity flag set.
    pub fn set_value(&mut self, value: Option<&str>) {
        let parsed = parse_external(value);
        if parsed.is_some() && parsed == self.selected {
            return;
        }
        self.selected = parsed;
        self.reseed_value();
    }

    /// Push the selected value into both controllers and re-derive its
    /// validity and phase.
    fn reseed_value(&mut self) {
        match self.selected {
            None => {
                self.segments.clear();
                self.validity = Validity::default();
                self.phase = SelectionPhase::Idle;
            }
            Some(date) => {
                self.segments.set_from_date(date);
                self.grid.jump_to_date(date, &self.range);
                self.validity = self.validity_for(date);
                self.phase = if self.validity.is_valid() {
                    SelectionPhase::Committed
                } else {
                    SelectionPhase::Invalid
                };
            }
        }
        tracing::debug!(target: targets::PICKER, value = ?self.selected, phase = ?self.phase, "value re-seeded");
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Check a candidate against the range, then the availability rule.
    pub fn evaluate_candidate(&self, date: CalendarDate) -> Result<CalendarDate, Rejection> {
        if !self.range.contains(date) {
            return Err(Rejection::RangeViolation {
                date,
                position: self.range.position(date),
            });
        }
        if self.availability.is_disabled(date) {
            return Err(Rejection::UnavailableDate { date });
        }
        Ok(date)
    }

    #[tracing::instrument(skip(self), target = "horizon_datepicker::picker", level = "debug")]
    fn commit(&mut self, candidate: CalendarDate) {
        self.phase = SelectionPhase::PendingCommit;
        match self.evaluate_candidate(candidate) {
            Ok(date) => {
                self.selected = Some(date);
                self.validity = Validity::default();
                self.grid.jump_to_date(date, &self.range);
                self.segments.set_from_date(date);
                self.phase = SelectionPhase::Committed;
                if self.expanded {
                    self.defer(DeferredTask::CloseDropdown, CLOSE_AFTER_COMMIT_DELAY);
                }
                tracing::debug!(target: targets::PICKER, %date, "date committed");

                let data = self.form_data();
                self.input.emit(data.clone());
                self.change.emit(data);
            }
            Err(rejection) => {
                self.validity = Validity::from_rejection(&rejection);
                self.phase = SelectionPhase::Invalid;
                tracing::debug!(target: targets::PICKER, %rejection, "candidate rejected");
            }
        }
    }

    /// Range and availability flags for `date`.
    fn validity_for(&self, date: CalendarDate) -> Validity {
        match self.evaluate_candidate(date) {
            Ok(_) => Validity::default(),
            Err(rejection) => Validity::from_rejection(&rejection),
        }
    }

    /// Report a date that is not committed.
    fn emit_prospective(&self, date: CalendarDate) {
        self.input.emit(FormFieldData::new(
            self.name.clone(),
            Some(date),
            self.validity_for(date),
        ));
    }

    /// Commit the typed date if it is complete.
    ///
    /// Retyping the committed value clears flags left by an earlier
    /// rejected attempt without notifying.
    fn submit_typed(&mut self) {
        let Some(candidate) = self.segments.to_candidate_date() else {
            return;
        };
        if Some(candidate) == self.selected {
            self.validity = self.validity_for(candidate);
            self.phase = if self.validity.is_valid() {
                SelectionPhase::Committed
            } else {
                SelectionPhase::Invalid
            };
        } else {
            self.commit(candidate);
        }
    }

    /// Recompute every validity flag and settle the phase.
    ///
    /// Range and availability are checked against the date shown in the
    /// input, or the committed value if the input is incomplete. With
    /// neither, flags from the last rejected attempt are kept. A required
    /// picker with any empty field is missing its value.
    pub fn validate(&mut self) -> Validity {
        if let Some(date) = self.segments.to_candidate_date().or(self.selected) {
            self.validity = self.validity_for(date);
        }
        self.validity.value_missing = self.required && !self.segments.is_complete();
        self.phase = if !self.validity.is_valid() {
            SelectionPhase::Invalid
        } else if self.selected.is_some() {
            SelectionPhase::Committed
        } else {
            SelectionPhase::Idle
        };
        tracing::debug!(target: targets::PICKER, validity = ?self.validity, "validated");
        self.validity
    }

    // =========================================================================
    // Dropdown
    // =========================================================================

    /// Open the dropdown on the value, the initial focus, or today.
    pub fn open(&mut self) {
        if !self.accepts_edits() || self.expanded {
            return;
        }
        self.expanded = true;
        self.reseed_grid();
        self.defer(DeferredTask::FocusGridCell, GRID_FOCUS_DELAY);
        tracing::debug!(target: targets::PICKER, "dropdown opened");
        self.expanded_changed.emit(true);
    }

    /// Close the dropdown and return focus to the first input field.
    ///
    /// Neither the value nor the validity flags change.
    pub fn close(&mut self) {
        if self.disabled || !self.expanded {
            return;
        }
        self.hide(true);
    }

    /// Open the dropdown if closed, close it if open.
    pub fn toggle_open(&mut self) {
        if self.expanded {
            self.close();
        } else {
            self.open();
        }
    }

    fn hide(&mut self, return_focus: bool) {
        self.expanded = false;
        self.deferred.cancel_all();
        if return_focus {
            self.defer(DeferredTask::FocusFirstSegment, SEGMENT_FOCUS_DELAY);
        }
        tracing::debug!(target: targets::PICKER, "dropdown closed");
        self.expanded_changed.emit(false);
    }

    fn reseed_grid(&mut self) {
        let target = self
            .selected
            .or(self.initial_focus)
            .unwrap_or_else(|| self.grid.today());
        self.grid.jump_to_date(target, &self.range);
    }

    // =========================================================================
    // Grid intents
    // =========================================================================

    /// A key pressed while the grid has focus.
    pub fn grid_key(&mut self, press: KeyPress) {
        if !self.accepts_edits() || !self.expanded {
            return;
        }
        let before = self.grid.focus_date();
        match self.grid.handle_key(press) {
            GridAction::Commit(date) => self.commit(date),
            GridAction::Close => self.close(),
            GridAction::None => self.grid_focus_moved(before),
        }
    }

    /// Announce a new grid focus date, if it differs from `before`.
    fn grid_focus_moved(&self, before: CalendarDate) {
        let focus = self.grid.focus_date();
        if focus != before {
            self.focus_requested.emit(FocusTarget::GridCell(focus));
            self.emit_prospective(focus);
        }
    }

    /// A grid cell was clicked.
    pub fn select_date(&mut self, date: CalendarDate) {
        if !self.accepts_edits() {
            return;
        }
        self.commit(date);
    }

    /// Move grid focus by `delta_days`.
    pub fn move_focus(&mut self, delta_days: i64) {
        if !self.accepts_edits() {
            return;
        }
        let before = self.grid.focus_date();
        self.grid.move_focus(delta_days);
        self.grid_focus_moved(before);
    }

    /// Page the grid by months (the previous/next buttons).
    pub fn page_month(&mut self, direction: i32) {
        if self.accepts_edits() {
            let before = self.grid.focus_date();
            self.grid.page_month(direction);
            self.grid_focus_moved(before);
        }
    }

    /// Page the grid by years.
    pub fn page_year(&mut self, direction: i32) {
        if self.accepts_edits() {
            let before = self.grid.focus_date();
            self.grid.page_year(direction);
            self.grid_focus_moved(before);
        }
    }

    /// Commit the grid's focus date.
    pub fn commit_focus(&mut self) {
        if self.accepts_edits() {
            self.commit(self.grid.commit_focus());
        }
    }

    /// Show and commit today.
    pub fn select_today(&mut self) {
        if !self.accepts_edits() {
            return;
        }
        let today = self.grid.jump_to_today();
        self.commit(today);
    }

    /// Empty the input and the value.
    ///
    /// Emits `change` with no value and cancels queued work.
    pub fn clear(&mut self) {
        if !self.accepts_edits() {
            return;
        }
        self.segments.clear();
        self.selected = None;
        self.validity = Validity::default();
        self.phase = SelectionPhase::Idle;
        self.deferred.cancel_all();
        tracing::debug!(target: targets::PICKER, "value cleared");
        self.change.emit(self.form_data());
    }

    // =========================================================================
    // Input intents
    // =========================================================================

    /// Text typed into a field.
    ///
    /// Returns what the field should now display, or `None` if edits are
    /// not accepted.
    pub fn input_segment(&mut self, kind: SegmentKind, raw: &str) -> Option<SegmentUpdate> {
        if !self.accepts_edits() {
            return None;
        }
        self.had_focus = true;
        let update = self.segments.update_segment(kind, raw);
        if update.advance {
            if let Some(next) = self.segments.order().next(kind) {
                self.focus_requested.emit(FocusTarget::Segment(next));
            }
        }
        if let Some(candidate) = self.segments.to_candidate_date() {
            self.emit_prospective(candidate);
        }
        Some(update)
    }

    /// A key pressed while a field has focus.
    pub fn segment_key(&mut self, kind: SegmentKind, press: KeyPress) {
        if self.disabled {
            return;
        }
        let order = self.segments.order();
        match press.key {
            Key::ArrowLeft => {
                if let Some(previous) = order.previous(kind) {
                    self.focus_requested.emit(FocusTarget::Segment(previous));
                }
            }
            Key::ArrowRight => {
                if let Some(next) = order.next(kind) {
                    self.focus_requested.emit(FocusTarget::Segment(next));
                }
            }
            Key::ArrowUp | Key::ArrowDown if !self.readonly => {
                let delta = if press.key == Key::ArrowUp { 1 } else { -1 };
                let today = self.grid.today();
                if let StepOutcome::Merged(date) = self.segments.step(kind, delta, today) {
                    self.emit_prospective(date);
                }
            }
            Key::Enter if !self.readonly => self.submit_typed(),
            Key::Space => self.open(),
            Key::Escape => self.close(),
            _ => {}
        }
    }

    /// The host reports that a field received focus.
    pub fn focus_segment(&mut self, _kind: SegmentKind) {
        if !self.disabled {
            self.had_focus = true;
        }
    }

    /// The host reports that focus left the widget.
    ///
    /// Commits a complete typed date, closes the dropdown, and queues
    /// validation if the user ever interacted with the input.
    pub fn blur(&mut self) {
        if self.disabled {
            return;
        }
        if !self.readonly {
            self.submit_typed();
        }
        if self.expanded {
            self.hide(false);
        }
        if self.had_focus {
            self.defer(DeferredTask::Validate, Duration::ZERO);
        }
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    fn defer(&mut self, task: DeferredTask, delay: Duration) {
        self.deferred.schedule(task, task, delay);
    }

    /// Run queued work due at or before `now`. Returns how many tasks ran.
    pub fn run_deferred(&mut self, now: Instant) -> usize {
        let mut ran = 0;
        loop {
            let tasks = self.deferred.process_expired(now);
            if tasks.is_empty() {
                return ran;
            }
            for task in tasks {
                ran += 1;
                self.run_task(task);
                // Closing cancels whatever else was due with it.
                if task == DeferredTask::CloseDropdown {
                    break;
                }
            }
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        tracing::trace!(target: targets::PICKER, ?task, "running deferred task");
        match task {
            DeferredTask::FocusGridCell => {
                if self.expanded {
                    let focus = self.grid.focus_date();
                    self.focus_requested.emit(FocusTarget::GridCell(focus));
                }
            }
            DeferredTask::CloseDropdown => {
                if self.expanded {
                    self.hide(true);
                }
            }
            DeferredTask::FocusFirstSegment => {
                let first = self.segments.order().first();
                self.focus_requested.emit(FocusTarget::Segment(first));
            }
            DeferredTask::Validate => {
                self.validate();
            }
        }
    }

    /// Time from `now` until queued work is due, or `None` if idle.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.deferred.time_until_next(now)
    }

    /// Number of queued tasks.
    pub fn pending_tasks(&self) -> usize {
        self.deferred.pending_count()
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> DatePickerSnapshot {
        let segments = self.segments.order().kinds().map(|kind| SegmentView {
            kind,
            label: self.labels.label(kind).to_string(),
            text: self.segments.display(kind).to_string(),
            placeholder: self.labels.placeholder(kind),
            state: self.segments.state(kind),
        });

        DatePickerSnapshot {
            value: self.selected,
            view_year: self.grid.view_year(),
            view_month: self.grid.view_month(),
            transition: self.grid.transition(),
            weeks: self
                .grid
                .weeks(self.selected, &self.range, &self.availability),
            show_week_numbers: self.show_week_numbers,
            segments,
            separator: self.segments.order().separator(),
            expanded: self.expanded,
            phase: self.phase,
            validity: self.validity,
            error_message: self.error_message().map(str::to_string),
            required: self.required,
            disabled: self.disabled,
            readonly: self.readonly,
        }
    }
}

/// Parse a host-supplied value; malformed strings are logged and dropped.
fn parse_external(value: Option<&str>) -> Option<CalendarDate> {
    let text = value.map(str::trim).filter(|v| !v.is_empty())?;
    match parse_date_string(text) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(target: targets::PICKER, value = text, %err, "ignoring malformed value");
            None
        }
    }
}

static_assertions::assert_impl_all!(DatePicker: Send, Sync);
