//! Integration tests for the selection coordinator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use horizon_datepicker::{
    AvailabilityRule, CalendarDate, DatePicker, DatePickerAttributes, DateRange, FocusTarget,
    FormFieldData, Key, KeyPress, SegmentKind, SelectionPhase,
};
use parking_lot::Mutex;

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn later() -> Instant {
    Instant::now() + Duration::from_secs(1)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> DatePicker {
    init_tracing();
    DatePicker::new()
        .with_name("startDate")
        .with_today(date(2022, 2, 10))
}

/// Collects every payload a signal emits.
fn record(signal: &horizon_datepicker::Signal<FormFieldData>) -> Arc<Mutex<Vec<FormFieldData>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    signal.connect(move |data| sink.lock().push(data.clone()));
    events
}

fn record_focus(picker: &DatePicker) -> Arc<Mutex<Vec<FocusTarget>>> {
    let targets = Arc::new(Mutex::new(Vec::new()));
    let sink = targets.clone();
    picker.focus_requested.connect(move |target| sink.lock().push(*target));
    targets
}

#[test]
fn move_focus_across_month_updates_view() {
    let mut picker = setup();
    picker.open();
    picker.grid_key(KeyPress::new(Key::ArrowDown));
    picker.grid_key(KeyPress::new(Key::ArrowDown));
    picker.grid_key(KeyPress::new(Key::ArrowDown));

    let grid = picker.grid();
    assert_eq!(grid.focus_date(), date(2022, 3, 3));
    assert_eq!((grid.view_year(), grid.view_month()), (2022, 3));

    picker.move_focus(-365);
    let grid = picker.grid();
    assert_eq!((grid.view_year(), grid.view_month()), (2021, 3));
}

#[test]
fn out_of_range_commit_leaves_selection() {
    let mut picker = setup().with_range(DateRange::new(Some(date(2022, 2, 2)), Some(date(2022, 2, 22))));
    let changes = record(&picker.change);

    picker.select_date(date(2022, 2, 20));
    picker.select_date(date(2022, 2, 23));

    assert!(picker.validity().out_of_range);
    assert_eq!(picker.selected_date(), Some(date(2022, 2, 20)));
    assert_eq!(picker.phase(), SelectionPhase::Invalid);
    assert_eq!(changes.lock().len(), 1);
}

#[test]
fn unavailable_then_available_commit() {
    let mut picker =
        setup().with_availability(AvailabilityRule::new().with_disabled_dates([date(2022, 2, 4)]));
    let changes = record(&picker.change);

    picker.select_date(date(2022, 2, 4));
    assert!(picker.validity().date_unavailable);
    assert_eq!(picker.selected_date(), None);
    assert!(changes.lock().is_empty());

    picker.select_date(date(2022, 2, 5));
    assert!(picker.is_valid());
    let changes = changes.lock();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].value.as_deref(), Some("2022-02-05"));
    assert_eq!(changes[0].name, "startDate");
    assert!(changes[0].is_valid);
}

#[test]
fn typed_day_clamps_to_february() {
    let mut picker = setup();
    picker.input_segment(SegmentKind::Month, "02");
    picker.input_segment(SegmentKind::Year, "2023");
    picker.input_segment(SegmentKind::Day, "3");
    let update = picker.input_segment(SegmentKind::Day, "32").unwrap();

    assert_eq!(update.display, "28");
    assert_eq!(picker.segments().display(SegmentKind::Day), "28");
    assert_eq!(picker.segments().to_candidate_date(), Some(date(2023, 2, 28)));
}

#[test]
fn complete_typed_date_emits_input_then_commits_on_enter() {
    let mut picker = setup();
    let inputs = record(&picker.input);
    let changes = record(&picker.change);

    picker.input_segment(SegmentKind::Day, "5");
    picker.input_segment(SegmentKind::Month, "2");
    assert!(inputs.lock().is_empty());

    picker.input_segment(SegmentKind::Year, "2022");
    assert_eq!(inputs.lock().len(), 1);
    assert!(changes.lock().is_empty());
    assert_eq!(picker.selected_date(), None);

    picker.segment_key(SegmentKind::Year, KeyPress::new(Key::Enter));
    assert_eq!(picker.selected_date(), Some(date(2022, 2, 5)));
    assert_eq!(changes.lock().len(), 1);
    assert_eq!(picker.grid().focus_date(), date(2022, 2, 5));
}

#[test]
fn typing_advances_focus_in_display_order() {
    let mut picker = setup();
    let targets = record_focus(&picker);

    picker.input_segment(SegmentKind::Day, "1");
    picker.input_segment(SegmentKind::Day, "12");
    picker.input_segment(SegmentKind::Month, "4");
    picker.input_segment(SegmentKind::Year, "2022");

    assert_eq!(
        *targets.lock(),
        vec![
            FocusTarget::Segment(SegmentKind::Month),
            FocusTarget::Segment(SegmentKind::Year),
        ]
    );
}

#[test]
fn required_missing_takes_message_precedence() {
    let mut picker = setup()
        .with_required(true)
        .with_range(DateRange::new(None, Some(date(2022, 2, 22))));

    picker.select_date(date(2022, 3, 1));
    let validity = picker.validate();

    assert!(validity.value_missing);
    assert!(validity.out_of_range);
    assert_eq!(picker.error_message(), Some("This field is required"));
}

#[test]
fn escape_closes_without_touching_value() {
    let mut picker = setup().with_range(DateRange::new(None, Some(date(2022, 2, 22))));
    picker.select_date(date(2022, 2, 5));
    picker.select_date(date(2022, 3, 5));
    let validity = picker.validity();

    picker.open();
    assert!(picker.is_expanded());
    picker.grid_key(KeyPress::new(Key::ArrowRight));
    picker.grid_key(KeyPress::new(Key::Escape));

    assert!(!picker.is_expanded());
    assert_eq!(picker.selected_date(), Some(date(2022, 2, 5)));
    assert_eq!(picker.validity(), validity);
}

#[test]
fn rapid_enter_closes_once() {
    let mut picker = setup();
    let closes = Arc::new(Mutex::new(0));
    let sink = closes.clone();
    picker.expanded_changed.connect(move |open| {
        if !*open {
            *sink.lock() += 1;
        }
    });
    let targets = record_focus(&picker);

    picker.open();
    picker.grid_key(KeyPress::new(Key::Enter));
    picker.grid_key(KeyPress::new(Key::Enter));
    assert_eq!(picker.pending_tasks(), 2);

    picker.run_deferred(later());

    assert_eq!(*closes.lock(), 1);
    assert_eq!(
        *targets.lock(),
        vec![FocusTarget::Segment(SegmentKind::Day)]
    );
    assert_eq!(picker.pending_tasks(), 0);
}

#[test]
fn opening_focuses_grid_cell_after_delay() {
    let mut picker = setup();
    picker.set_value(Some("2022-04-18"));
    let targets = record_focus(&picker);

    let opened_at = Instant::now();
    picker.open();
    assert_eq!(picker.grid().view_month(), 4);
    assert!(picker.time_until_next(opened_at).unwrap() > Duration::from_millis(150));

    picker.run_deferred(later());
    assert_eq!(
        *targets.lock(),
        vec![FocusTarget::GridCell(date(2022, 4, 18))]
    );
}

#[test]
fn clear_cancels_pending_work() {
    let mut picker = setup();
    let targets = record_focus(&picker);
    let changes = record(&picker.change);
    picker.select_date(date(2022, 2, 5));

    picker.open();
    picker.clear();

    assert_eq!(picker.pending_tasks(), 0);
    assert_eq!(picker.run_deferred(later()), 0);
    assert!(targets.lock().is_empty());
    assert_eq!(picker.selected_date(), None);
    assert!(picker.segments().is_empty());

    let changes = changes.lock();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[1].value, None);
}

#[test]
fn arrow_on_complete_segments_notifies_immediately() {
    let mut picker = setup();
    picker.select_date(date(2022, 1, 31));
    let inputs = record(&picker.input);

    picker.segment_key(SegmentKind::Month, KeyPress::new(Key::ArrowUp));

    let inputs = inputs.lock();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].value.as_deref(), Some("2022-02-28"));
    assert_eq!(picker.selected_date(), Some(date(2022, 1, 31)));
}

#[test]
fn arrow_on_empty_year_seeds_from_today() {
    let mut picker = setup();
    let inputs = record(&picker.input);

    picker.segment_key(SegmentKind::Year, KeyPress::new(Key::ArrowDown));

    assert_eq!(picker.segments().display(SegmentKind::Year), "2021");
    assert!(inputs.lock().is_empty());
}

#[test]
fn blur_commits_typed_date_and_validates() {
    let mut picker = setup().with_required(true);
    picker.input_segment(SegmentKind::Day, "5");
    picker.input_segment(SegmentKind::Month, "2");
    picker.input_segment(SegmentKind::Year, "2022");
    picker.blur();
    picker.run_deferred(later());

    assert_eq!(picker.value().as_deref(), Some("2022-02-05"));
    assert!(picker.is_valid());
    assert_eq!(picker.phase(), SelectionPhase::Committed);
}

#[test]
fn today_commits_today() {
    let mut picker = setup();
    picker.open();
    picker.page_year(-2);
    picker.select_today();

    assert_eq!(picker.selected_date(), Some(date(2022, 2, 10)));
    assert_eq!(picker.grid().view_year(), 2022);
}

#[test]
fn paging_then_typing_uses_latest_state() {
    let mut picker = setup();
    picker.open();
    picker.page_month(1);
    picker.input_segment(SegmentKind::Day, "15");
    picker.input_segment(SegmentKind::Month, "06");
    picker.input_segment(SegmentKind::Year, "2022");
    picker.segment_key(SegmentKind::Year, KeyPress::new(Key::Enter));

    assert_eq!(picker.selected_date(), Some(date(2022, 6, 15)));
    assert_eq!(picker.grid().view_month(), 6);
}

#[test]
fn attributes_seed_the_picker() {
    let attrs = DatePickerAttributes::from_toml_str(
        r#"
        value = "2022-02-04"
        label = "Arrival date"
        disabled-dates = "2022-02-04"
        locale = "en-US"
        "#,
    )
    .unwrap();
    let picker = DatePicker::from_attributes(&attrs);

    assert_eq!(picker.name(), "arrivalDate");
    assert_eq!(picker.selected_date(), Some(date(2022, 2, 4)));
    assert!(picker.validity().date_unavailable);
    assert_eq!(picker.phase(), SelectionPhase::Invalid);
    assert_eq!(picker.snapshot().segments[0].kind, SegmentKind::Month);
}

#[test]
fn malformed_value_attribute_falls_back_to_empty() {
    let attrs = DatePickerAttributes {
        value: Some("02/30/2022".into()),
        ..Default::default()
    };
    let picker = DatePicker::from_attributes(&attrs);
    assert_eq!(picker.selected_date(), None);
    assert!(picker.is_valid());
}

#[test]
fn change_payload_serializes() {
    let mut picker = setup();
    let changes = record(&picker.change);
    picker.select_date(date(2022, 2, 5));

    let json = changes.lock()[0].to_json().unwrap();
    assert!(json.contains(r#""value":"2022-02-05""#));
    assert!(json.contains(r#""isValid":true"#));
}

#[test]
fn retyping_committed_value_clears_range_flag() {
    let mut picker = setup().with_range(DateRange::new(Some(date(2022, 2, 2)), Some(date(2022, 2, 22))));
    let changes = record(&picker.change);
    picker.select_date(date(2022, 2, 20));

    picker.input_segment(SegmentKind::Day, "23");
    picker.segment_key(SegmentKind::Day, KeyPress::new(Key::Enter));
    assert!(picker.validity().out_of_range);
    assert_eq!(picker.phase(), SelectionPhase::Invalid);

    picker.input_segment(SegmentKind::Day, "20");
    picker.segment_key(SegmentKind::Day, KeyPress::new(Key::Enter));
    assert!(picker.is_valid());
    assert_eq!(picker.phase(), SelectionPhase::Committed);

    picker.blur();
    picker.run_deferred(later());
    assert!(picker.is_valid());
    assert_eq!(picker.error_message(), None);
    assert_eq!(picker.selected_date(), Some(date(2022, 2, 20)));
    assert_eq!(changes.lock().len(), 1);
}

#[test]
fn validate_checks_the_date_on_screen() {
    let mut picker = setup().with_range(DateRange::new(None, Some(date(2022, 2, 22))));
    picker.select_date(date(2022, 2, 20));

    picker.input_segment(SegmentKind::Day, "25");
    picker.segment_key(SegmentKind::Day, KeyPress::new(Key::Enter));
    assert!(picker.validity().out_of_range);

    picker.input_segment(SegmentKind::Day, "20");
    assert!(picker.validate().is_valid());
    assert_eq!(picker.phase(), SelectionPhase::Committed);
}

#[test]
fn reapplying_attributes_revalidates_kept_value() {
    let mut attrs = DatePickerAttributes {
        value: Some("2022-02-05".into()),
        ..Default::default()
    };
    let mut picker = DatePicker::from_attributes(&attrs);
    assert_eq!(picker.phase(), SelectionPhase::Committed);

    attrs.min_date = Some("2022-03-01".into());
    picker.apply_attributes(&attrs);

    assert_eq!(picker.selected_date(), Some(date(2022, 2, 5)));
    assert!(picker.validity().out_of_range);
    assert_eq!(picker.phase(), SelectionPhase::Invalid);
    assert_eq!(picker.grid().view_month(), 2);
    assert_eq!(picker.grid().focus_date(), date(2022, 3, 1));

    attrs.min_date = None;
    picker.apply_attributes(&attrs);
    assert!(picker.is_valid());
    assert_eq!(picker.phase(), SelectionPhase::Committed);
}

#[test]
fn malformed_bounds_do_not_prevent_construction() {
    let attrs = DatePickerAttributes::from_toml_str(
        r#"
        value = "2022-02-05"
        min-date = "nonsense"
        max-date = "2022-02-22"
        focus-date = "2022-02-30"
        first-day-of-week = 9
        "#,
    )
    .unwrap();
    let picker = DatePicker::from_attributes(&attrs);

    assert_eq!(*picker.range(), DateRange::new(None, Some(date(2022, 2, 22))));
    assert_eq!(picker.grid().first_day_of_week(), chrono::Weekday::Sun);
    assert_eq!(picker.selected_date(), Some(date(2022, 2, 5)));
    assert!(picker.is_valid());
}

#[test]
fn paging_announces_the_new_focus_date() {
    let mut picker = setup();
    picker.open();
    let targets = record_focus(&picker);
    let inputs = record(&picker.input);

    picker.page_month(1);
    picker.move_focus(0);
    picker.page_year(-1);
    picker.move_focus(2);

    assert_eq!(
        *targets.lock(),
        vec![
            FocusTarget::GridCell(date(2022, 3, 1)),
            FocusTarget::GridCell(date(2021, 3, 1)),
            FocusTarget::GridCell(date(2021, 3, 3)),
        ]
    );
    let values: Vec<_> = inputs.lock().iter().map(|d| d.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            Some("2022-03-01".to_string()),
            Some("2021-03-01".to_string()),
            Some("2021-03-03".to_string()),
        ]
    );
    assert_eq!(picker.selected_date(), None);
}
