//! Horizon Datepicker - date selection and navigation engine.
//!
//! A date picker is two editing surfaces over one value: a segmented text
//! input (day, month, year) and a calendar grid in a dropdown. This crate
//! holds the state machine behind them and leaves rendering to the host.
//!
//! - [`dates`]: month lengths, grids, range and availability, the wire format
//! - [`calendar`]: the grid controller (view month, focus date, paging)
//! - [`segments`]: the input controller (clamping, auto-advance, merging)
//! - [`picker`]: the coordinator that validates and commits candidates
//! - [`attributes`]: host attributes, loadable from TOML
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horizon_datepicker::{DatePicker, DatePickerAttributes, SegmentKind};
//!
//! let attrs = DatePickerAttributes::from_toml_str(r#"
//!     label = "Start date"
//!     min-date = "2022-02-02"
//!     max-date = "2022-02-22"
//! "#).unwrap();
//!
//! let mut picker = DatePicker::from_attributes(&attrs)
//!     .with_today(NaiveDate::from_ymd_opt(2022, 2, 10).unwrap());
//!
//! picker.change.connect(|data| println!("{}", data.to_json().unwrap()));
//!
//! picker.input_segment(SegmentKind::Day, "5");
//! picker.input_segment(SegmentKind::Month, "2");
//! picker.input_segment(SegmentKind::Year, "2022");
//! picker.blur();
//! assert_eq!(picker.value().as_deref(), Some("2022-02-05"));
//! ```

pub mod attributes;
pub mod calendar;
pub mod dates;
mod error;
pub mod focus;
pub mod form;
pub mod keys;
pub mod picker;
pub mod segments;
pub mod validity;

pub use horizon_datepicker_core::{logging, ConnectionId, Signal};

pub use attributes::DatePickerAttributes;
pub use calendar::{CalendarGrid, GridAction, GridCell, GridWeek, ViewTransition};
pub use dates::{AvailabilityRule, CalendarDate, DateRange, ParseError, WeekNumbering};
pub use error::{Error, Result};
pub use focus::{FocusRole, FocusRoles, FocusTarget};
pub use form::FormFieldData;
pub use keys::{Key, KeyPress};
pub use picker::{DatePicker, DatePickerSnapshot, SegmentView, SelectionPhase};
pub use segments::{SegmentKind, SegmentOrder, SegmentedInput, ValidationState};
pub use validity::{ErrorMessages, Rejection, Validity, ValidityFailure};
