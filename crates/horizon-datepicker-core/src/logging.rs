//! Logging facilities for Horizon Datepicker.
//!
//! Horizon Datepicker uses the `tracing` crate for instrumentation. To see
//! logs, install a tracing subscriber in the host application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_datepicker=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core infrastructure target.
    pub const CORE: &str = "horizon_datepicker_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_datepicker_core::signal";
    /// Deferred task queue target.
    pub const DEFERRED: &str = "horizon_datepicker_core::deferred";
    /// Date parsing and attribute lists.
    pub const DATES: &str = "horizon_datepicker::dates";
    /// Calendar grid controller.
    pub const CALENDAR: &str = "horizon_datepicker::calendar";
    /// Segmented input controller.
    pub const SEGMENTS: &str = "horizon_datepicker::segments";
    /// Selection coordinator.
    pub const PICKER: &str = "horizon_datepicker::picker";
    /// Host attribute loading.
    pub const ATTRIBUTES: &str = "horizon_datepicker::attributes";
}
