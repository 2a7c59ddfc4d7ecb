//! Core systems for Horizon Datepicker.
//!
//! This crate provides the infrastructure the date-selection engine is built on:
//!
//! - **Signal/Slot System**: Type-safe notifications from a widget to its host
//! - **Deferred Tasks**: Slot-keyed, generation-counted, cancelable one-shot work
//! - **Logging**: `tracing` target names for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_datepicker_core::Signal;
//!
//! let date_changed = Signal::<Option<String>>::new();
//! let conn_id = date_changed.connect(|value| {
//!     println!("Date changed to: {:?}", value);
//! });
//!
//! date_changed.emit(Some("2022-02-05".to_string()));
//! date_changed.disconnect(conn_id);
//! ```

pub mod deferred;
mod error;
pub mod logging;
pub mod signal;

pub use deferred::{DeferredId, DeferredQueue};
pub use error::{DeferredError, Result};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
