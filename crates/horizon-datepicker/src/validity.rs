//! Validity flags and the messages shown for them.

use serde::{Deserialize, Serialize};

use crate::dates::{CalendarDate, RangePosition};

/// Why a candidate date was not committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The candidate lies before `min` or after `max`.
    #[error("{date} is outside the selectable range ({position:?})")]
    RangeViolation {
        date: CalendarDate,
        position: RangePosition,
    },
    /// The candidate is a disabled date or falls on a disabled weekday.
    #[error("{date} is unavailable")]
    UnavailableDate { date: CalendarDate },
}

/// Constraint flags, serialized the way form hosts expect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    /// Required, but no complete value.
    pub value_missing: bool,
    /// The value lies outside min/max.
    pub out_of_range: bool,
    /// The value is a disabled date or weekday.
    pub date_unavailable: bool,
}

impl Validity {
    /// Flags for a rejected candidate.
    pub fn from_rejection(rejection: &Rejection) -> Self {
        match rejection {
            Rejection::RangeViolation { .. } => Self {
                out_of_range: true,
                ..Self::default()
            },
            Rejection::UnavailableDate { .. } => Self {
                date_unavailable: true,
                ..Self::default()
            },
        }
    }

    /// Check that no flag is set.
    pub fn is_valid(&self) -> bool {
        self.failure().is_none()
    }

    /// The flag that decides the user-visible message.
    ///
    /// Precedence: value missing, then out of range, then unavailable.
    pub fn failure(&self) -> Option<ValidityFailure> {
        if self.value_missing {
            Some(ValidityFailure::ValueMissing)
        } else if self.out_of_range {
            Some(ValidityFailure::OutOfRange)
        } else if self.date_unavailable {
            Some(ValidityFailure::DateUnavailable)
        } else {
            None
        }
    }
}

/// The single failure reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidityFailure {
    ValueMissing,
    OutOfRange,
    DateUnavailable,
}

/// Text shown for each [`ValidityFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessages {
    pub required: String,
    pub range: String,
    pub unavailable: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            range: "The date you have selected is not within the date range".to_string(),
            unavailable: "The date you have selected is unavailable".to_string(),
        }
    }
}

impl ErrorMessages {
    /// Message for a failure.
    pub fn message(&self, failure: ValidityFailure) -> &str {
        match failure {
            ValidityFailure::ValueMissing => &self.required,
            ValidityFailure::OutOfRange => &self.range,
            ValidityFailure::DateUnavailable => &self.unavailable,
        }
    }

    /// Message for the highest-precedence flag in `validity`, if any.
    pub fn for_validity(&self, validity: &Validity) -> Option<&str> {
        validity.failure().map(|failure| self.message(failure))
    }
}
