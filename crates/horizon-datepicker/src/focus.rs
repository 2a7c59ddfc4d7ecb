//! Keyboard focus requests and the dropdown focus trap.

use crate::dates::CalendarDate;
use crate::segments::SegmentKind;

/// Where the picker asks the host to move keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// One of the three input fields.
    Segment(SegmentKind),
    /// The grid cell showing this date.
    GridCell(CalendarDate),
}

/// Named positions in the focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusRole {
    FirstSegment,
    LastSegment,
    FirstGridElement,
    LastGridElement,
}

impl FocusRole {
    fn index(self) -> usize {
        match self {
            Self::FirstSegment => 0,
            Self::LastSegment => 1,
            Self::FirstGridElement => 2,
            Self::LastGridElement => 3,
        }
    }
}

/// Host element handles for each [`FocusRole`].
///
/// `H` is whatever the host uses to identify a focusable element. The host
/// refreshes the grid roles after each render of the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRoles<H> {
    roles: [Option<H>; 4],
}

impl<H> Default for FocusRoles<H> {
    fn default() -> Self {
        Self {
            roles: [None, None, None, None],
        }
    }
}

impl<H: PartialEq> FocusRoles<H> {
    /// All roles unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_first_segment(&mut self, handle: H) {
        self.roles[FocusRole::FirstSegment.index()] = Some(handle);
    }

    pub fn set_last_segment(&mut self, handle: H) {
        self.roles[FocusRole::LastSegment.index()] = Some(handle);
    }

    pub fn set_first_grid_element(&mut self, handle: H) {
        self.roles[FocusRole::FirstGridElement.index()] = Some(handle);
    }

    pub fn set_last_grid_element(&mut self, handle: H) {
        self.roles[FocusRole::LastGridElement.index()] = Some(handle);
    }

    /// Forget the grid roles, e.g. when the dropdown closes.
    pub fn clear_grid(&mut self) {
        self.roles[FocusRole::FirstGridElement.index()] = None;
        self.roles[FocusRole::LastGridElement.index()] = None;
    }

    /// Handle assigned to `role`.
    pub fn get(&self, role: FocusRole) -> Option<&H> {
        self.roles[role.index()].as_ref()
    }

    /// Where Tab from `current` should go to keep focus inside the open
    /// dropdown.
    ///
    /// Tab on the last grid element wraps to the first; Shift+Tab on the
    /// first wraps to the last. Any other element returns `None` and
    /// focus moves normally.
    pub fn tab_wraps(&self, current: &H, shift: bool) -> Option<&H> {
        let (edge, wrap_to) = if shift {
            (FocusRole::FirstGridElement, FocusRole::LastGridElement)
        } else {
            (FocusRole::LastGridElement, FocusRole::FirstGridElement)
        };
        if self.get(edge) == Some(current) {
            self.get(wrap_to)
        } else {
            None
        }
    }
}
