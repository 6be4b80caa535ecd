// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical extents and the viewport window they are tested against.

use crate::Milestone;

/// Vertical extent of an element, measured once at snapshot time.
///
/// Coordinates grow downwards, so a well-formed extent has `top <= bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Extent {
    /// Creates an extent from its two edges.
    #[must_use]
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Returns the vertical midpoint.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.top + self.bottom) * 0.5
    }

    /// Returns `true` if the element never takes part in the scroll flow.
    ///
    /// Elements that are hidden or positioned entirely above the origin measure
    /// with `top + bottom <= 0`.
    #[must_use]
    pub fn is_off_flow(&self) -> bool {
        self.top + self.bottom <= 0.0
    }

    /// Returns `true` if the bottom edge lies above the top edge.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.bottom < self.top
    }

    /// Returns `true` if the extent has no positive height.
    ///
    /// For such extents the edge milestones can latch before the strict
    /// midpoint one, so snapshots route them through [`crate::MalformedGeometry`].
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.bottom <= self.top
    }

    /// Returns the extent with its edges swapped if it was inverted.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_inverted() {
            Self::new(self.bottom, self.top)
        } else {
            self
        }
    }

    /// Returns `true` if `milestone` is satisfied when the lowest visible
    /// coordinate is `current_bottom`.
    ///
    /// The edge milestones accept touching the boundary; the midpoint must be
    /// strictly inside.
    #[must_use]
    pub fn reaches(&self, milestone: Milestone, current_bottom: f64) -> bool {
        match milestone {
            Milestone::Top => self.top - current_bottom <= 0.0,
            Milestone::Middle => self.midpoint() - current_bottom < 0.0,
            Milestone::Bottom => self.bottom - current_bottom <= 0.0,
        }
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Extent {
    fn from(rect: kurbo::Rect) -> Self {
        Self::new(rect.y0, rect.y1)
    }
}

/// The visible vertical span of the scrolling container for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportWindow {
    /// Current scroll offset. May be negative.
    pub scroll_offset: f64,
    /// Height of the viewport, expected to be positive.
    pub viewport_height: f64,
}

impl ViewportWindow {
    /// Creates a window from a scroll offset and a viewport height.
    #[must_use]
    pub const fn new(scroll_offset: f64, viewport_height: f64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
        }
    }

    /// Returns the lowest coordinate currently visible.
    #[must_use]
    pub fn current_bottom(&self) -> f64 {
        self.viewport_height + self.scroll_offset
    }
}
