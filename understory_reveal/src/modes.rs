// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How a snapshot treats an element whose bottom edge does not lie below its
/// top edge: inverted or zero-height extents.
///
/// Consulted by [`crate::Snapshot::build`] after the off-flow filter. Only
/// tracked extents with positive height are guaranteed to latch top, middle and
/// bottom in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MalformedGeometry {
    /// Drop the element from tracking, like an off-flow element.
    #[default]
    Exclude,
    /// Swap the edges of an inverted element and track it normally.
    ///
    /// Zero-height elements have nothing to swap and are dropped.
    Normalize,
    /// Track the extent as measured.
    ///
    /// Milestones then fire in whatever order the raw edge comparisons give,
    /// so `bottom` may latch before `top` (inverted) or before `middle`
    /// (zero height).
    Keep,
}
