// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Milestone notifications and the sinks that receive them.

use alloc::vec::Vec;
use core::fmt;

use crate::{ElementId, Milestone};

/// A single milestone transition of one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneEvent<K> {
    /// Snapshot-assigned id of the element.
    pub id: ElementId,
    /// Caller-side key of the element.
    pub key: K,
    /// The milestone that latched.
    pub milestone: Milestone,
}

impl<K: fmt::Display> fmt::Display for MilestoneEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.milestone {
            Milestone::Top => "started to become visible",
            Milestone::Middle => "is now more than 50% visible",
            Milestone::Bottom => "is now fully visible",
        };
        write!(f, "Element with id: {} {what} on the page.", self.key)
    }
}

/// Receives milestone transitions as they latch.
///
/// There is no acknowledgement channel: a sink cannot refuse or delay an event.
pub trait MilestoneSink<K> {
    /// Called once per latched milestone.
    fn notify(&mut self, event: MilestoneEvent<K>);
}

impl<K> MilestoneSink<K> for Vec<MilestoneEvent<K>> {
    fn notify(&mut self, event: MilestoneEvent<K>) {
        self.push(event);
    }
}

impl<K, S: MilestoneSink<K> + ?Sized> MilestoneSink<K> for &mut S {
    fn notify(&mut self, event: MilestoneEvent<K>) {
        (**self).notify(event);
    }
}

/// Logs every event at `info` level through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl<K: fmt::Display> MilestoneSink<K> for TracingSink {
    fn notify(&mut self, event: MilestoneEvent<K>) {
        tracing::info!(
            id = %event.id,
            milestone = %event.milestone,
            "{}",
            event
        );
    }
}

/// A sink backed by a closure. See [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<K, F: FnMut(MilestoneEvent<K>)> MilestoneSink<K> for FromFn<F> {
    fn notify(&mut self, event: MilestoneEvent<K>) {
        (self.0)(event);
    }
}

/// Creates a sink that calls `f` for every event.
///
/// ```
/// use understory_reveal::sink::from_fn;
/// use understory_reveal::{
///     Extent, MalformedGeometry, MilestoneEvent, Snapshot, SourceElement, ViewportWindow,
/// };
///
/// let mut snapshot = Snapshot::build(
///     [SourceElement::new("a", Extent::new(10.0, 20.0))],
///     MalformedGeometry::default(),
/// );
/// let mut names = Vec::new();
/// snapshot.evaluate(
///     ViewportWindow::new(0.0, 100.0),
///     &mut from_fn(|e: MilestoneEvent<&str>| names.push(e.milestone.name())),
/// );
/// assert_eq!(names, ["top", "middle", "bottom"]);
/// ```
pub fn from_fn<K, F: FnMut(MilestoneEvent<K>)>(f: F) -> FromFn<F> {
    FromFn(f)
}
