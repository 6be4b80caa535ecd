// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility evaluation: latching milestones against a viewport window.

use crate::{Milestone, MilestoneEvent, MilestoneSink, Milestones, Snapshot, ViewportWindow};

impl<K: Clone> Snapshot<K> {
    /// Latches every milestone newly satisfied by `window`, reporting each one
    /// to `sink`.
    ///
    /// Each element is checked in the order top, middle, bottom against the same
    /// `current_bottom`, so a large scroll jump can latch several milestones of
    /// one element in a single call. Latched milestones are never re-reported,
    /// which makes repeated calls with the same window harmless.
    ///
    /// Returns the number of milestones latched by this call.
    ///
    /// ```
    /// use understory_reveal::{
    ///     Extent, MalformedGeometry, Milestone, MilestoneEvent, Snapshot, SourceElement,
    ///     ViewportWindow,
    /// };
    ///
    /// let mut snapshot = Snapshot::build(
    ///     [SourceElement::new("col", Extent::new(500.0, 600.0))],
    ///     MalformedGeometry::default(),
    /// );
    ///
    /// let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
    /// assert_eq!(snapshot.evaluate(ViewportWindow::new(300.0, 200.0), &mut events), 1);
    /// assert_eq!(events[0].milestone, Milestone::Top);
    ///
    /// // Same window again: nothing new.
    /// assert_eq!(snapshot.evaluate(ViewportWindow::new(300.0, 200.0), &mut events), 0);
    /// ```
    pub fn evaluate<S>(&mut self, window: ViewportWindow, sink: &mut S) -> usize
    where
        S: MilestoneSink<K> + ?Sized,
    {
        self.evaluate_masked(window, Milestones::all(), sink)
    }

    /// Like [`Snapshot::evaluate`], but only milestones in `report` reach the
    /// sink.
    ///
    /// Milestones outside `report` still latch, so they are never reported by a
    /// later call either. The return value counts all latches.
    pub fn evaluate_masked<S>(
        &mut self,
        window: ViewportWindow,
        report: Milestones,
        sink: &mut S,
    ) -> usize
    where
        S: MilestoneSink<K> + ?Sized,
    {
        let current_bottom = window.current_bottom();
        let mut latched = 0;
        for element in self.elements_mut() {
            if element.is_complete() {
                continue;
            }
            let extent = element.extent();
            for milestone in Milestone::ALL {
                if !extent.reaches(milestone, current_bottom) || !element.latch(milestone) {
                    continue;
                }
                latched += 1;
                tracing::trace!(
                    id = %element.id(),
                    milestone = milestone.name(),
                    current_bottom,
                    "latched milestone"
                );
                if report.has(milestone) {
                    sink.notify(MilestoneEvent {
                        id: element.id(),
                        key: element.key().clone(),
                        milestone,
                    });
                }
            }
        }
        latched
    }
}
