// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal tracker: wires a snapshot to its host collaborators.
//!
//! ## Usage
//!
//! 1) Create a [`RevealTracker`] with the selector naming the elements to follow.
//! 2) Call [`RevealTracker::init`] with an [`ElementSource`]: this takes the
//!    geometry snapshot and evaluates it once at scroll offset zero.
//! 3) Forward each scroll offset to [`RevealTracker::on_scroll`], or hand a
//!    whole [`ScrollSignal`] to [`RevealTracker::run`].
//!
//! The host owns the scroll subscription; the tracker never registers itself
//! with a global event source.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    MalformedGeometry, MilestoneSink, Milestones, Snapshot, SourceElement, ViewportWindow,
};

/// Discovers and measures the elements matching a selector.
pub trait ElementSource {
    /// Caller-side identifier used in notifications.
    type Key;

    /// Returns the matching elements in document order.
    fn select(&self, selector: &str) -> Vec<SourceElement<Self::Key>>;
}

/// Supplies the current viewport height.
///
/// Read once per evaluation so that resizes are picked up.
pub trait ViewportMetrics {
    /// Returns the viewport height; expected to be positive.
    fn viewport_height(&self) -> f64;
}

impl ViewportMetrics for f64 {
    fn viewport_height(&self) -> f64 {
        *self
    }
}

/// A source of scroll offsets, one per scroll event.
pub trait ScrollSignal {
    /// Returns the next scroll offset, or `None` once the signal has ended.
    fn next_offset(&mut self) -> Option<f64>;
}

impl<I: Iterator<Item = f64>> ScrollSignal for I {
    fn next_offset(&mut self) -> Option<f64> {
        self.next()
    }
}

/// Tracker configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealConfig {
    /// Policy for elements measured with `bottom < top`.
    pub malformed: MalformedGeometry,
    /// Milestones forwarded to the sink.
    pub report: Milestones,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            malformed: MalformedGeometry::default(),
            report: Milestones::all(),
        }
    }
}

impl RevealConfig {
    /// Sets the policy for inverted extents.
    #[must_use]
    pub fn with_malformed(mut self, malformed: MalformedGeometry) -> Self {
        self.malformed = malformed;
        self
    }

    /// Sets which milestones are reported.
    #[must_use]
    pub fn with_report(mut self, report: Milestones) -> Self {
        self.report = report;
        self
    }
}

/// Follows the elements matched by a selector as the viewport scrolls.
///
/// ```
/// use understory_reveal::{
///     ElementSource, Extent, Milestone, MilestoneEvent, RevealTracker, SourceElement,
/// };
///
/// struct Page;
///
/// impl ElementSource for Page {
///     type Key = &'static str;
///
///     fn select(&self, selector: &str) -> Vec<SourceElement<&'static str>> {
///         assert_eq!(selector, "column");
///         vec![
///             SourceElement::new("above", Extent::new(100.0, 300.0)),
///             SourceElement::new("below", Extent::new(900.0, 1100.0)),
///         ]
///     }
/// }
///
/// let mut tracker = RevealTracker::new("column");
/// let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
///
/// // Viewport is 600 tall; `above` is fully shown straight away.
/// tracker.init(&Page, &600.0, &mut events);
/// assert_eq!(events.len(), 3);
///
/// // Scrolling 400 reveals the top of `below`; 600 its middle and bottom.
/// tracker.run([400.0, 600.0].into_iter(), &600.0, &mut events);
/// let below: Vec<Milestone> = events[3..].iter().map(|e| e.milestone).collect();
/// assert_eq!(below, [Milestone::Top, Milestone::Middle, Milestone::Bottom]);
/// ```
#[derive(Clone, Debug)]
pub struct RevealTracker<K> {
    selector: String,
    config: RevealConfig,
    snapshot: Option<Snapshot<K>>,
    last_window: Option<ViewportWindow>,
}

impl<K: Clone> RevealTracker<K> {
    /// Creates a tracker for the elements matching `selector`.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::with_config(selector, RevealConfig::default())
    }

    /// Creates a tracker with an explicit configuration.
    #[must_use]
    pub fn with_config(selector: impl Into<String>, config: RevealConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
            snapshot: None,
            last_window: None,
        }
    }

    /// Returns the selector this tracker follows.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> RevealConfig {
        self.config
    }

    /// Returns the snapshot taken by [`RevealTracker::init`], if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot<K>> {
        self.snapshot.as_ref()
    }

    /// Takes the geometry snapshot and evaluates it at scroll offset zero.
    ///
    /// Calling `init` again replaces the snapshot, and with it every latch.
    /// Returns the number of milestones latched by the initial evaluation.
    pub fn init<E, M, S>(&mut self, source: &E, metrics: &M, sink: &mut S) -> usize
    where
        E: ElementSource<Key = K> + ?Sized,
        M: ViewportMetrics + ?Sized,
        S: MilestoneSink<K> + ?Sized,
    {
        let elements = source.select(&self.selector);
        if elements.is_empty() {
            tracing::debug!(selector = %self.selector, "selector matched no elements");
        }
        self.snapshot = Some(Snapshot::build(elements, self.config.malformed));
        self.last_window = None;
        self.on_scroll(0.0, metrics, sink)
    }

    /// Evaluates the snapshot at `scroll_offset`.
    ///
    /// Returns the number of milestones latched. Before [`RevealTracker::init`]
    /// this does nothing.
    pub fn on_scroll<M, S>(&mut self, scroll_offset: f64, metrics: &M, sink: &mut S) -> usize
    where
        M: ViewportMetrics + ?Sized,
        S: MilestoneSink<K> + ?Sized,
    {
        let Some(snapshot) = self.snapshot.as_mut() else {
            tracing::warn!(
                selector = %self.selector,
                scroll_offset,
                "scroll before init; ignoring"
            );
            return 0;
        };
        let window = ViewportWindow::new(scroll_offset, metrics.viewport_height());
        self.last_window = Some(window);
        snapshot.evaluate_masked(window, self.config.report, sink)
    }

    /// Evaluates every offset from `signal` until it ends.
    ///
    /// Returns the total number of milestones latched.
    pub fn run<G, M, S>(&mut self, mut signal: G, metrics: &M, sink: &mut S) -> usize
    where
        G: ScrollSignal,
        M: ViewportMetrics + ?Sized,
        S: MilestoneSink<K> + ?Sized,
    {
        let mut latched = 0;
        while let Some(offset) = signal.next_offset() {
            latched += self.on_scroll(offset, metrics, sink);
        }
        latched
    }

    /// Snapshot of the tracker state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> RevealDebugInfo {
        let (tracked, excluded, completed) = self
            .snapshot
            .as_ref()
            .map_or((0, 0, 0), |s| (s.len(), s.excluded(), s.completed()));
        RevealDebugInfo {
            selector: self.selector.clone(),
            config: self.config,
            initialized: self.snapshot.is_some(),
            tracked,
            excluded,
            completed,
            last_window: self.last_window,
        }
    }
}

/// Debug snapshot of a [`RevealTracker`] state.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealDebugInfo {
    /// Selector the tracker follows.
    pub selector: String,
    /// Active configuration.
    pub config: RevealConfig,
    /// Whether [`RevealTracker::init`] has run.
    pub initialized: bool,
    /// Number of tracked elements.
    pub tracked: usize,
    /// Number of source elements dropped at snapshot time.
    pub excluded: usize,
    /// Number of tracked elements with every milestone latched.
    pub completed: usize,
    /// Window used by the most recent evaluation.
    pub last_window: Option<ViewportWindow>,
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{Extent, Milestone, MilestoneEvent};

    struct Columns(Vec<(&'static str, f64, f64)>);

    impl ElementSource for Columns {
        type Key = &'static str;

        fn select(&self, selector: &str) -> Vec<SourceElement<&'static str>> {
            if selector != "column" {
                return Vec::new();
            }
            self.0
                .iter()
                .map(|&(key, top, bottom)| SourceElement::new(key, Extent::new(top, bottom)))
                .collect()
        }
    }

    struct Resizing(core::cell::Cell<f64>);

    impl ViewportMetrics for Resizing {
        fn viewport_height(&self) -> f64 {
            self.0.get()
        }
    }

    fn page() -> Columns {
        Columns(vec![
            ("first", 100.0, 500.0),
            ("mobile-only", -300.0, -200.0),
            ("second", 900.0, 1300.0),
        ])
    }

    #[test]
    fn init_snapshots_and_evaluates_at_zero() {
        let mut tracker = RevealTracker::new("column");
        let mut events = Vec::new();
        let latched = tracker.init(&page(), &800.0, &mut events);
        assert_eq!(latched, 3);
        assert!(events.iter().all(|e: &MilestoneEvent<_>| e.key == "first"));

        let info = tracker.debug_info();
        assert!(info.initialized);
        assert_eq!(info.tracked, 2);
        assert_eq!(info.excluded, 1);
        assert_eq!(info.completed, 1);
        assert_eq!(info.last_window, Some(ViewportWindow::new(0.0, 800.0)));
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut tracker = RevealTracker::new("row");
        let mut events = Vec::new();
        assert_eq!(tracker.init(&page(), &800.0, &mut events), 0);
        assert_eq!(tracker.run([0.0, 1e6].into_iter(), &800.0, &mut events), 0);
        assert!(events.is_empty());
        assert!(tracker.snapshot().is_some_and(Snapshot::is_empty));
    }

    #[test]
    fn scroll_before_init_is_ignored() {
        let mut tracker = RevealTracker::<&str>::new("column");
        let mut events = Vec::new();
        assert_eq!(tracker.on_scroll(500.0, &800.0, &mut events), 0);
        assert!(events.is_empty());
        assert!(!tracker.debug_info().initialized);
        assert_eq!(tracker.debug_info().last_window, None);
    }

    #[test]
    fn run_pumps_signal_to_exhaustion() {
        let mut tracker = RevealTracker::new("column");
        let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
        tracker.init(&page(), &800.0, &mut events);
        events.clear();

        let latched = tracker.run([50.0, 200.0, 500.0, 500.0].into_iter(), &800.0, &mut events);
        let seen: Vec<_> = events.iter().map(|e| (e.key, e.milestone)).collect();
        assert_eq!(
            seen,
            [
                ("second", Milestone::Top),
                ("second", Milestone::Middle),
                ("second", Milestone::Bottom),
            ]
        );
        assert_eq!(latched, 3);
        assert_eq!(tracker.debug_info().completed, 2);
    }

    #[test]
    fn viewport_height_is_reread_per_evaluation() {
        let mut tracker = RevealTracker::new("column");
        let metrics = Resizing(core::cell::Cell::new(50.0));
        let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
        assert_eq!(tracker.init(&page(), &metrics, &mut events), 0);

        metrics.0.set(1400.0);
        assert_eq!(tracker.on_scroll(0.0, &metrics, &mut events), 6);
    }

    #[test]
    fn report_mask_limits_notifications() {
        let config = RevealConfig::default().with_report(Milestones::parse_list("bottom"));
        let mut tracker = RevealTracker::with_config("column", config);
        let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
        assert_eq!(tracker.init(&page(), &2000.0, &mut events), 6);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.milestone == Milestone::Bottom));
    }

    #[test]
    fn reinit_resets_latches() {
        let mut tracker = RevealTracker::new("column");
        let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
        tracker.init(&page(), &800.0, &mut events);
        tracker.init(&page(), &800.0, &mut events);
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn malformed_policy_reaches_snapshot() {
        let source = Columns(vec![("upside-down", 500.0, 400.0)]);
        let mut events: Vec<MilestoneEvent<&str>> = Vec::new();

        let mut excluding = RevealTracker::new("column");
        excluding.init(&source, &800.0, &mut events);
        assert_eq!(excluding.debug_info().excluded, 1);

        let config = RevealConfig::default().with_malformed(MalformedGeometry::Normalize);
        let mut normalizing = RevealTracker::with_config("column", config);
        assert_eq!(normalizing.init(&source, &800.0, &mut events), 3);
    }
}
