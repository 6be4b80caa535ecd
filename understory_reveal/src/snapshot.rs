// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshot: the fixed set of elements a tracker follows.
//!
//! A [`Snapshot`] is built once from measured geometry. Every element that
//! survives the filters gets an [`ElementId`] equal to its position in the
//! source order, fixed edges, and an empty latch set. Elements are never added
//! or removed afterwards; only their latches change, and only through
//! [`Snapshot::evaluate`].

use alloc::vec::Vec;
use core::fmt;

use crate::{Extent, MalformedGeometry, Milestone, Milestones};

/// Identifier assigned to a tracked element at snapshot time.
///
/// The value is the element's index in the source sequence, so ids ascend in
/// source order and leave gaps where elements were excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    /// Creates an id from its raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A measured element as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceElement<K> {
    /// Caller-side identifier, carried into notifications.
    pub key: K,
    /// Measured vertical extent.
    pub extent: Extent,
}

impl<K> SourceElement<K> {
    /// Pairs a key with its measured extent.
    pub fn new(key: K, extent: Extent) -> Self {
        Self { key, extent }
    }
}

/// An element followed by a [`Snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedElement<K> {
    id: ElementId,
    key: K,
    extent: Extent,
    latched: Milestones,
}

impl<K> TrackedElement<K> {
    /// Returns the snapshot-assigned id.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the caller-side key.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the extent fixed at snapshot time.
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Returns the milestones latched so far.
    #[must_use]
    pub fn latched(&self) -> Milestones {
        self.latched
    }

    /// Returns `true` once the top edge has been seen.
    #[must_use]
    pub fn top_visible(&self) -> bool {
        self.latched.has(Milestone::Top)
    }

    /// Returns `true` once the element has been more than half visible.
    #[must_use]
    pub fn middle_visible(&self) -> bool {
        self.latched.has(Milestone::Middle)
    }

    /// Returns `true` once the element has been fully visible.
    #[must_use]
    pub fn bottom_visible(&self) -> bool {
        self.latched.has(Milestone::Bottom)
    }

    /// Returns `true` once all three milestones have latched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.latched.is_all()
    }

    /// Sets the latch for `milestone`, returning `true` if it was newly set.
    pub(crate) fn latch(&mut self, milestone: Milestone) -> bool {
        let bit = milestone.latch();
        if self.latched.contains(bit) {
            return false;
        }
        self.latched.insert(bit);
        true
    }
}

/// The tracked element set, in source order.
#[derive(Clone, Debug)]
pub struct Snapshot<K> {
    elements: Vec<TrackedElement<K>>,
    excluded: usize,
}

impl<K> Default for Snapshot<K> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            excluded: 0,
        }
    }
}

impl<K> Snapshot<K> {
    /// Builds a snapshot from measured elements.
    ///
    /// Off-flow elements (see [`Extent::is_off_flow`]) are always dropped.
    /// Inverted and zero-height extents (see [`Extent::is_degenerate`]) are
    /// handled according to `malformed`.
    ///
    /// ```
    /// use understory_reveal::{Extent, MalformedGeometry, Snapshot, SourceElement};
    ///
    /// let snapshot = Snapshot::build(
    ///     [
    ///         SourceElement::new("a", Extent::new(100.0, 200.0)),
    ///         SourceElement::new("hidden", Extent::new(-100.0, -50.0)),
    ///         SourceElement::new("c", Extent::new(300.0, 400.0)),
    ///     ],
    ///     MalformedGeometry::default(),
    /// );
    /// let ids: Vec<u32> = snapshot.iter().map(|e| e.id().get()).collect();
    /// assert_eq!(ids, [0, 2]);
    /// assert_eq!(snapshot.excluded(), 1);
    /// ```
    pub fn build<I>(source: I, malformed: MalformedGeometry) -> Self
    where
        I: IntoIterator<Item = SourceElement<K>>,
    {
        let mut snapshot = Self::default();
        for (index, SourceElement { key, extent }) in source.into_iter().enumerate() {
            let Ok(index) = u32::try_from(index) else {
                tracing::warn!(index, "snapshot index space exhausted; dropping the rest");
                break;
            };
            let extent = match admit(extent, malformed) {
                Some(extent) => extent,
                None => {
                    snapshot.excluded += 1;
                    continue;
                }
            };
            snapshot.elements.push(TrackedElement {
                id: ElementId(index),
                key,
                extent,
                latched: Milestones::empty(),
            });
        }
        tracing::debug!(
            tracked = snapshot.elements.len(),
            excluded = snapshot.excluded,
            "built geometry snapshot"
        );
        snapshot
    }

    /// Returns the number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns how many source elements were dropped at build time.
    #[must_use]
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Returns how many tracked elements have latched every milestone.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.elements.iter().filter(|e| e.is_complete()).count()
    }

    /// Looks up a tracked element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&TrackedElement<K>> {
        self.elements
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.elements[i])
    }

    /// Iterates tracked elements in source order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedElement<K>> {
        self.elements.iter()
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [TrackedElement<K>] {
        &mut self.elements
    }
}

fn admit(extent: Extent, malformed: MalformedGeometry) -> Option<Extent> {
    if extent.is_off_flow() {
        return None;
    }
    if !extent.is_degenerate() {
        return Some(extent);
    }
    match malformed {
        MalformedGeometry::Exclude => None,
        MalformedGeometry::Normalize if extent.is_inverted() => Some(extent.normalized()),
        // Zero height has no orientation to fix.
        MalformedGeometry::Normalize => None,
        MalformedGeometry::Keep => Some(extent),
    }
}
