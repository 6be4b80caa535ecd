// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reveal --heading-base-level=0

//! Understory Reveal: one-shot visibility milestones for scrolled content.
//!
//! This crate follows a fixed set of elements as a viewport scrolls over them
//! and reports, exactly once per element, when each of three milestones is
//! reached:
//!
//! - [`Milestone::Top`]: the top edge has entered the visible span.
//! - [`Milestone::Middle`]: the vertical midpoint has entered it, used as
//!   "more than 50% visible".
//! - [`Milestone::Bottom`]: the bottom edge has entered it; the element has been
//!   fully shown.
//!
//! The core concepts are:
//!
//! - [`Snapshot`]: built once from measured [`Extent`]s. Off-flow elements
//!   (`top + bottom <= 0`) are dropped; the rest get an [`ElementId`] and an
//!   empty latch set ([`Milestones`]).
//! - [`Snapshot::evaluate`]: tests every element against a [`ViewportWindow`],
//!   latches newly satisfied milestones in top, middle, bottom order, and
//!   reports each one to a [`MilestoneSink`]. Latches never reset.
//! - [`RevealTracker`]: a small composition root that takes the snapshot from an
//!   [`ElementSource`], evaluates it once at offset zero, and then evaluates
//!   again for every scroll offset the host forwards.
//!
//! This crate deliberately does **not** know about documents, widgets, or event
//! loops. Host frameworks are responsible for:
//!
//! - Finding and measuring the elements to follow ([`ElementSource`]).
//! - Subscribing to scroll events and forwarding offsets, either one at a time
//!   through [`RevealTracker::on_scroll`] or as a [`ScrollSignal`].
//! - Rate limiting the scroll signal, if desired.
//! - Deciding what a notification means ([`MilestoneSink`]); [`TracingSink`]
//!   simply logs it.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_reveal::{
//!     Extent, MalformedGeometry, Milestone, MilestoneEvent, Snapshot, SourceElement,
//!     ViewportWindow,
//! };
//!
//! let mut snapshot = Snapshot::build(
//!     [SourceElement::new("intro", Extent::new(500.0, 600.0))],
//!     MalformedGeometry::default(),
//! );
//!
//! let mut events: Vec<MilestoneEvent<&str>> = Vec::new();
//!
//! // An 800 tall viewport at offset zero shows the whole element at once.
//! snapshot.evaluate(ViewportWindow::new(0.0, 800.0), &mut events);
//! let order: Vec<Milestone> = events.iter().map(|e| e.milestone).collect();
//! assert_eq!(order, [Milestone::Top, Milestone::Middle, Milestone::Bottom]);
//! assert_eq!(events[2].to_string(), "Element with id: intro is now fully visible on the page.");
//! ```
//!
//! All coordinates live in a caller-chosen vertical space (typically logical
//! pixels, growing downwards). Extents are measured once and never refreshed.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod evaluate;
mod geometry;
mod milestone;
mod modes;
mod snapshot;
pub mod sink;
mod tracker;

pub use geometry::{Extent, ViewportWindow};
pub use milestone::{Milestone, Milestones, UnknownMilestone};
pub use modes::MalformedGeometry;
pub use sink::{MilestoneEvent, MilestoneSink, TracingSink};
pub use snapshot::{ElementId, Snapshot, SourceElement, TrackedElement};
pub use tracker::{
    ElementSource, RevealConfig, RevealDebugInfo, RevealTracker, ScrollSignal, ViewportMetrics,
};
