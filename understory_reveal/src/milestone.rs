// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility milestones and the per-element latch set.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

/// One of the three one-shot visibility thresholds of an element.
///
/// Variants are ordered by the scroll distance needed to reach them, which is
/// also the order in which they are checked within one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Milestone {
    /// The top edge has entered the visible span.
    Top,
    /// The vertical midpoint has entered the visible span.
    Middle,
    /// The bottom edge has entered the visible span; the element is fully shown.
    Bottom,
}

impl Milestone {
    /// All milestones in evaluation order.
    pub const ALL: [Self; 3] = [Self::Top, Self::Middle, Self::Bottom];

    /// Returns the lowercase name used in notifications and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }

    /// Returns the single-bit latch corresponding to this milestone.
    #[must_use]
    pub const fn latch(self) -> Milestones {
        match self {
            Self::Top => Milestones::TOP,
            Self::Middle => Milestones::MIDDLE,
            Self::Bottom => Milestones::BOTTOM,
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Milestone {
    type Err = UnknownMilestone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            other => Err(UnknownMilestone { name: other.into() }),
        }
    }
}

bitflags! {
    /// A set of milestones.
    ///
    /// Used both as the latch state of a tracked element and as the mask of
    /// milestones a tracker reports.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Milestones: u8 {
        /// See [`Milestone::Top`].
        const TOP = 1 << 0;
        /// See [`Milestone::Middle`].
        const MIDDLE = 1 << 1;
        /// See [`Milestone::Bottom`].
        const BOTTOM = 1 << 2;
    }
}

impl Milestones {
    /// Returns `true` if `milestone` is in the set.
    #[must_use]
    pub const fn has(self, milestone: Milestone) -> bool {
        self.contains(milestone.latch())
    }

    /// Iterates the contained milestones in evaluation order.
    pub fn milestones(self) -> impl Iterator<Item = Milestone> {
        Milestone::ALL.into_iter().filter(move |m| self.has(*m))
    }

    /// Parses a list of milestone names separated by `,` or `|`.
    ///
    /// Unknown names are logged and skipped. Empty entries are ignored.
    ///
    /// ```
    /// use understory_reveal::Milestones;
    ///
    /// let mask = Milestones::parse_list("top, bottom, sideways");
    /// assert_eq!(mask, Milestones::TOP | Milestones::BOTTOM);
    /// ```
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        let mut out = Self::empty();
        for entry in entries(list) {
            match entry.parse::<Milestone>() {
                Ok(m) => out |= m.latch(),
                Err(err) => tracing::warn!(%err, "ignoring milestone entry"),
            }
        }
        out
    }

    /// Parses a list of milestone names separated by `,` or `|`, failing on the
    /// first unknown name.
    pub fn try_parse_list(list: &str) -> Result<Self, UnknownMilestone> {
        entries(list).try_fold(Self::empty(), |acc, entry| {
            Ok(acc | entry.parse::<Milestone>()?.latch())
        })
    }
}

impl From<Milestone> for Milestones {
    fn from(milestone: Milestone) -> Self {
        milestone.latch()
    }
}

fn entries(list: &str) -> impl Iterator<Item = &str> {
    list.split([',', '|'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Error returned when a milestone name is not one of `top`, `middle`, `bottom`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMilestone {
    name: String,
}

impl UnknownMilestone {
    /// Returns the rejected name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownMilestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown milestone `{}`, expected one of top, middle, bottom",
            self.name
        )
    }
}

impl core::error::Error for UnknownMilestone {}
