// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the `understory_reveal` demos.

use kurbo::Rect;
use understory_reveal::{ElementSource, SourceElement};

/// A page laid out as a vertical stack of boxes, each tagged with a class.
#[derive(Debug)]
pub struct Page {
    boxes: Vec<(&'static str, String, Rect)>,
}

impl Page {
    /// The page scrolled by the `columns` example.
    #[must_use]
    pub fn demo() -> Self {
        let mut boxes = Vec::new();
        let mut y = 80.0;
        for (i, height) in [240.0, 520.0, 180.0, 900.0, 300.0, 260.0].into_iter().enumerate() {
            boxes.push(("column", format!("col-{i}"), Rect::new(0.0, y, 320.0, y + height)));
            y += height + 40.0;
            if i == 2 {
                // Hidden on this layout: measures as a zero rect.
                boxes.push(("column", "col-mobile".into(), Rect::ZERO));
                boxes.push(("banner", "ad".into(), Rect::new(0.0, y, 320.0, y + 90.0)));
                y += 130.0;
            }
        }
        Self { boxes }
    }

    /// Total height of the laid out content.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.boxes.iter().map(|(_, _, r)| r.y1).fold(0.0, f64::max)
    }
}

impl ElementSource for Page {
    type Key = String;

    fn select(&self, selector: &str) -> Vec<SourceElement<String>> {
        self.boxes
            .iter()
            .filter(|(class, _, _)| *class == selector)
            .map(|(_, id, rect)| SourceElement::new(id.clone(), (*rect).into()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use understory_reveal::{Milestone, MilestoneEvent, RevealTracker};

    use super::*;

    #[test]
    fn selection_is_by_class_in_document_order() {
        let page = Page::demo();
        let keys: Vec<_> = page.select("column").into_iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            ["col-0", "col-1", "col-2", "col-mobile", "col-3", "col-4", "col-5"]
        );
        assert_eq!(page.select("banner").len(), 1);
        assert!(page.select("row").is_empty());
    }

    #[test]
    fn scrolling_to_the_end_completes_every_visible_column() {
        let page = Page::demo();
        let viewport = 600.0;
        let mut tracker = RevealTracker::new("column");
        let mut events: Vec<MilestoneEvent<String>> = Vec::new();
        tracker.init(&page, &viewport, &mut events);
        let end = page.height() - viewport;
        tracker.run((0..=10).map(|i| f64::from(i) * end / 10.0), &viewport, &mut events);

        let info = tracker.debug_info();
        assert_eq!(info.tracked, 6);
        assert_eq!(info.excluded, 1);
        assert_eq!(info.completed, 6);
        assert_eq!(events.len(), 18);
        assert!(events.iter().all(|e| e.key != "col-mobile"));
        assert_eq!(
            events.iter().filter(|e| e.milestone == Milestone::Bottom).count(),
            6
        );
    }
}
