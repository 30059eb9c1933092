// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger-band geometry and segment entry detection.
//!
//! A segment counts as *entered* when its bounding box starts overlapping a
//! band centered vertically in the viewport. Both band edges are inset from
//! the viewport edges so entries register near the middle of the screen.
//!
//! Browser hosts delegate the overlap test to `IntersectionObserver` using
//! [`TriggerBand::root_margin`]; [`EntryDetector`] then filters the observer's
//! reports down to outside→inside transitions. Hosts without an observer can
//! call [`EntryDetector::scan`] with measured rectangles instead.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::segment::SegmentId;

/// Vertical insets of the trigger band, as fractions of the viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerBand {
    /// Fraction of the viewport height cut from the top (0.0–0.5).
    pub top_inset: f64,
    /// Fraction of the viewport height cut from the bottom (0.0–0.5).
    pub bottom_inset: f64,
}

impl Default for TriggerBand {
    fn default() -> Self {
        Self::centered(0.4)
    }
}

impl TriggerBand {
    /// A band with the same inset on both edges.
    #[must_use]
    pub const fn centered(inset: f64) -> Self {
        Self {
            top_inset: inset,
            bottom_inset: inset,
        }
    }

    /// Returns the band for the given viewport rectangle.
    ///
    /// Insets are clamped so the band never inverts; a fully inset band
    /// collapses to a zero-height line.
    #[must_use]
    pub fn band(&self, viewport: Rect) -> Rect {
        let h = viewport.height();
        let top = viewport.y0 + h * self.top_inset.clamp(0.0, 1.0);
        let bottom = (viewport.y1 - h * self.bottom_inset.clamp(0.0, 1.0)).max(top);
        Rect::new(viewport.x0, top, viewport.x1, bottom)
    }

    /// Returns the equivalent `IntersectionObserver` `rootMargin` value.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            percent(self.top_inset),
            percent(self.bottom_inset)
        )
    }

    /// Returns `true` if `region` overlaps the band of `viewport`.
    ///
    /// Touching edges count as overlap so zero-height bands still fire.
    #[must_use]
    pub fn contains(&self, viewport: Rect, region: Rect) -> bool {
        let band = self.band(viewport);
        region.y0 <= band.y1 && region.y1 >= band.y0 && region.height() > 0.0
    }
}

/// Converts a fraction to a percentage rounded to one decimal place.
fn percent(fraction: f64) -> f64 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to 0.0..=1000.5 before the cast"
    )]
    let tenths = (fraction.clamp(0.0, 1.0) * 1000.0 + 0.5) as u32;
    f64::from(tenths) / 10.0
}

/// Returns the height a marker must be given before it is observed, or
/// `None` if it already has a height of its own.
///
/// Zero-height markers can be skipped by fast scrolling without ever
/// intersecting the band. Markers with any authored height are left alone.
#[must_use]
pub fn min_height(height: f64, min: f64) -> Option<f64> {
    (height <= 0.0).then_some(min)
}

/// Filters visibility reports down to segment entries.
///
/// Keeps one "inside" bit per segment. A report emits the segment only when
/// the bit flips from outside to inside; exits clear the bit silently.
#[derive(Clone, Debug, Default)]
pub struct EntryDetector {
    inside: Vec<bool>,
}

impl EntryDetector {
    /// Creates a detector for `len` segments, all outside.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            inside: alloc::vec![false; len],
        }
    }

    /// Records whether `id` currently overlaps the band.
    ///
    /// Returns `Some(id)` on entry. Unknown ids are ignored.
    pub fn report(&mut self, id: SegmentId, intersecting: bool) -> Option<SegmentId> {
        let slot = self.inside.get_mut(id.idx())?;
        let was_inside = core::mem::replace(slot, intersecting);
        (intersecting && !was_inside).then_some(id)
    }

    /// Tests every region against the band and returns the entered segments
    /// in the order given.
    pub fn scan(
        &mut self,
        band: &TriggerBand,
        viewport: Rect,
        regions: &[(SegmentId, Rect)],
    ) -> Vec<SegmentId> {
        regions
            .iter()
            .filter_map(|&(id, rect)| self.report(id, band.contains(viewport, rect)))
            .collect()
    }

    /// Returns `true` if `id` is currently inside the band.
    #[must_use]
    pub fn is_inside(&self, id: SegmentId) -> bool {
        self.inside.get(id.idx()).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const VIEWPORT_H: f64 = 1000.0;

    fn viewport_at(scroll_y: f64) -> Rect {
        Rect::new(0.0, scroll_y, 800.0, scroll_y + VIEWPORT_H)
    }

    fn marker(y: f64, h: f64) -> Rect {
        Rect::new(0.0, y, 800.0, y + h)
    }

    #[test]
    fn default_band_is_centered() {
        let band = TriggerBand::default().band(viewport_at(0.0));
        assert_eq!(band, Rect::new(0.0, 400.0, 800.0, 600.0));
    }

    #[test]
    fn root_margin_matches_insets() {
        assert_eq!(TriggerBand::default().root_margin(), "-40% 0px -40% 0px");
        let band = TriggerBand {
            top_inset: 0.25,
            bottom_inset: 0.125,
        };
        assert_eq!(band.root_margin(), "-25% 0px -12.5% 0px");
    }

    #[test]
    fn overlapping_insets_collapse_band() {
        let band = TriggerBand::centered(0.6).band(viewport_at(0.0));
        assert_eq!(band.height(), 0.0);
    }

    #[test]
    fn marker_at_viewport_edge_does_not_trigger() {
        let band = TriggerBand::default();
        assert!(!band.contains(viewport_at(0.0), marker(50.0, 100.0)));
        assert!(band.contains(viewport_at(0.0), marker(450.0, 100.0)));
    }

    #[test]
    fn zero_height_marker_never_triggers() {
        let band = TriggerBand::default();
        assert!(!band.contains(viewport_at(0.0), marker(500.0, 0.0)));
    }

    #[test]
    fn min_height_only_applies_to_collapsed_markers() {
        assert_eq!(min_height(0.0, 120.0), Some(120.0));
        assert_eq!(min_height(300.0, 120.0), None);
        // A deliberately short marker keeps its authored height.
        assert_eq!(min_height(40.0, 120.0), None);
    }

    #[test]
    fn entry_fires_once_and_not_on_exit() {
        let mut det = EntryDetector::new(1);
        let id = SegmentId(0);
        assert_eq!(det.report(id, true), Some(id));
        assert_eq!(det.report(id, true), None);
        assert_eq!(det.report(id, false), None);
        assert!(!det.is_inside(id));
        assert_eq!(det.report(id, true), Some(id), "re-entry fires again");
    }

    #[test]
    fn scrolling_past_markers_emits_entries_in_order() {
        let band = TriggerBand::default();
        let regions = [
            (SegmentId(0), marker(1000.0, 120.0)),
            (SegmentId(1), marker(2000.0, 120.0)),
        ];
        let mut det = EntryDetector::new(regions.len());

        let mut entered = Vec::new();
        for step in 0..25 {
            let scroll_y = f64::from(step) * 100.0;
            entered.extend(det.scan(&band, viewport_at(scroll_y), &regions));
        }
        assert_eq!(entered, vec![SegmentId(0), SegmentId(1)]);
    }

    #[test]
    fn unknown_segment_is_ignored() {
        let mut det = EntryDetector::new(0);
        assert_eq!(det.report(SegmentId(3), true), None);
    }
}
