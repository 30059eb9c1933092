// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The crossfade state machine.
//!
//! [`CrossfadeController`] consumes "segment entered" events in the order the
//! visibility tracker emits them and decides, for each one, whether the
//! background must swap. Every mutation is recorded in a [`Changes`] record
//! that the host drains with [`take_changes`](CrossfadeController::take_changes)
//! and hands to a [`Presenter`](crate::backend::Presenter).
//!
//! # Decision rules
//!
//! 1. A segment without an image is ignored entirely.
//! 2. If the segment's image equals the image already shown, no swap happens;
//!    the tint and current panel are still updated from the segment.
//! 3. Otherwise the image is queued for preloading, written into the hidden
//!    slot, and that slot is revealed. Tint and panel follow.

use alloc::string::String;
use alloc::vec::Vec;

use crate::layer::{DualLayerBuffer, LayerSlot, TintOverlay};
use crate::panel::PanelState;
use crate::segment::Segment;

/// What the controller decided for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The segment has no image; nothing changed.
    Ignored,
    /// The segment's image is already shown; no swap.
    Retained,
    /// The image was written into `slot`, which is now active.
    Swapped {
        /// The slot that became active.
        slot: LayerSlot,
    },
}

/// Result of handling one "segment entered" event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Swap decision.
    pub decision: Decision,
    /// Whether the tint overlay value changed.
    pub tint_changed: bool,
    /// Whether the current panel changed.
    pub panel_changed: bool,
}

impl Outcome {
    const IGNORED: Self = Self {
        decision: Decision::Ignored,
        tint_changed: false,
        panel_changed: false,
    };
}

/// Output writes accumulated since the last [`take_changes`].
///
/// Presenters apply them in field order: preloads first, then layer slots,
/// then the tint, then the panel.
///
/// [`take_changes`]: CrossfadeController::take_changes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Image URLs to warm, in request order.
    pub preloads: Vec<String>,
    /// Slots whose image or active flag changed.
    pub layers: Vec<LayerSlot>,
    /// The tint overlay value changed.
    pub tint: bool,
    /// The current panel changed.
    pub panel: bool,
}

impl Changes {
    /// Returns `true` if nothing needs to be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preloads.is_empty() && self.layers.is_empty() && !self.tint && !self.panel
    }

    fn mark_layer(&mut self, slot: LayerSlot) {
        if !self.layers.contains(&slot) {
            self.layers.push(slot);
        }
    }
}

/// Per-topology crossfade state: two layer slots, one tint overlay, and
/// (pinned topology only) the current panel.
///
/// Instances share nothing; each topology on a page owns its own controller.
#[derive(Clone, Debug)]
pub struct CrossfadeController {
    buffer: DualLayerBuffer,
    tint: TintOverlay,
    panels: Option<PanelState>,
    last_shown: Option<String>,
    changes: Changes,
}

impl Default for CrossfadeController {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CrossfadeController {
    /// Creates a controller with both slots empty.
    ///
    /// Pass `panels` for the pinned topology. The initial current panel is
    /// recorded as a pending change so the first present marks it.
    #[must_use]
    pub fn new(panels: Option<PanelState>) -> Self {
        let changes = Changes {
            panel: panels.is_some(),
            ..Changes::default()
        };
        Self {
            buffer: DualLayerBuffer::new(),
            tint: TintOverlay::new(),
            panels,
            last_shown: None,
            changes,
        }
    }

    /// Creates a controller whose primary slot already shows `first`.
    ///
    /// The seed image is queued for preloading and painted by the first
    /// present, so there is no blank frame before the first event. The seed's
    /// tint is applied too. An inert `first` seeds nothing.
    #[must_use]
    pub fn with_initial_segment(panels: Option<PanelState>, first: &Segment) -> Self {
        let mut this = Self::new(panels);
        if let Some(url) = first.image_url() {
            this.buffer.seed(url);
            this.last_shown = Some(String::from(url));
            this.changes.preloads.push(String::from(url));
            this.changes.mark_layer(LayerSlot::Primary);
            if let Some(tint) = first.tint() {
                this.changes.tint |= this.tint.set(tint);
            }
        }
        this
    }

    /// Handles one "segment entered" event.
    pub fn on_segment_entered(&mut self, segment: &Segment) -> Outcome {
        let Some(url) = segment.image_url() else {
            return Outcome::IGNORED;
        };

        let decision = if self.last_shown.as_deref() == Some(url) {
            Decision::Retained
        } else {
            self.changes.preloads.push(String::from(url));
            let slot = self.buffer.swap_in(url);
            self.changes.mark_layer(slot);
            self.changes.mark_layer(slot.other());
            self.last_shown = Some(String::from(url));
            Decision::Swapped { slot }
        };
        debug_assert_eq!(
            self.buffer.shown_url(),
            self.last_shown.as_deref(),
            "last shown URL must track the active slot"
        );

        let tint_changed = segment.tint().is_some_and(|tint| self.tint.set(tint));
        self.changes.tint |= tint_changed;

        let panel_changed = match (segment.index(), self.panels.as_mut()) {
            (Some(index), Some(panels)) => panels.set_active_panel(index),
            _ => false,
        };
        self.changes.panel |= panel_changed;

        Outcome {
            decision,
            tint_changed,
            panel_changed,
        }
    }

    /// Drains and returns the writes accumulated since the last call.
    pub fn take_changes(&mut self) -> Changes {
        core::mem::take(&mut self.changes)
    }

    /// Returns the layer buffer.
    #[must_use]
    pub fn buffer(&self) -> &DualLayerBuffer {
        &self.buffer
    }

    /// Returns the tint overlay.
    #[must_use]
    pub fn tint(&self) -> &TintOverlay {
        &self.tint
    }

    /// Returns the panel state, for the pinned topology.
    #[must_use]
    pub fn panels(&self) -> Option<&PanelState> {
        self.panels.as_ref()
    }

    /// Returns the image currently shown on the active slot.
    #[must_use]
    pub fn last_shown_url(&self) -> Option<&str> {
        self.last_shown.as_deref()
    }

    /// Returns the active slot, if anything has been shown.
    #[must_use]
    pub fn active_slot(&self) -> Option<LayerSlot> {
        self.buffer.active_slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentIndex;
    use alloc::vec;

    fn active_count(c: &CrossfadeController) -> usize {
        LayerSlot::ALL
            .iter()
            .filter(|&&s| c.buffer().layer(s).is_active())
            .count()
    }

    fn pinned(n: u32) -> Option<PanelState> {
        PanelState::new((1..=n).map(SegmentIndex::from).collect())
    }

    #[test]
    fn inert_segment_changes_nothing() {
        let mut c = CrossfadeController::new(None);
        let outcome = c.on_segment_entered(&Segment::inert().with_tint("red"));
        assert_eq!(outcome.decision, Decision::Ignored);
        assert!(!outcome.tint_changed);
        assert_eq!(c.tint().value(), None);
        assert!(c.take_changes().is_empty());
        assert_eq!(c.active_slot(), None);
    }

    #[test]
    fn crossfade_swap_scenario() {
        let mut c = CrossfadeController::with_initial_segment(None, &Segment::new("black.jpeg"));
        let _ = c.take_changes();

        let outcome = c.on_segment_entered(&Segment::new("white.jpeg").with_tint("rgba(1,2,3,.1)"));
        assert_eq!(
            outcome.decision,
            Decision::Swapped {
                slot: LayerSlot::Secondary
            }
        );
        let buf = c.buffer();
        assert!(buf.layer(LayerSlot::Secondary).is_active());
        assert_eq!(buf.layer(LayerSlot::Secondary).image_url(), Some("white.jpeg"));
        assert!(!buf.layer(LayerSlot::Primary).is_active());
        assert_eq!(c.tint().value(), Some("rgba(1,2,3,.1)"));
        assert_eq!(c.last_shown_url(), Some("white.jpeg"));

        let changes = c.take_changes();
        assert_eq!(changes.preloads, vec![String::from("white.jpeg")]);
        assert_eq!(changes.layers, vec![LayerSlot::Secondary, LayerSlot::Primary]);
        assert!(changes.tint);
    }

    #[test]
    fn initial_paint_seeds_primary_and_preloads() {
        let mut c = CrossfadeController::with_initial_segment(None, &Segment::new("black.jpeg"));
        assert_eq!(c.active_slot(), Some(LayerSlot::Primary));
        assert_eq!(c.buffer().shown_url(), Some("black.jpeg"));
        let changes = c.take_changes();
        assert_eq!(changes.preloads, vec![String::from("black.jpeg")]);
        assert_eq!(changes.layers, vec![LayerSlot::Primary]);
    }

    #[test]
    fn repeated_image_swaps_once() {
        let mut c = CrossfadeController::new(None);
        let mut swaps = 0;
        for _ in 0..5 {
            if let Decision::Swapped { .. } = c.on_segment_entered(&Segment::new("a.jpg")).decision {
                swaps += 1;
            }
        }
        assert_eq!(swaps, 1);
        assert_eq!(c.take_changes().preloads.len(), 1);
    }

    #[test]
    fn exactly_one_slot_active_after_events() {
        let mut c = CrossfadeController::new(None);
        for url in ["a.jpg", "b.jpg", "", "b.jpg", "c.jpg", "a.jpg"] {
            c.on_segment_entered(&Segment::new(url));
            assert_eq!(active_count(&c), 1, "after {url:?}");
            assert_eq!(c.buffer().shown_url(), c.last_shown_url());
        }
    }

    #[test]
    fn tint_only_update_keeps_image() {
        let mut c = CrossfadeController::new(None);
        c.on_segment_entered(&Segment::new("a.jpg"));
        let slot = c.active_slot();
        let _ = c.take_changes();

        let outcome = c.on_segment_entered(&Segment::new("a.jpg").with_tint("rgba(0,0,0,.5)"));
        assert_eq!(outcome.decision, Decision::Retained);
        assert!(outcome.tint_changed);
        assert_eq!(c.active_slot(), slot);
        assert_eq!(c.last_shown_url(), Some("a.jpg"));
        let changes = c.take_changes();
        assert!(changes.layers.is_empty());
        assert!(changes.preloads.is_empty());
        assert!(changes.tint);
    }

    #[test]
    fn shared_image_still_advances_panel() {
        let mut c = CrossfadeController::new(pinned(2));
        let _ = c.take_changes();

        let s1 = Segment::new("a.jpg").with_index(1_u32);
        let s2 = Segment::new("a.jpg").with_index(2_u32);

        c.on_segment_entered(&s1);
        assert_eq!(c.panels().unwrap().current(), &SegmentIndex::from(1_u32));
        assert_eq!(c.buffer().shown_url(), Some("a.jpg"));

        let outcome = c.on_segment_entered(&s2);
        assert_eq!(outcome.decision, Decision::Retained);
        assert!(outcome.panel_changed);
        assert_eq!(c.buffer().shown_url(), Some("a.jpg"));
        assert_eq!(c.panels().unwrap().current(), &SegmentIndex::from(2_u32));
    }

    #[test]
    fn pinned_controller_marks_default_panel_on_first_present() {
        let mut c = CrossfadeController::new(pinned(3));
        assert!(c.take_changes().panel);
        assert!(!c.take_changes().panel);
    }

    #[test]
    fn panel_index_without_panels_is_harmless() {
        let mut c = CrossfadeController::new(None);
        let outcome = c.on_segment_entered(&Segment::new("a.jpg").with_index(4_u32));
        assert!(!outcome.panel_changed);
        assert!(!c.take_changes().panel);
    }

    #[test]
    fn inert_first_segment_seeds_nothing() {
        let c = CrossfadeController::with_initial_segment(None, &Segment::inert());
        assert_eq!(c.active_slot(), None);
        assert_eq!(c.last_shown_url(), None);
    }
}
