// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless pipeline replay.
//!
//! [`Replay`] runs a resolved [`TopologyConfig`] through the same stages as
//! the browser host (entry detection, controller, tracing, change drain)
//! but keeps the drained [`Changes`] instead of writing them to a page. Feed
//! it observer reports directly with [`Replay::report`], or simulate a scroll
//! position with [`Replay::scroll_to`].

use kurbo::Rect;

use scrollfade_core::controller::{Changes, CrossfadeController};
use scrollfade_core::segment::{SegmentId, SegmentRegistry};
use scrollfade_core::topology::{TopologyConfig, TopologyKind};
use scrollfade_core::trace::{PreloadEvent, SetupEvent, TraceSink, Tracer};
use scrollfade_core::visibility::{EntryDetector, TriggerBand};

/// A topology pipeline without a page.
#[derive(Debug)]
pub struct Replay {
    kind: TopologyKind,
    registry: SegmentRegistry,
    controller: CrossfadeController,
    detector: EntryDetector,
    presented: Vec<Changes>,
}

impl Replay {
    /// Builds the pipeline and performs the initial paint.
    pub fn new(config: TopologyConfig, sink: &mut dyn TraceSink) -> Self {
        let mut tracer = Tracer::new(sink);
        tracer.setup(&SetupEvent {
            topology: config.kind(),
            source: config.source(),
            segments: config.registry().len(),
            panels: config.panels().len(),
        });
        let kind = config.kind();
        let controller = config.controller();
        let registry = config.into_registry();
        let mut replay = Self {
            kind,
            detector: EntryDetector::new(registry.len()),
            registry,
            controller,
            presented: Vec::new(),
        };
        replay.flush(&mut tracer);
        replay
    }

    /// Handles one observer report.
    pub fn report(&mut self, id: SegmentId, intersecting: bool, sink: &mut dyn TraceSink) {
        let mut tracer = Tracer::new(sink);
        if let Some(id) = self.detector.report(id, intersecting) {
            self.enter(id, &mut tracer);
        }
    }

    /// Reports every region's overlap with `band` at the given viewport.
    ///
    /// Entries are handled in region order.
    pub fn scroll_to(
        &mut self,
        band: &TriggerBand,
        viewport: Rect,
        regions: &[(SegmentId, Rect)],
        sink: &mut dyn TraceSink,
    ) {
        let mut tracer = Tracer::new(sink);
        for id in self.detector.scan(band, viewport, regions) {
            self.enter(id, &mut tracer);
        }
    }

    fn enter(&mut self, id: SegmentId, tracer: &mut Tracer<'_>) {
        let Some(segment) = self.registry.get(id) else {
            return;
        };
        let outcome = self.controller.on_segment_entered(segment);
        tracer.outcome(self.kind, id, segment, &outcome, &self.controller);
        self.flush(tracer);
    }

    fn flush(&mut self, tracer: &mut Tracer<'_>) {
        let changes = self.controller.take_changes();
        if changes.is_empty() {
            return;
        }
        for url in &changes.preloads {
            tracer.preload(&PreloadEvent {
                topology: self.kind,
                image_url: url,
            });
        }
        self.presented.push(changes);
    }

    /// Returns the controller.
    #[must_use]
    pub fn controller(&self) -> &CrossfadeController {
        &self.controller
    }

    /// Returns every non-empty batch of changes, oldest first.
    #[must_use]
    pub fn presented(&self) -> &[Changes] {
        &self.presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{RecordedEvent, RecorderSink};
    use scrollfade_core::layer::LayerSlot;
    use scrollfade_core::segment::Segment;
    use scrollfade_core::topology::{PanelSpec, Surfaces};

    const SURFACES: Surfaces = Surfaces {
        layers: 2,
        overlay: true,
    };

    fn global(markers: Vec<Segment>) -> TopologyConfig {
        TopologyConfig::global(markers, Vec::new(), SURFACES).unwrap()
    }

    #[test]
    fn global_starts_blank_and_swaps_on_entry() {
        let mut sink = RecorderSink::new();
        let mut replay = Replay::new(
            global(vec![Segment::new("black.jpeg"), Segment::new("white.jpeg")]),
            &mut sink,
        );
        assert!(replay.presented().is_empty());
        assert_eq!(replay.controller().active_slot(), None);

        replay.report(SegmentId(0), true, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("black.jpeg"));
        assert_eq!(replay.controller().active_slot(), Some(LayerSlot::Secondary));
        assert_eq!(replay.presented().len(), 1);
    }

    #[test]
    fn repeated_reports_inside_do_not_refire() {
        let mut sink = RecorderSink::new();
        let mut replay = Replay::new(global(vec![Segment::new("a.jpg")]), &mut sink);
        replay.report(SegmentId(0), true, &mut sink);
        replay.report(SegmentId(0), true, &mut sink);
        assert_eq!(replay.presented().len(), 1);

        // Leave and re-enter: the entry fires but the image is already shown.
        replay.report(SegmentId(0), false, &mut sink);
        replay.report(SegmentId(0), true, &mut sink);
        assert_eq!(replay.presented().len(), 1);
        let holds = sink
            .events()
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Hold(h) if !h.inert))
            .count();
        assert_eq!(holds, 1);
    }

    #[test]
    fn trace_sequence_for_a_swap() {
        let mut sink = RecorderSink::new();
        let mut replay = Replay::new(
            global(vec![Segment::new("a.jpg").with_tint("rgba(0,0,0,.5)")]),
            &mut sink,
        );
        replay.report(SegmentId(0), true, &mut sink);

        let json = sink.to_json();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["event"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["setup", "entered", "swap", "tint", "preload"]);
    }

    #[test]
    fn pinned_paints_first_panel_image_immediately() {
        let panels = [
            PanelSpec::default(),
            PanelSpec {
                index: None,
                image_url: Some("own.jpg".into()),
            },
        ];
        let config =
            TopologyConfig::pinned(Vec::new(), &panels, ["d0.jpg", "d1.jpg"], SURFACES).unwrap();
        let mut sink = RecorderSink::new();
        let mut replay = Replay::new(config, &mut sink);

        assert_eq!(replay.controller().last_shown_url(), Some("d0.jpg"));
        assert_eq!(replay.presented().len(), 1);
        assert_eq!(replay.presented()[0].preloads, ["d0.jpg"]);
        assert!(replay.presented()[0].panel);

        replay.report(SegmentId(1), true, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("own.jpg"));
        let current = replay.controller().panels().unwrap().current().as_str();
        assert_eq!(current, "2");
    }

    #[test]
    fn scroll_and_reports_share_entry_state() {
        let band = TriggerBand::default();
        let regions = [
            (SegmentId(0), Rect::new(0.0, 300.0, 100.0, 400.0)),
            (SegmentId(1), Rect::new(0.0, 400.0, 100.0, 500.0)),
        ];
        let mut sink = RecorderSink::new();
        let mut replay = Replay::new(
            global(vec![Segment::new("one.jpg"), Segment::new("two.jpg")]),
            &mut sink,
        );

        // Both regions enter in the same step; the later one wins.
        replay.scroll_to(&band, Rect::new(0.0, 0.0, 100.0, 800.0), &regions, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("two.jpg"));
        assert_eq!(replay.presented().len(), 2);

        // Segment 0 is already inside, so a raw report does not re-fire it.
        replay.report(SegmentId(0), true, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("two.jpg"));
        assert_eq!(replay.presented().len(), 2);
    }

    #[test]
    fn scroll_through_sections() {
        let band = TriggerBand::default();
        let regions = [
            (SegmentId(0), Rect::new(0.0, 0.0, 100.0, 1000.0)),
            (SegmentId(1), Rect::new(0.0, 1000.0, 100.0, 2000.0)),
        ];
        let mut sink = RecorderSink::new();
        let mut replay = Replay::new(
            global(vec![Segment::new("one.jpg"), Segment::new("two.jpg")]),
            &mut sink,
        );

        replay.scroll_to(&band, Rect::new(0.0, 0.0, 100.0, 800.0), &regions, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("one.jpg"));

        replay.scroll_to(&band, Rect::new(0.0, 1200.0, 100.0, 2000.0), &regions, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("two.jpg"));

        replay.scroll_to(&band, Rect::new(0.0, 0.0, 100.0, 800.0), &regions, &mut sink);
        assert_eq!(replay.controller().last_shown_url(), Some("one.jpg"));
    }
}
