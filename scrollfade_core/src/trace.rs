// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the crossfade pipeline.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! host calls at each stage of a pipeline: setup, segment entry, and each
//! output write. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::controller::{CrossfadeController, Outcome};
use crate::error::SetupError;
use crate::layer::LayerSlot;
use crate::segment::{Segment, SegmentId};
use crate::topology::{MarkerSource, TopologyKind};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a topology instance is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupEvent {
    /// Which topology.
    pub topology: TopologyKind,
    /// Where its segments came from.
    pub source: MarkerSource,
    /// Number of segments observed.
    pub segments: usize,
    /// Number of content panels (pinned only).
    pub panels: usize,
}

/// Emitted when a topology instance is not created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkippedEvent {
    /// Which topology.
    pub topology: TopologyKind,
    /// Why it was skipped.
    pub reason: SetupError,
}

/// Emitted for every "segment entered" event, before any decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnteredEvent<'a> {
    /// Which topology.
    pub topology: TopologyKind,
    /// The entered segment.
    pub segment: SegmentId,
    /// Its image, if any.
    pub image_url: Option<&'a str>,
}

/// Emitted when a new image was written into a slot and revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapEvent<'a> {
    /// Which topology.
    pub topology: TopologyKind,
    /// The slot that became active.
    pub slot: LayerSlot,
    /// The image now shown.
    pub image_url: &'a str,
}

/// Emitted when an event did not swap the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoldEvent {
    /// Which topology.
    pub topology: TopologyKind,
    /// The entered segment.
    pub segment: SegmentId,
    /// `true` if the segment is inert, `false` if its image was already shown.
    pub inert: bool,
}

/// Emitted when the tint overlay value changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TintEvent<'a> {
    /// Which topology.
    pub topology: TopologyKind,
    /// The new tint value.
    pub tint: &'a str,
}

/// Emitted when the current panel changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelEvent<'a> {
    /// Which topology.
    pub topology: TopologyKind,
    /// Label of the new current panel.
    pub index: &'a str,
}

/// Emitted when an image preload is dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreloadEvent<'a> {
    /// Which topology.
    pub topology: TopologyKind,
    /// The image being warmed.
    pub image_url: &'a str,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a crossfade pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a topology instance is created.
    fn on_setup(&mut self, e: &SetupEvent) {
        _ = e;
    }

    /// Called when a topology instance is not created.
    fn on_skipped(&mut self, e: &SkippedEvent) {
        _ = e;
    }

    /// Called for every segment entry.
    fn on_segment_entered(&mut self, e: &EnteredEvent<'_>) {
        _ = e;
    }

    /// Called when the background swapped.
    fn on_swap(&mut self, e: &SwapEvent<'_>) {
        _ = e;
    }

    /// Called when an entry left the background unchanged.
    fn on_hold(&mut self, e: &HoldEvent) {
        _ = e;
    }

    /// Called when the tint changed.
    fn on_tint(&mut self, e: &TintEvent<'_>) {
        _ = e;
    }

    /// Called when the current panel changed.
    fn on_panel(&mut self, e: &PanelEvent<'_>) {
        _ = e;
    }

    /// Called when a preload is dispatched.
    fn on_preload(&mut self, e: &PreloadEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Dispatches `$call` on the sink when tracing is compiled in.
macro_rules! dispatch {
    ($self:ident, $sink:ident => $call:expr, $($unused:expr),*) => {{
        #[cfg(feature = "trace")]
        if let Some($sink) = &mut $self.sink {
            $call;
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = ($($unused),*);
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SetupEvent`].
    #[inline]
    pub fn setup(&mut self, e: &SetupEvent) {
        dispatch!(self, s => s.on_setup(e), e);
    }

    /// Emits a [`SkippedEvent`].
    #[inline]
    pub fn skipped(&mut self, e: &SkippedEvent) {
        dispatch!(self, s => s.on_skipped(e), e);
    }

    /// Emits a [`PreloadEvent`].
    #[inline]
    pub fn preload(&mut self, e: &PreloadEvent<'_>) {
        dispatch!(self, s => s.on_preload(e), e);
    }

    /// Emits the events describing how `controller` handled `segment`.
    ///
    /// Call right after [`CrossfadeController::on_segment_entered`] with the
    /// returned [`Outcome`].
    pub fn outcome(
        &mut self,
        topology: TopologyKind,
        id: SegmentId,
        segment: &Segment,
        outcome: &Outcome,
        controller: &CrossfadeController,
    ) {
        dispatch!(
            self,
            s => emit_outcome(&mut **s, topology, id, segment, outcome, controller),
            topology,
            id,
            segment,
            outcome,
            controller
        );
    }
}

#[cfg(feature = "trace")]
fn emit_outcome(
    sink: &mut dyn TraceSink,
    topology: TopologyKind,
    id: SegmentId,
    segment: &Segment,
    outcome: &Outcome,
    controller: &CrossfadeController,
) {
    use crate::controller::Decision;

    sink.on_segment_entered(&EnteredEvent {
        topology,
        segment: id,
        image_url: segment.image_url(),
    });
    match outcome.decision {
        Decision::Ignored => sink.on_hold(&HoldEvent {
            topology,
            segment: id,
            inert: true,
        }),
        Decision::Retained => sink.on_hold(&HoldEvent {
            topology,
            segment: id,
            inert: false,
        }),
        Decision::Swapped { slot } => {
            if let Some(image_url) = controller.buffer().layer(slot).image_url() {
                sink.on_swap(&SwapEvent {
                    topology,
                    slot,
                    image_url,
                });
            }
        }
    }
    if outcome.tint_changed
        && let Some(tint) = controller.tint().value()
    {
        sink.on_tint(&TintEvent { topology, tint });
    }
    if outcome.panel_changed
        && let Some(panels) = controller.panels()
    {
        sink.on_panel(&PanelEvent {
            topology,
            index: panels.current().as_str(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_setup() -> SetupEvent {
        SetupEvent {
            topology: TopologyKind::Pinned,
            source: MarkerSource::Panels,
            segments: 3,
            panels: 3,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_setup(&sample_setup());
        sink.on_skipped(&SkippedEvent {
            topology: TopologyKind::Global,
            reason: SetupError::NoMarkers,
        });
        sink.on_swap(&SwapEvent {
            topology: TopologyKind::Global,
            slot: LayerSlot::Secondary,
            image_url: "a.jpg",
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.setup(&sample_setup());
        let mut c = CrossfadeController::new(None);
        let seg = Segment::new("a.jpg");
        let outcome = c.on_segment_entered(&seg);
        tracer.outcome(TopologyKind::Global, SegmentId(0), &seg, &outcome, &c);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_outcome_events() {
        use alloc::string::String;
        use alloc::vec::Vec;

        #[derive(Default)]
        struct RecordingSink {
            lines: Vec<String>,
        }
        impl TraceSink for RecordingSink {
            fn on_swap(&mut self, e: &SwapEvent<'_>) {
                self.lines.push(alloc::format!("swap {}", e.image_url));
            }
            fn on_hold(&mut self, e: &HoldEvent) {
                self.lines.push(alloc::format!("hold inert={}", e.inert));
            }
            fn on_tint(&mut self, e: &TintEvent<'_>) {
                self.lines.push(alloc::format!("tint {}", e.tint));
            }
        }

        let mut sink = RecordingSink::default();
        let mut c = CrossfadeController::new(None);
        {
            let mut tracer = Tracer::new(&mut sink);
            for seg in [
                Segment::new("a.jpg").with_tint("red"),
                Segment::new("a.jpg"),
                Segment::inert(),
            ] {
                let outcome = c.on_segment_entered(&seg);
                tracer.outcome(TopologyKind::Global, SegmentId(0), &seg, &outcome, &c);
            }
        }
        assert_eq!(
            sink.lines,
            ["swap a.jpg", "tint red", "hold inert=false", "hold inert=true"]
        );
    }
}
