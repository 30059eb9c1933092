// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording and JSON export.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned copy of every
//! event. [`RecorderSink::to_json`] renders the log as a JSON array, one object
//! per event, for attaching to bug reports or diffing between runs.

use std::io::{self, Write};

use serde_json::{Value, json};

use scrollfade_core::error::SetupError;
use scrollfade_core::layer::LayerSlot;
use scrollfade_core::segment::SegmentId;
use scrollfade_core::topology::{MarkerSource, TopologyKind};
use scrollfade_core::trace::{
    EnteredEvent, HoldEvent, PanelEvent, PreloadEvent, SetupEvent, SkippedEvent, SwapEvent,
    TintEvent, TraceSink,
};

/// An owned trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A topology instance was created.
    Setup(SetupEvent),
    /// A topology instance was not created.
    Skipped(SkippedEvent),
    /// A segment entered the trigger band.
    Entered {
        /// Which topology.
        topology: TopologyKind,
        /// The entered segment.
        segment: SegmentId,
        /// Its image, if any.
        image_url: Option<String>,
    },
    /// The background swapped.
    Swap {
        /// Which topology.
        topology: TopologyKind,
        /// The slot that became active.
        slot: LayerSlot,
        /// The image now shown.
        image_url: String,
    },
    /// An entry left the background unchanged.
    Hold(HoldEvent),
    /// The tint changed.
    Tint {
        /// Which topology.
        topology: TopologyKind,
        /// The new tint value.
        tint: String,
    },
    /// The current panel changed.
    Panel {
        /// Which topology.
        topology: TopologyKind,
        /// Label of the new current panel.
        index: String,
    },
    /// A preload was dispatched.
    Preload {
        /// Which topology.
        topology: TopologyKind,
        /// The image being warmed.
        image_url: String,
    },
}

impl RecordedEvent {
    /// Returns the topology the event belongs to.
    #[must_use]
    pub fn topology(&self) -> TopologyKind {
        match self {
            Self::Setup(e) => e.topology,
            Self::Skipped(e) => e.topology,
            Self::Hold(e) => e.topology,
            Self::Entered { topology, .. }
            | Self::Swap { topology, .. }
            | Self::Tint { topology, .. }
            | Self::Panel { topology, .. }
            | Self::Preload { topology, .. } => *topology,
        }
    }

    fn to_value(&self) -> Value {
        let topology = self.topology().as_str();
        match self {
            Self::Setup(e) => json!({
                "event": "setup",
                "topology": topology,
                "source": source_name(e.source),
                "segments": e.segments,
                "panels": e.panels,
            }),
            Self::Skipped(e) => json!({
                "event": "skipped",
                "topology": topology,
                "reason": skip_name(e.reason),
            }),
            Self::Entered {
                segment, image_url, ..
            } => json!({
                "event": "entered",
                "topology": topology,
                "segment": segment.0,
                "image_url": image_url,
            }),
            Self::Swap {
                slot, image_url, ..
            } => json!({
                "event": "swap",
                "topology": topology,
                "slot": slot.as_str(),
                "image_url": image_url,
            }),
            Self::Hold(e) => json!({
                "event": "hold",
                "topology": topology,
                "segment": e.segment.0,
                "inert": e.inert,
            }),
            Self::Tint { tint, .. } => json!({
                "event": "tint",
                "topology": topology,
                "tint": tint,
            }),
            Self::Panel { index, .. } => json!({
                "event": "panel",
                "topology": topology,
                "index": index,
            }),
            Self::Preload { image_url, .. } => json!({
                "event": "preload",
                "topology": topology,
                "image_url": image_url,
            }),
        }
    }
}

fn source_name(source: MarkerSource) -> &'static str {
    match source {
        MarkerSource::Markers => "markers",
        MarkerSource::Sections => "sections",
        MarkerSource::Panels => "panels",
    }
}

fn skip_name(reason: SetupError) -> &'static str {
    match reason {
        SetupError::NoMarkers => "no_markers",
        SetupError::MissingLayers => "missing_layers",
        SetupError::MissingOverlay => "missing_overlay",
        SetupError::NoPanels => "no_panels",
    }
}

/// A [`TraceSink`] that records every event in memory.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Renders the log as a JSON array.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.events.iter().map(RecordedEvent::to_value).collect())
    }

    /// Writes the log as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_json(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.to_json())?;
        writeln!(writer)
    }
}

impl TraceSink for RecorderSink {
    fn on_setup(&mut self, e: &SetupEvent) {
        self.events.push(RecordedEvent::Setup(*e));
    }

    fn on_skipped(&mut self, e: &SkippedEvent) {
        self.events.push(RecordedEvent::Skipped(*e));
    }

    fn on_segment_entered(&mut self, e: &EnteredEvent<'_>) {
        self.events.push(RecordedEvent::Entered {
            topology: e.topology,
            segment: e.segment,
            image_url: e.image_url.map(String::from),
        });
    }

    fn on_swap(&mut self, e: &SwapEvent<'_>) {
        self.events.push(RecordedEvent::Swap {
            topology: e.topology,
            slot: e.slot,
            image_url: e.image_url.into(),
        });
    }

    fn on_hold(&mut self, e: &HoldEvent) {
        self.events.push(RecordedEvent::Hold(*e));
    }

    fn on_tint(&mut self, e: &TintEvent<'_>) {
        self.events.push(RecordedEvent::Tint {
            topology: e.topology,
            tint: e.tint.into(),
        });
    }

    fn on_panel(&mut self, e: &PanelEvent<'_>) {
        self.events.push(RecordedEvent::Panel {
            topology: e.topology,
            index: e.index.into(),
        });
    }

    fn on_preload(&mut self, e: &PreloadEvent<'_>) {
        self.events.push(RecordedEvent::Preload {
            topology: e.topology,
            image_url: e.image_url.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut sink = RecorderSink::new();
        sink.on_preload(&PreloadEvent {
            topology: TopologyKind::Global,
            image_url: "a.jpg",
        });
        sink.on_swap(&SwapEvent {
            topology: TopologyKind::Global,
            slot: LayerSlot::Secondary,
            image_url: "a.jpg",
        });
        assert_eq!(
            sink.events(),
            &[
                RecordedEvent::Preload {
                    topology: TopologyKind::Global,
                    image_url: "a.jpg".into(),
                },
                RecordedEvent::Swap {
                    topology: TopologyKind::Global,
                    slot: LayerSlot::Secondary,
                    image_url: "a.jpg".into(),
                },
            ]
        );
    }

    #[test]
    fn json_export_shape() {
        let mut sink = RecorderSink::new();
        sink.on_skipped(&SkippedEvent {
            topology: TopologyKind::Pinned,
            reason: SetupError::NoPanels,
        });
        sink.on_segment_entered(&EnteredEvent {
            topology: TopologyKind::Global,
            segment: SegmentId(2),
            image_url: None,
        });

        let json = sink.to_json();
        assert_eq!(
            json,
            json!([
                { "event": "skipped", "topology": "pinned", "reason": "no_panels" },
                { "event": "entered", "topology": "global", "segment": 2, "image_url": null },
            ])
        );
    }

    #[test]
    fn write_json_is_parseable() {
        let mut sink = RecorderSink::new();
        sink.on_tint(&TintEvent {
            topology: TopologyKind::Global,
            tint: "rgba(0, 0, 0, 0.4)",
        });
        let mut out = Vec::new();
        sink.write_json(&mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["tint"], "rgba(0, 0, 0, 0.4)");
    }
}
