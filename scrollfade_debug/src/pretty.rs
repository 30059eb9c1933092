// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use scrollfade_core::topology::TopologyKind;
use scrollfade_core::trace::{
    EnteredEvent, HoldEvent, PanelEvent, PreloadEvent, SetupEvent, SkippedEvent, SwapEvent,
    TintEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn topo(kind: TopologyKind) -> &'static str {
    kind.as_str()
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_setup(&mut self, e: &SetupEvent) {
        let _ = writeln!(
            self.writer,
            "[setup] {} source={:?} segments={} panels={}",
            topo(e.topology),
            e.source,
            e.segments,
            e.panels,
        );
    }

    fn on_skipped(&mut self, e: &SkippedEvent) {
        let _ = writeln!(self.writer, "[skip] {} {}", topo(e.topology), e.reason);
    }

    fn on_segment_entered(&mut self, e: &EnteredEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[enter] {} segment={} image={}",
            topo(e.topology),
            e.segment.0,
            e.image_url.unwrap_or("-"),
        );
    }

    fn on_swap(&mut self, e: &SwapEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[swap] {} slot={} image={}",
            topo(e.topology),
            e.slot.as_str(),
            e.image_url,
        );
    }

    fn on_hold(&mut self, e: &HoldEvent) {
        let why = if e.inert { "inert" } else { "shown" };
        let _ = writeln!(
            self.writer,
            "[hold] {} segment={} {why}",
            topo(e.topology),
            e.segment.0,
        );
    }

    fn on_tint(&mut self, e: &TintEvent<'_>) {
        let _ = writeln!(self.writer, "[tint] {} {}", topo(e.topology), e.tint);
    }

    fn on_panel(&mut self, e: &PanelEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[panel] {} current={}",
            topo(e.topology),
            e.index
        );
    }

    fn on_preload(&mut self, e: &PreloadEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[preload] {} {}",
            topo(e.topology),
            e.image_url
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfade_core::error::SetupError;
    use scrollfade_core::layer::LayerSlot;

    #[test]
    fn pretty_print_swap() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_swap(&SwapEvent {
            topology: TopologyKind::Global,
            slot: LayerSlot::Secondary,
            image_url: "white.jpeg",
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[swap] global slot=secondary image=white.jpeg\n");
    }

    #[test]
    fn pretty_print_skip_uses_display() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_skipped(&SkippedEvent {
            topology: TopologyKind::Pinned,
            reason: SetupError::MissingOverlay,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[skip] pinned"), "got: {output}");
        assert!(output.contains("overlay"), "got: {output}");
    }
}
